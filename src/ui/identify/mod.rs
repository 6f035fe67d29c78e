// SPDX-License-Identifier: MPL-2.0
//! Identify component encapsulating state and update logic.
//!
//! This is the state machine at the center of the application: one current
//! image source moving between `Empty`, `Loading`, `Ready`, and `Failed`,
//! with classification results, an append-only history, and a single active
//! error. All asynchronous work (image loading, classification, the file
//! dialog) is requested through [`Effect`] values; completions come back as
//! messages tagged with the generation they were started under, and stale
//! completions are dropped.

mod view;

pub use view::view;

use crate::classifier::{ClassifyError, ModelState, Prediction};
use crate::error::Error;
use crate::media::{ImageData, ImageSource};
use crate::ui::error_banner;
use iced::widget::image;
use std::path::PathBuf;

pub(crate) const MSG_MODEL_NOT_READY: &str = "Model is not loaded yet";
pub(crate) const MSG_NO_IMAGE: &str = "No image selected";
pub(crate) const MSG_IMAGE_NOT_READY: &str = "Please wait for the image to load completely";
pub(crate) const MSG_NO_PREDICTIONS: &str = "No predictions returned from model";
pub(crate) const MSG_CLASSIFY_FAILED: &str = "Error identifying image";
pub(crate) const MSG_IMAGE_LOAD_FAILED: &str =
    "Failed to load image. Please check the URL or try another image.";
pub(crate) const MSG_MODEL_LOAD_FAILED: &str = "Failed to load the classification model";

/// Spinner rotation speed in radians per tick.
const SPINNER_SPEED: f32 = 0.35;

/// The current image, as a single tagged state. Exactly one source is current
/// at a time; the flags of the four phases cannot drift apart.
#[derive(Debug, Clone, Default)]
pub enum ImageState {
    /// No image selected.
    #[default]
    Empty,
    /// A source was selected and its load is in flight.
    Loading { source: ImageSource },
    /// The image is decoded and displayed; classification may run.
    Ready { source: ImageSource, image: ImageData },
    /// The load failed. A new selection is the only way out.
    Failed { source: ImageSource },
}

impl ImageState {
    /// The source this state refers to, if any.
    #[must_use]
    pub fn source(&self) -> Option<&ImageSource> {
        match self {
            ImageState::Empty => None,
            ImageState::Loading { source }
            | ImageState::Ready { source, .. }
            | ImageState::Failed { source } => Some(source),
        }
    }
}

/// One entry in the history strip. The thumbnail is filled in when the
/// source's image finishes loading; until then a placeholder is shown.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub source: ImageSource,
    pub thumbnail: Option<image::Handle>,
}

/// Messages consumed by [`State::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// "Upload Image" pressed; ask the app to open the file dialog.
    OpenFilePicker,
    /// File dialog closed. `None` means the user cancelled.
    FileChosen(Option<PathBuf>),
    /// URL text field edited.
    UrlInputChanged(String),
    /// URL text field submitted (Enter).
    UrlSubmitted,
    /// A history thumbnail was clicked.
    HistoryClicked(usize),
    /// Image load finished for the selection made under `generation`.
    ImageLoaded {
        generation: u64,
        result: Result<ImageData, Error>,
    },
    /// "Identify Image" pressed.
    IdentifyPressed,
    /// Classification finished for the selection made under `generation`.
    Classified {
        generation: u64,
        result: Result<Vec<Prediction>, ClassifyError>,
    },
    /// Availability of the shared model changed.
    ModelStateChanged(ModelState),
    /// Error banner interaction.
    ErrorBanner(error_banner::Message),
    /// Animates the busy spinner.
    SpinnerTick,
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Open the async file dialog.
    OpenFileDialog,
    /// Load and decode the image behind `source`.
    LoadImage { source: ImageSource, generation: u64 },
    /// Run the classifier on the currently displayed image.
    Classify { image: ImageData, generation: u64 },
}

/// Complete identify component state.
#[derive(Debug, Default)]
pub struct State {
    image: ImageState,
    url_input: String,
    results: Vec<Prediction>,
    history: Vec<HistoryEntry>,
    error: Option<error_banner::State>,
    model: ModelState,
    classifying: bool,
    /// Bumped on every selection or clear. Completions carrying an older
    /// value raced a source change and are ignored.
    generation: u64,
    spinner_rotation: f32,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a message, mutating state and returning the side effect the
    /// application should run.
    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::OpenFilePicker => Effect::OpenFileDialog,
            Message::FileChosen(Some(path)) => {
                self.select_source(ImageSource::Path(path), true)
            }
            // Cancelled dialog leaves the current selection untouched.
            Message::FileChosen(None) => Effect::None,
            Message::UrlInputChanged(text) => {
                self.url_input = text;
                Effect::None
            }
            Message::UrlSubmitted => {
                let trimmed = self.url_input.trim();
                if trimmed.is_empty() {
                    self.clear_current();
                    Effect::None
                } else {
                    let url = trimmed.to_string();
                    self.select_source(ImageSource::Url(url), true)
                }
            }
            Message::HistoryClicked(index) => match self.history.get(index) {
                // Re-selection resets like any other selection but never
                // appends a duplicate entry.
                Some(entry) => {
                    let source = entry.source.clone();
                    self.select_source(source, false)
                }
                None => Effect::None,
            },
            Message::ImageLoaded { generation, result } => {
                if generation != self.generation {
                    return Effect::None;
                }
                let Some(source) = self.image.source().cloned() else {
                    return Effect::None;
                };
                match result {
                    Ok(image) => {
                        self.record_thumbnail(&source, &image);
                        self.error = None;
                        self.image = ImageState::Ready { source, image };
                    }
                    Err(e) => {
                        self.error =
                            Some(error_banner::State::new(MSG_IMAGE_LOAD_FAILED, e.to_string()));
                        self.image = ImageState::Failed { source };
                    }
                }
                Effect::None
            }
            Message::IdentifyPressed => self.identify(),
            Message::Classified { generation, result } => {
                if generation != self.generation {
                    // The image changed while classification was in flight.
                    return Effect::None;
                }
                self.classifying = false;
                match result {
                    Ok(predictions) if !predictions.is_empty() => {
                        self.results = predictions;
                    }
                    Ok(_) => {
                        self.error = Some(error_banner::State::new(MSG_NO_PREDICTIONS, ""));
                    }
                    Err(e) => {
                        self.error =
                            Some(error_banner::State::new(MSG_CLASSIFY_FAILED, e.to_string()));
                    }
                }
                Effect::None
            }
            Message::ModelStateChanged(state) => {
                match &state {
                    ModelState::Ready => self.error = None,
                    ModelState::Failed(detail) => {
                        self.error = Some(error_banner::State::new(
                            MSG_MODEL_LOAD_FAILED,
                            detail.clone(),
                        ));
                    }
                    ModelState::Loading => {}
                }
                self.model = state;
                Effect::None
            }
            Message::ErrorBanner(msg) => {
                if let Some(banner) = &mut self.error {
                    banner.handle(msg);
                }
                Effect::None
            }
            Message::SpinnerTick => {
                if self.is_busy() {
                    self.spinner_rotation += SPINNER_SPEED;
                    if self.spinner_rotation > std::f32::consts::TAU {
                        self.spinner_rotation -= std::f32::consts::TAU;
                    }
                }
                Effect::None
            }
        }
    }

    /// Makes `source` current: new generation, results and error cleared, and
    /// (except for history re-selection) a history entry prepended.
    fn select_source(&mut self, source: ImageSource, append_history: bool) -> Effect {
        self.generation += 1;
        self.results.clear();
        self.error = None;
        self.classifying = false;
        if append_history {
            self.history.insert(
                0,
                HistoryEntry {
                    source: source.clone(),
                    thumbnail: None,
                },
            );
        }
        self.image = ImageState::Loading {
            source: source.clone(),
        };
        Effect::LoadImage {
            source,
            generation: self.generation,
        }
    }

    /// Empty URL submission clears the current selection without touching
    /// history.
    fn clear_current(&mut self) {
        self.generation += 1;
        self.results.clear();
        self.error = None;
        self.classifying = false;
        self.image = ImageState::Empty;
    }

    /// Guards, then requests classification of the displayed image.
    fn identify(&mut self) -> Effect {
        if self.model != ModelState::Ready {
            self.error = Some(error_banner::State::new(MSG_MODEL_NOT_READY, ""));
            return Effect::None;
        }
        match &self.image {
            ImageState::Empty => {
                self.error = Some(error_banner::State::new(MSG_NO_IMAGE, ""));
                Effect::None
            }
            ImageState::Loading { .. } | ImageState::Failed { .. } => {
                self.error = Some(error_banner::State::new(MSG_IMAGE_NOT_READY, ""));
                Effect::None
            }
            ImageState::Ready { image, .. } => {
                self.error = None;
                self.classifying = true;
                Effect::Classify {
                    image: image.clone(),
                    generation: self.generation,
                }
            }
        }
    }

    /// Fills thumbnails for history entries still waiting on this source.
    fn record_thumbnail(&mut self, source: &ImageSource, image: &ImageData) {
        let thumbnail = image.thumbnail();
        for entry in &mut self.history {
            if entry.thumbnail.is_none() && &entry.source == source {
                entry.thumbnail = Some(thumbnail.clone());
            }
        }
    }

    // --- accessors used by the view and by the application root ---

    #[must_use]
    pub fn image_state(&self) -> &ImageState {
        &self.image
    }

    #[must_use]
    pub fn current_source(&self) -> Option<&ImageSource> {
        self.image.source()
    }

    #[must_use]
    pub fn results(&self) -> &[Prediction] {
        &self.results
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn error(&self) -> Option<&error_banner::State> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(error_banner::State::message)
    }

    #[must_use]
    pub fn model_state(&self) -> &ModelState {
        &self.model
    }

    #[must_use]
    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    #[must_use]
    pub fn is_classifying(&self) -> bool {
        self.classifying
    }

    /// Whether the identify button should be pressable.
    #[must_use]
    pub fn can_identify(&self) -> bool {
        self.model == ModelState::Ready
            && matches!(self.image, ImageState::Ready { .. })
            && !self.classifying
    }

    /// Whether any asynchronous work is in flight (drives the spinner tick
    /// subscription).
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.classifying
            || self.model == ModelState::Loading
            || matches!(self.image, ImageState::Loading { .. })
    }

    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.spinner_rotation
    }
}
