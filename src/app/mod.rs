// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct owns the shared classifier and the identify component,
//! and translates the component's [`Effect`]s into Iced tasks: the file
//! dialog, asynchronous image loads, and classification calls. The model is
//! loaded once at startup and kept for the life of the session.

mod message;
pub mod paths;

pub use message::{Flags, Message};

use crate::classifier::{self, ClassifierSettings, ModelState, SharedClassifier};
use crate::config;
use crate::media;
use crate::ui::identify::{self, Effect};
use iced::{time, window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 700;
pub const MIN_WINDOW_WIDTH: u32 = 560;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// Interval between spinner animation ticks while async work is pending.
const SPINNER_TICK: Duration = Duration::from_millis(100);

/// File extensions offered by the upload dialog.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Root Iced application state.
pub struct App {
    identify: identify::State,
    /// Loaded once at startup, shared by reference for the rest of the
    /// session, never torn down.
    classifier: SharedClassifier,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("model", self.identify.model_state())
            .field("has_image", &self.identify.current_source().is_some())
            .finish()
    }
}

/// Builds the window settings.
fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    iced::application(|state: &App| state.title(), App::update, App::view)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run_with(move || App::new(flags))
}

impl App {
    /// Initializes application state, kicks off the one-time model load, and
    /// optionally preloads an image passed on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let settings = match config::load() {
            Ok(config) => {
                if let Err(err) = config::save_if_missing(&config) {
                    eprintln!("Failed to write initial settings file: {err}");
                }
                ClassifierSettings {
                    model_url: config.model_url().to_string(),
                    labels_url: config.labels_url().to_string(),
                    model_checksum: config.model_checksum.clone(),
                    top_k: config.top_k(),
                    data_dir: None,
                }
            }
            Err(err) => {
                eprintln!("Failed to load settings, using defaults: {err}");
                ClassifierSettings {
                    model_url: config::defaults::MODEL_URL.to_string(),
                    labels_url: config::defaults::LABELS_URL.to_string(),
                    model_checksum: None,
                    top_k: config::defaults::TOP_K,
                    data_dir: None,
                }
            }
        };

        let classifier = classifier::create_shared_classifier(settings);
        let mut app = App {
            identify: identify::State::new(),
            classifier: classifier.clone(),
        };

        let load_model = Task::perform(classifier::load(classifier), Message::ModelLoadFinished);

        let preload = match flags.file_path {
            Some(path) => {
                let effect = app
                    .identify
                    .update(identify::Message::FileChosen(Some(PathBuf::from(path))));
                app.perform(effect)
            }
            None => Task::none(),
        };

        (app, Task::batch([load_model, preload]))
    }

    fn title(&self) -> String {
        String::from("Iced Identify")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Identify(msg) => {
                let effect = self.identify.update(msg);
                self.perform(effect)
            }
            Message::ModelLoadFinished(result) => {
                let state = match result {
                    Ok(()) => ModelState::Ready,
                    Err(err) => {
                        eprintln!("Model load failed: {err}");
                        ModelState::Failed(err.to_string())
                    }
                };
                let effect = self
                    .identify
                    .update(identify::Message::ModelStateChanged(state));
                self.perform(effect)
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        identify::view(&self.identify).map(Message::Identify)
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.identify.is_busy() {
            time::every(SPINNER_TICK)
                .map(|_| Message::Identify(identify::Message::SpinnerTick))
        } else {
            Subscription::none()
        }
    }

    /// Turns a component effect into the task that fulfills it.
    fn perform(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::OpenFileDialog => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .add_filter("Image Files", &IMAGE_EXTENSIONS)
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                |path| Message::Identify(identify::Message::FileChosen(path)),
            ),
            Effect::LoadImage { source, generation } => Task::perform(
                media::load_source(source),
                move |result| Message::Identify(identify::Message::ImageLoaded { generation, result }),
            ),
            Effect::Classify { image, generation } => {
                let classifier = self.classifier.clone();
                Task::perform(classifier::classify(classifier, image), move |result| {
                    Message::Identify(identify::Message::Classified { generation, result })
                })
            }
        }
    }
}
