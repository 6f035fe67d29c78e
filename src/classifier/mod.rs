// SPDX-License-Identifier: MPL-2.0
//! Image classification backed by a MobileNet ONNX model.
//!
//! The model is an opaque collaborator from the UI's point of view: it is
//! loaded once at startup and then answers `classify` calls with an ordered
//! list of predictions. Model and label files are cached in the application
//! data directory and downloaded on first run.

pub mod labels;
pub mod mobilenet;

pub use mobilenet::{ClassifierSettings, MobileNetClassifier};

use crate::media::ImageData;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result type for classifier operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// A single classification output. Lists of predictions are always ordered by
/// descending probability; the first entry is the best guess.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Softmax probability in `[0, 1]`.
    pub probability: f32,
}

/// Errors that can occur during classifier operations.
#[derive(Debug, Clone)]
pub enum ClassifyError {
    /// Model file not found at the expected path.
    ModelNotFound,
    /// Failed to download the model or labels.
    DownloadFailed(String),
    /// Model checksum verification failed.
    ChecksumMismatch { expected: String, actual: String },
    /// ONNX inference failed.
    InferenceFailed(String),
    /// Image preprocessing failed.
    PreprocessingFailed(String),
    /// Output tensor postprocessing failed.
    PostprocessingFailed(String),
    /// IO error occurred.
    Io(String),
    /// Model session not initialized.
    SessionNotInitialized,
}

impl std::fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyError::ModelNotFound => write!(f, "Model file not found"),
            ClassifyError::DownloadFailed(msg) => write!(f, "Download failed: {msg}"),
            ClassifyError::ChecksumMismatch { expected, actual } => {
                write!(f, "Checksum mismatch: expected {expected}, got {actual}")
            }
            ClassifyError::InferenceFailed(msg) => write!(f, "Inference failed: {msg}"),
            ClassifyError::PreprocessingFailed(msg) => write!(f, "Preprocessing failed: {msg}"),
            ClassifyError::PostprocessingFailed(msg) => {
                write!(f, "Postprocessing failed: {msg}")
            }
            ClassifyError::Io(msg) => write!(f, "IO error: {msg}"),
            ClassifyError::SessionNotInitialized => write!(f, "ONNX session not initialized"),
        }
    }
}

impl std::error::Error for ClassifyError {}

/// Availability of the shared classifier, as seen by the UI.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModelState {
    /// Startup load (download + session build) still in flight.
    #[default]
    Loading,
    /// Session is ready; `classify` may be invoked.
    Ready,
    /// Startup load failed; carries the failure detail.
    Failed(String),
}

/// Thread-safe wrapper for the classifier. Loaded once, shared for the rest of
/// the session, never torn down.
pub type SharedClassifier = Arc<Mutex<MobileNetClassifier>>;

/// Creates a new shared classifier instance.
pub fn create_shared_classifier(settings: ClassifierSettings) -> SharedClassifier {
    Arc::new(Mutex::new(MobileNetClassifier::new(settings)))
}

/// Startup load: ensures the model file exists with a plausible size and the
/// labels are present (downloading either if needed), then builds the ONNX
/// session. Invoked exactly once per session.
pub async fn load(classifier: SharedClassifier) -> ClassifyResult<()> {
    let (model_path, labels_path, model_url, labels_url, checksum, model_ok) = {
        let guard = classifier.lock().await;
        (
            guard.model_path().clone(),
            guard.labels_path().clone(),
            guard.model_url().to_string(),
            guard.labels_url().to_string(),
            guard.expected_checksum().map(String::from),
            guard.is_model_downloaded(),
        )
    };

    // An undersized file is a download that was interrupted; re-fetch it
    // instead of handing the stub to the session builder.
    if !model_ok {
        mobilenet::download_model(&model_url, &model_path).await?;
    }
    if let Some(expected) = checksum {
        mobilenet::verify_checksum(&model_path, &expected)?;
    }
    if !labels_path.exists() {
        mobilenet::download_labels(&labels_url, &labels_path).await?;
    }

    let mut guard = classifier.lock().await;
    guard.load_labels()?;
    guard.load_session()?;
    Ok(())
}

/// Classifies the given image with the shared classifier.
pub async fn classify(classifier: SharedClassifier, image: ImageData) -> ClassifyResult<Vec<Prediction>> {
    let dynamic = image
        .to_dynamic()
        .map_err(|e| ClassifyError::PreprocessingFailed(e.to_string()))?;
    let mut guard = classifier.lock().await;
    guard.classify(&dynamic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_error_display() {
        assert_eq!(
            ClassifyError::ModelNotFound.to_string(),
            "Model file not found"
        );
        assert_eq!(
            ClassifyError::SessionNotInitialized.to_string(),
            "ONNX session not initialized"
        );
        assert!(ClassifyError::DownloadFailed("timeout".into())
            .to_string()
            .contains("timeout"));
    }

    #[test]
    fn model_state_defaults_to_loading() {
        assert_eq!(ModelState::default(), ModelState::Loading);
    }
}
