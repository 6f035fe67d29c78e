// SPDX-License-Identifier: MPL-2.0
//! MobileNet v2 ONNX classifier.
//!
//! This module provides functionality for:
//! - Downloading the MobileNet ONNX model and ImageNet labels from
//!   configurable URLs
//! - Verifying model integrity with a BLAKE3 checksum
//! - Running inference and turning logits into ranked predictions

use crate::app::paths;
use crate::classifier::{labels, ClassifyError, ClassifyResult, Prediction};
use image_rs::DynamicImage;
use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::{Path, PathBuf};

/// Filename for the downloaded model in the data directory.
const MODEL_FILENAME: &str = "mobilenetv2-10.onnx";

/// Filename for the downloaded labels in the data directory.
const LABELS_FILENAME: &str = "imagenet_classes.txt";

/// Spatial input size expected by MobileNet v2.
pub const INPUT_SIZE: u32 = 224;

/// ImageNet channel means, RGB order.
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// ImageNet channel standard deviations, RGB order.
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Minimum expected model size (5 MB) to detect failed downloads.
/// The MobileNet v2 checkpoint is ~14 MB.
const MIN_MODEL_SIZE_BYTES: u64 = 5_000_000;

const USER_AGENT: &str = concat!("IcedIdentify/", env!("CARGO_PKG_VERSION"));

/// Tunables resolved from config at startup.
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub model_url: String,
    pub labels_url: String,
    /// Optional BLAKE3 hash the downloaded model must match.
    pub model_checksum: Option<String>,
    /// Number of predictions to return from `classify`.
    pub top_k: usize,
    /// Override for the cache directory, used by tests.
    pub data_dir: Option<PathBuf>,
}

/// Manager for the MobileNet classification model.
///
/// Handles model lifecycle: download, validation, and inference.
pub struct MobileNetClassifier {
    model_path: PathBuf,
    labels_path: PathBuf,
    settings: ClassifierSettings,
    labels: Vec<String>,
    session: Option<Session>,
}

impl MobileNetClassifier {
    /// Creates a new classifier instance. The session is not loaded yet.
    #[must_use]
    pub fn new(settings: ClassifierSettings) -> Self {
        let data_dir = settings
            .data_dir
            .clone()
            .or_else(paths::get_app_data_dir)
            .unwrap_or_default();
        Self {
            model_path: data_dir.join(MODEL_FILENAME),
            labels_path: data_dir.join(LABELS_FILENAME),
            settings,
            labels: Vec::new(),
            session: None,
        }
    }

    pub fn model_path(&self) -> &PathBuf {
        &self.model_path
    }

    pub fn labels_path(&self) -> &PathBuf {
        &self.labels_path
    }

    pub fn model_url(&self) -> &str {
        &self.settings.model_url
    }

    pub fn labels_url(&self) -> &str {
        &self.settings.labels_url
    }

    pub fn expected_checksum(&self) -> Option<&str> {
        self.settings.model_checksum.as_deref()
    }

    /// Checks if the model file exists on disk with a plausible size.
    pub fn is_model_downloaded(&self) -> bool {
        match std::fs::metadata(&self.model_path) {
            Ok(meta) => meta.len() >= MIN_MODEL_SIZE_BYTES,
            Err(_) => false,
        }
    }

    /// Reads the label table from disk. A missing or short table is tolerated;
    /// unknown indices fall back to `class N`.
    pub fn load_labels(&mut self) -> ClassifyResult<()> {
        self.labels = labels::load_from_file(&self.labels_path)?;
        Ok(())
    }

    /// Loads the ONNX session from the model file.
    ///
    /// Must be called after the model is downloaded and verified.
    pub fn load_session(&mut self) -> ClassifyResult<()> {
        if !self.model_path.exists() {
            return Err(ClassifyError::ModelNotFound);
        }

        let session = Session::builder()
            .map_err(|e| ClassifyError::InferenceFailed(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ClassifyError::InferenceFailed(e.to_string()))?
            .commit_from_file(&self.model_path)
            .map_err(|e| ClassifyError::InferenceFailed(e.to_string()))?;

        self.session = Some(session);
        Ok(())
    }

    /// Checks if the ONNX session is loaded and ready.
    pub fn is_session_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Runs classification on an image.
    ///
    /// Returns the top predictions ordered by descending probability.
    pub fn classify(&mut self, image: &DynamicImage) -> ClassifyResult<Vec<Prediction>> {
        let session = self
            .session
            .as_mut()
            .ok_or(ClassifyError::SessionNotInitialized)?;

        // Preprocess: DynamicImage -> NCHW tensor (RGB, ImageNet-normalized)
        let input_tensor = preprocess_image(image)?;
        let input_tensor = input_tensor.as_standard_layout().into_owned();

        // Get input name from model (the ONNX zoo export uses 'input')
        let input_name = session
            .inputs
            .first()
            .map_or_else(|| "input".to_string(), |i| i.name.clone());

        let input_ref = ort::value::TensorRef::from_array_view(&input_tensor)
            .map_err(|e| ClassifyError::InferenceFailed(e.to_string()))?;

        let outputs = session
            .run(ort::inputs![input_name.as_str() => input_ref])
            .map_err(|e| ClassifyError::InferenceFailed(e.to_string()))?;

        // Postprocess: logits -> softmax -> ranked (label, probability) pairs
        let logits = extract_logits(&outputs)?;
        let probabilities = softmax(&logits);
        Ok(top_k(&probabilities, self.settings.top_k, &self.labels))
    }
}

/// Preprocesses an image for MobileNet inference.
///
/// Resizes to 224x224, converts to NCHW format (batch=1, channels=3), RGB
/// color order, normalized with the ImageNet channel means and deviations.
pub fn preprocess_image(img: &DynamicImage) -> ClassifyResult<Array4<f32>> {
    let resized = img
        .resize_exact(INPUT_SIZE, INPUT_SIZE, image_rs::imageops::FilterType::Triangle)
        .to_rgb8();

    let size = INPUT_SIZE as usize;
    let mut tensor = Array4::<f32>::zeros((1, 3, size, size));

    for (x, y, pixel) in resized.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        tensor[[0, 0, y as usize, x as usize]] = (r as f32 / 255.0 - MEAN[0]) / STD[0];
        tensor[[0, 1, y as usize, x as usize]] = (g as f32 / 255.0 - MEAN[1]) / STD[1];
        tensor[[0, 2, y as usize, x as usize]] = (b as f32 / 255.0 - MEAN[2]) / STD[2];
    }

    Ok(tensor)
}

/// Pulls the flat logit vector out of the first output tensor.
///
/// Accepts `[1, N]` as exported by the ONNX model zoo, or a flat `[N]`.
fn extract_logits(outputs: &ort::session::SessionOutputs<'_>) -> ClassifyResult<Vec<f32>> {
    let (_, output) = outputs
        .iter()
        .next()
        .ok_or_else(|| ClassifyError::PostprocessingFailed("No output tensor".to_string()))?;

    let (shape, data) = output
        .try_extract_tensor::<f32>()
        .map_err(|e: ort::Error| ClassifyError::PostprocessingFailed(e.to_string()))?;

    match shape.len() {
        1 => Ok(data.to_vec()),
        2 if shape[0] == 1 => Ok(data.to_vec()),
        _ => Err(ClassifyError::PostprocessingFailed(format!(
            "Unexpected output shape: {shape:?}"
        ))),
    }
}

/// Numerically stable softmax over the logit vector.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|v| v / sum).collect()
}

/// Ranks probabilities and resolves the top `k` into predictions.
fn top_k(probabilities: &[f32], k: usize, class_labels: &[String]) -> Vec<Prediction> {
    let mut indexed: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed
        .into_iter()
        .take(k)
        .map(|(index, probability)| Prediction {
            label: labels::resolve(class_labels, index),
            probability,
        })
        .collect()
}

/// Downloads the model from the specified URL to `path`.
///
/// Returns the number of bytes downloaded.
pub async fn download_model(url: &str, path: &Path) -> ClassifyResult<u64> {
    use futures_util::StreamExt;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ClassifyError::DownloadFailed(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ClassifyError::DownloadFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ClassifyError::DownloadFailed(format!(
            "HTTP status: {}",
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);

    // A tiny response here is an error page, not the model.
    if total_size > 0 && total_size < MIN_MODEL_SIZE_BYTES {
        return Err(ClassifyError::DownloadFailed(format!(
            "Response too small ({total_size} bytes), expected model file (~14 MB). URL may have changed or returned an error page."
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ClassifyError::Io(e.to_string()))?;
    }

    let mut file = std::fs::File::create(path).map_err(|e| ClassifyError::Io(e.to_string()))?;

    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ClassifyError::DownloadFailed(e.to_string()))?;
        std::io::Write::write_all(&mut file, &chunk)
            .map_err(|e| ClassifyError::Io(e.to_string()))?;
        downloaded += chunk.len() as u64;
    }

    if downloaded < MIN_MODEL_SIZE_BYTES {
        // Delete the incomplete/invalid file
        let _ = std::fs::remove_file(path);
        return Err(ClassifyError::DownloadFailed(format!(
            "Downloaded file too small ({downloaded} bytes), expected ~14 MB"
        )));
    }

    Ok(downloaded)
}

/// Downloads the labels file (one class name per line) to `path`.
pub async fn download_labels(url: &str, path: &Path) -> ClassifyResult<()> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ClassifyError::DownloadFailed(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ClassifyError::DownloadFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ClassifyError::DownloadFailed(format!(
            "HTTP status: {}",
            response.status()
        )));
    }

    let text = response
        .text()
        .await
        .map_err(|e| ClassifyError::DownloadFailed(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ClassifyError::Io(e.to_string()))?;
    }
    std::fs::write(path, text).map_err(|e| ClassifyError::Io(e.to_string()))?;
    Ok(())
}

/// Verifies the model file integrity using a BLAKE3 hash.
pub fn verify_checksum(path: &Path, expected_hash: &str) -> ClassifyResult<()> {
    if !path.exists() {
        return Err(ClassifyError::ModelNotFound);
    }

    let file_data = std::fs::read(path).map_err(|e| ClassifyError::Io(e.to_string()))?;
    let actual_hash = blake3::hash(&file_data).to_hex().to_string();

    if actual_hash != expected_hash {
        return Err(ClassifyError::ChecksumMismatch {
            expected: expected_hash.to_string(),
            actual: actual_hash,
        });
    }

    Ok(())
}
