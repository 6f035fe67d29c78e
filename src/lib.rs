// SPDX-License-Identifier: MPL-2.0
//! `iced_identify` is an image identification demo built with the Iced GUI
//! framework.
//!
//! The user supplies an image from disk or a URL, a pretrained MobileNet ONNX
//! model classifies it locally, and the top predictions are shown with
//! confidence scores. Previously viewed images are kept in a thumbnail
//! history for quick re-selection.

pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod media;
pub mod ui;
