// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and launch flags.

use crate::classifier::ClassifyError;
use crate::ui::identify;

/// Top-level messages consumed by [`App::update`](super::App::update). The
/// identify component's messages are forwarded through a single variant so
/// there is one update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Identify(identify::Message),
    /// Startup model load finished, success or failure.
    ModelLoadFinished(Result<(), ClassifyError>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional image path to preload on startup.
    pub file_path: Option<String>,
    /// Optional override for the model/labels cache directory.
    pub data_dir: Option<String>,
    /// Optional override for the settings directory.
    pub config_dir: Option<String>,
}
