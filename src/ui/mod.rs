// SPDX-License-Identifier: MPL-2.0
//! UI components and styling.

pub mod design_tokens;
pub mod empty_state;
pub mod error_banner;
pub mod history;
pub mod identify;
pub mod results;
pub mod styles;
