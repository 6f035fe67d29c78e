// SPDX-License-Identifier: MPL-2.0
//! Image sources, decoding, and asynchronous loading.

pub mod fetch;
pub mod image;
pub mod source;

pub use fetch::load_source;
pub use image::{decode_bytes, ImageData};
pub use source::ImageSource;
