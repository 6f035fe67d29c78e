// SPDX-License-Identifier: MPL-2.0
//! Image decoding into displayable + classifiable form.

use crate::error::{Error, Result};
use iced::widget::image;
use std::sync::Arc;

/// Maximum edge length for history thumbnails.
pub const THUMBNAIL_MAX_DIM: u32 = 96;

/// A decoded image: an Iced handle for display plus the raw RGBA bytes so the
/// classifier and the thumbnail generator do not have to decode again.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
    /// Original RGBA bytes, shared via Arc to keep clones cheap.
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let rgba_bytes = Arc::new(pixels);
        let handle = image::Handle::from_rgba(width, height, rgba_bytes.to_vec());
        Self {
            handle,
            width,
            height,
            rgba_bytes,
        }
    }

    /// Returns a reference to the original RGBA bytes.
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Reassembles the pixels into an `image` crate value for processing.
    pub fn to_dynamic(&self) -> Result<image_rs::DynamicImage> {
        image_rs::RgbaImage::from_raw(self.width, self.height, self.rgba_bytes.to_vec())
            .map(image_rs::DynamicImage::ImageRgba8)
            .ok_or_else(|| Error::Decode("RGBA buffer does not match dimensions".into()))
    }

    /// Produces a downscaled handle for the history strip. Images already
    /// within the thumbnail bounds reuse the display handle.
    #[must_use]
    pub fn thumbnail(&self) -> image::Handle {
        if self.width <= THUMBNAIL_MAX_DIM && self.height <= THUMBNAIL_MAX_DIM {
            return self.handle.clone();
        }
        match self.to_dynamic() {
            Ok(dynamic) => {
                let thumb = dynamic.thumbnail(THUMBNAIL_MAX_DIM, THUMBNAIL_MAX_DIM);
                let rgba = thumb.to_rgba8();
                let (w, h) = rgba.dimensions();
                image::Handle::from_rgba(w, h, rgba.into_raw())
            }
            // Dimensions were validated at construction; fall back to the
            // full-size handle rather than dropping the entry.
            Err(_) => self.handle.clone(),
        }
    }
}

/// Decodes encoded image bytes (PNG, JPEG, GIF, WebP, BMP) into [`ImageData`].
pub fn decode_bytes(bytes: &[u8]) -> Result<ImageData> {
    let dynamic = image_rs::load_from_memory(bytes)?;
    let rgba = dynamic.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageData::from_rgba(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image_rs::DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image_rs::ImageFormat::Png,
            )
            .expect("png encoding");
        bytes
    }

    #[test]
    fn decode_bytes_reports_dimensions() {
        let data = decode_bytes(&encoded_png(4, 3)).expect("decode");
        assert_eq!(data.width, 4);
        assert_eq!(data.height, 3);
        assert_eq!(data.rgba_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn decode_bytes_rejects_garbage() {
        let result = decode_bytes(&[0, 1, 2, 3]);
        assert!(result.is_err());
    }

    #[test]
    fn to_dynamic_round_trips_pixels() {
        let data = ImageData::from_rgba(1, 1, vec![255, 0, 0, 255]);
        let dynamic = data.to_dynamic().expect("dynamic");
        assert_eq!(dynamic.to_rgba8().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn to_dynamic_rejects_mismatched_buffer() {
        let data = ImageData {
            handle: iced::widget::image::Handle::from_rgba(1, 1, vec![0; 4]),
            width: 2,
            height: 2,
            rgba_bytes: std::sync::Arc::new(vec![0; 4]),
        };
        assert!(data.to_dynamic().is_err());
    }

    #[test]
    fn small_image_thumbnail_reuses_handle_size() {
        let data = decode_bytes(&encoded_png(8, 8)).expect("decode");
        // No panic and a handle comes back; small images are not resized.
        let _ = data.thumbnail();
    }
}
