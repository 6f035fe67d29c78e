// SPDX-License-Identifier: MPL-2.0
//! Asynchronous image loading from a file path or a remote URL.
//!
//! Each selection triggers exactly one load, which completes with either a
//! decoded image or an error. Failures are reported to the caller and shown in
//! the UI; nothing here retries.

use crate::error::{Error, Result};
use crate::media::image::{decode_bytes, ImageData};
use crate::media::source::ImageSource;

/// Upper bound for a fetched image body. Anything larger is almost certainly
/// not a demo-sized photo.
const MAX_IMAGE_BYTES: u64 = 50 * 1024 * 1024;

const USER_AGENT: &str = concat!("IcedIdentify/", env!("CARGO_PKG_VERSION"));

/// Loads and decodes the image behind `source`.
pub async fn load_source(source: ImageSource) -> Result<ImageData> {
    match source {
        ImageSource::Path(path) => {
            let bytes = tokio::task::spawn_blocking(move || std::fs::read(&path))
                .await
                .map_err(|e| Error::Io(e.to_string()))??;
            decode_bytes(&bytes)
        }
        ImageSource::Url(url) => {
            let bytes = fetch_url(&url).await?;
            decode_bytes(&bytes)
        }
    }
}

async fn fetch_url(url: &str) -> Result<Vec<u8>> {
    use futures_util::StreamExt;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()?;

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Http(format!("HTTP status: {}", response.status())));
    }

    if let Some(length) = response.content_length() {
        if length > MAX_IMAGE_BYTES {
            return Err(Error::Http(format!(
                "Response too large ({length} bytes)"
            )));
        }
    }

    // Servers may omit Content-Length, so the cap is enforced chunk by chunk
    // while the body streams in.
    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        append_within_limit(&mut bytes, &chunk, MAX_IMAGE_BYTES)?;
    }

    Ok(bytes)
}

/// Appends `chunk` to `buf` unless that would push the total past `max`.
fn append_within_limit(buf: &mut Vec<u8>, chunk: &[u8], max: u64) -> Result<()> {
    let total = buf.len() as u64 + chunk.len() as u64;
    if total > max {
        return Err(Error::Http(format!(
            "Response too large (over {max} bytes)"
        )));
    }
    buf.extend_from_slice(chunk);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn load_source_reads_local_file() {
        let img = image_rs::RgbaImage::from_pixel(2, 2, image_rs::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        image_rs::DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image_rs::ImageFormat::Png,
            )
            .expect("png encoding");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pixel.png");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(&bytes).expect("write");

        let data = load_source(ImageSource::Path(path)).await.expect("load");
        assert_eq!((data.width, data.height), (2, 2));
    }

    #[test]
    fn append_within_limit_accepts_chunks_up_to_the_cap() {
        let mut buf = Vec::new();
        append_within_limit(&mut buf, &[0; 6], 10).expect("first chunk");
        append_within_limit(&mut buf, &[0; 4], 10).expect("exactly at cap");
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn append_within_limit_rejects_overflowing_chunk() {
        let mut buf = vec![0; 8];
        let result = append_within_limit(&mut buf, &[0; 3], 10);

        assert!(matches!(result, Err(Error::Http(_))));
        // The oversized chunk is not partially applied.
        assert_eq!(buf.len(), 8);
    }

    #[tokio::test]
    async fn load_source_missing_file_is_io_error() {
        let result = load_source(ImageSource::Path("/nonexistent/missing.png".into())).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn load_source_local_garbage_is_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("not-an-image.png");
        std::fs::write(&path, b"plain text").expect("write");

        let result = load_source(ImageSource::Path(path)).await;
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
