//! Image acquisition over HTTP, with local paths as a fallback.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use papersketch::{DecodedImage, Error, ImageSource, Result};

/// Default per-image timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Upper bound on downloaded image size.
const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

/// Fetches `http(s)` URLs with a blocking client and reads anything else
/// from disk.
pub struct HttpImageSource {
    client: reqwest::blocking::Client,
}

impl HttpImageSource {
    /// Build a source whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("papersketch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::InvalidOption(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::acquire(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::acquire(url, format!("HTTP {}", status)));
        }
        if let Some(len) = response.content_length() {
            if len > MAX_IMAGE_BYTES {
                return Err(Error::acquire(url, format!("image too large ({} bytes)", len)));
            }
        }

        read_capped(response, MAX_IMAGE_BYTES).map_err(|e| Error::acquire(url, e))
    }
}

/// Read at most `limit` bytes; a longer body is an error even without a
/// `Content-Length` header.
fn read_capped<R: Read>(reader: R, limit: u64) -> std::result::Result<Vec<u8>, String> {
    let mut data = Vec::new();
    reader
        .take(limit + 1)
        .read_to_end(&mut data)
        .map_err(|e| e.to_string())?;
    if data.len() as u64 > limit {
        return Err(format!("image larger than {} bytes", limit));
    }
    Ok(data)
}

impl ImageSource for HttpImageSource {
    fn acquire(&self, url: &str) -> Result<DecodedImage> {
        let data = if is_remote(url) {
            self.fetch(url)?
        } else {
            std::fs::read(Path::new(url)).map_err(|e| Error::acquire(url, e.to_string()))?
        };
        log::debug!("acquired {} ({} bytes)", url, data.len());
        DecodedImage::decode(&data).map_err(|e| Error::acquire(url, e.to_string()))
    }
}

fn is_remote(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.org/a.png"));
        assert!(is_remote("HTTP://example.org/a.png"));
        assert!(!is_remote("./figures/a.png"));
        assert!(!is_remote("ftp://example.org/a.png"));
    }

    #[test]
    fn test_read_capped() {
        assert_eq!(read_capped(&b"abcd"[..], 4).unwrap(), b"abcd");
        assert!(read_capped(&b"abcde"[..], 4).is_err());
        assert!(read_capped(std::io::repeat(0), 1024).is_err());
    }

    #[test]
    fn test_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.png");
        let options = papersketch::SketchOptions::new()
            .with_scale(0.5)
            .with_fonts(papersketch::FontOptions {
                system_fonts: false,
                ..Default::default()
            });
        let sketch = papersketch::render(
            &papersketch::Document::new(),
            &papersketch::NoImages,
            &options,
        )
        .unwrap();
        std::fs::write(&path, &sketch.bytes).unwrap();

        let source = HttpImageSource::new(Duration::from_secs(1)).unwrap();
        let image = source.acquire(path.to_str().unwrap()).unwrap();
        assert_eq!((image.width(), image.height()), (700, 418));
    }

    #[test]
    fn test_missing_local_file() {
        let source = HttpImageSource::new(Duration::from_secs(1)).unwrap();
        assert!(matches!(
            source.acquire("/definitely/not/here.png"),
            Err(Error::ImageAcquire { .. })
        ));
    }
}
