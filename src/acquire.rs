//! Image acquisition.
//!
//! Fetching and decoding remote images belongs to the host; the core only
//! consumes the [`ImageSource`] capability. Every attempt produces an
//! [`Acquisition`], so failures stay visible to callers and tests instead
//! of disappearing at the call site.

use rayon::prelude::*;

use crate::error::{Error, Result};

/// A decoded raster image with straight (non-premultiplied) RGBA8 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

impl DecodedImage {
    /// Wrap an RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ImageDecode(format!(
                "image has no pixels ({}x{})",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::ImageDecode(format!(
                "pixel buffer is {} bytes, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode PNG or JPEG bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(data)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// A single-color image. Zero dimensions are clamped to one pixel.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Capability that turns a URL into a decoded image.
///
/// Implementations should bound their own latency (the CLI's HTTP source
/// applies a per-request timeout). No retries are expected.
pub trait ImageSource: Send + Sync {
    /// Fetch and decode one image.
    fn acquire(&self, url: &str) -> Result<DecodedImage>;
}

impl<F> ImageSource for F
where
    F: Fn(&str) -> Result<DecodedImage> + Send + Sync,
{
    fn acquire(&self, url: &str) -> Result<DecodedImage> {
        self(url)
    }
}

/// Source that fails every request, for rendering text-only sketches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn acquire(&self, url: &str) -> Result<DecodedImage> {
        Err(Error::acquire(url, "image acquisition disabled"))
    }
}

/// Outcome of one acquisition attempt.
#[derive(Debug, Clone)]
pub enum Acquisition {
    /// The image was decoded
    Loaded {
        /// Requested URL
        url: String,
        /// Decoded image
        image: DecodedImage,
    },
    /// The attempt failed and the image is dropped from this render
    Failed {
        /// Requested URL
        url: String,
        /// Failure description
        reason: String,
    },
}

impl Acquisition {
    /// Requested URL.
    pub fn url(&self) -> &str {
        match self {
            Acquisition::Loaded { url, .. } | Acquisition::Failed { url, .. } => url,
        }
    }

    /// The decoded image, if any.
    pub fn image(&self) -> Option<&DecodedImage> {
        match self {
            Acquisition::Loaded { image, .. } => Some(image),
            Acquisition::Failed { .. } => None,
        }
    }

    /// Whether the attempt succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Acquisition::Loaded { .. })
    }
}

fn acquire_one(source: &dyn ImageSource, url: &str) -> Acquisition {
    match source.acquire(url) {
        Ok(image) => Acquisition::Loaded {
            url: url.to_string(),
            image,
        },
        Err(err) => {
            let reason = match err {
                Error::ImageAcquire { reason, .. } => reason,
                other => other.to_string(),
            };
            Acquisition::Failed {
                url: url.to_string(),
                reason,
            }
        }
    }
}

/// Acquire each URL once, returning outcomes in input order.
///
/// Sequential by default: image `i + 1` is not requested before image `i`
/// resolves. With `parallel` the requests run on the rayon pool; the result
/// order is still the input order.
pub fn acquire_all(urls: &[String], source: &dyn ImageSource, parallel: bool) -> Vec<Acquisition> {
    let results: Vec<Acquisition> = if parallel {
        urls.par_iter().map(|url| acquire_one(source, url)).collect()
    } else {
        urls.iter().map(|url| acquire_one(source, url)).collect()
    };

    for result in &results {
        if let Acquisition::Failed { url, reason } = result {
            log::warn!("skipping image {}: {}", url, reason);
        }
    }

    results
}

/// Decoded images only, in order.
pub fn loaded_images(acquisitions: &[Acquisition]) -> Vec<&DecodedImage> {
    acquisitions.iter().filter_map(Acquisition::image).collect()
}
