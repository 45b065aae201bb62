//! Image boundary: decode files and reduce color to one intensity channel.
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::IntensityImage;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has zero size")]
    Empty { path: String },
    #[error("rgb buffer length {len} does not match {width}x{height}x3")]
    BufferSize {
        len: usize,
        width: usize,
        height: usize,
    },
}

/// Owned 8-bit grayscale buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self::new(width, height, vec![value; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Writes one pixel; coordinates outside the buffer are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(px) = self.data.get_mut(y * self.width + x) {
            *px = value;
        }
    }

    pub fn as_view(&self) -> IntensityImage<'_> {
        IntensityImage::new(self.width, self.height, &self.data)
    }
}

/// Weighted luminance 0.299R + 0.587G + 0.114B, rounded to the nearest level.
pub fn luminance_from_rgb(
    width: usize,
    height: usize,
    rgb: &[u8],
) -> Result<GrayImageU8, ImageLoadError> {
    if rgb.len() != width * height * 3 {
        return Err(ImageLoadError::BufferSize {
            len: rgb.len(),
            width,
            height,
        });
    }
    let data = rgb
        .chunks_exact(3)
        .map(|px| {
            let y = 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64;
            y.round().clamp(0.0, 255.0) as u8
        })
        .collect();
    Ok(GrayImageU8::new(width, height, data))
}

pub fn load_intensity_image(path: &Path) -> Result<GrayImageU8, ImageLoadError> {
    let img = image::open(path)
        .map_err(|source| ImageLoadError::Decode {
            path: path.display().to_string(),
            source,
        })?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    if width == 0 || height == 0 {
        return Err(ImageLoadError::Empty {
            path: path.display().to_string(),
        });
    }
    debug!(width, height, path = %path.display(), "decoded image");
    luminance_from_rgb(width, height, img.as_raw())
}

#[cfg(test)]
#[path = "../../tests/src_inline/image/io.rs"]
mod tests;
