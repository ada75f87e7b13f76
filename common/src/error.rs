use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Width or height was zero or negative
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// Raw pixel buffer doesn't match the dimensions it came with
    #[error("pixel buffer holds {actual} bytes, {width}x{height} needs {expected}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("random generation failed: {0}")]
    RandomSource(#[from] rand::Error),

    #[error("failed to encode avatar: {0}")]
    Encoding(#[source] image::ImageError),

    #[error("failed to decode avatar: {0}")]
    Decoding(#[source] image::ImageError),

    #[error("no avatar at {}", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether calling again may succeed without the caller changing anything
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RandomSource(..) | Self::Io(..))
    }

    pub(crate) fn invalid_dimensions(width: impl Into<i64>, height: impl Into<i64>) -> Self {
        Self::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        }
    }
}
