use thiserror::Error;

/// Errors at the I/O edges. The computation itself never fails.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse series description: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "im-io")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
