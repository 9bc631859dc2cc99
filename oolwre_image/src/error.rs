use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("expected {expected} bytes of pixel data, got {actual}")]
    BufferSize { expected: usize, actual: usize },
    #[error("{width}x{height} image is too large to address")]
    TooLarge { width: u32, height: u32 },
    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),
}
