mod bitmap;
mod error;
mod safe;


pub use bitmap::{Image, PixelFormat};
pub use error::ImageError;
pub use safe::SafeImage;
