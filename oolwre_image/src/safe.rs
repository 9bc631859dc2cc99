use crate::{Image, PixelFormat};

/// Read-only view of an [`Image`] for code outside this crate: dimensions
/// and the pixel bytes, nothing that can change them.
///
/// Shares the source's storage and cannot outlive it.
#[derive(Debug, Clone, Copy)]
pub struct SafeImage<'img> {
    source: &'img Image,
}

impl<'img> SafeImage<'img> {
    pub const fn from_source(source: &'img Image) -> Self {
        Self { source }
    }

    pub const fn width(&self) -> u32 {
        self.source.width()
    }

    pub const fn height(&self) -> u32 {
        self.source.height()
    }

    pub const fn format(&self) -> PixelFormat {
        self.source.format()
    }

    pub fn buffer(&self) -> &'img [u8] {
        self.source.buffer()
    }
}

impl<'img> From<&'img Image> for SafeImage<'img> {
    fn from(source: &'img Image) -> Self {
        Self::from_source(source)
    }
}
