use crate::{ImageError, SafeImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    Gray8,
    Rgb8,
    #[default]
    Rgba8,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Tightly packed pixel rows, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl Image {
    /// `None` when the pixel data would not fit in `usize`.
    fn byte_len(width: u32, height: u32, format: PixelFormat) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(format.bytes_per_pixel())
    }

    /// A zeroed image.
    ///
    /// # Panics
    /// If the pixel data would not fit in `usize`. [`Image::from_raw`]
    /// reports that as [`ImageError::TooLarge`] instead.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = Self::byte_len(width, height, format)
            .unwrap_or_else(|| panic!("{width}x{height} {format:?} image is too large"));
        Self {
            width,
            height,
            format,
            pixels: vec![0; len],
        }
    }

    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let expected = Self::byte_len(width, height, format)
            .ok_or(ImageError::TooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Decodes an encoded image (PNG) into RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory(bytes)?.into_rgba8();
        let (width, height) = decoded.dimensions();
        log::debug!("decoded {width}x{height} image");
        Self::from_raw(width, height, PixelFormat::Rgba8, decoded.into_raw())
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn buffer(&self) -> &[u8] {
        &self.pixels
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn pixel_range(&self, x: u32, y: u32) -> Option<std::ops::Range<usize>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        Some(start..start + bpp)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        self.pixel_range(x, y).map(|range| &self.pixels[range])
    }

    /// Returns `false` if `(x, y)` is out of bounds.
    ///
    /// # Panics
    /// If `value` is not exactly one pixel long.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) -> bool {
        assert_eq!(value.len(), self.format.bytes_per_pixel());
        match self.pixel_range(x, y) {
            Some(range) => {
                self.pixels[range].copy_from_slice(value);
                true
            }
            None => false,
        }
    }

    pub fn to_safe_image(&self) -> SafeImage<'_> {
        SafeImage::from_source(self)
    }
}
