use std::fmt;

use crate::VersionParseError;

/// An OpenGL version, ordered by `(major, minor)`.
///
/// Encodes as `major * 10 + minor`, so `GlVersion::V4_1.encoded() == 41`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlVersion {
    major: u8,
    minor: u8,
}

impl GlVersion {
    pub const V1_1: Self = Self::new(1, 1);
    pub const V1_5: Self = Self::new(1, 5);
    pub const V2_0: Self = Self::new(2, 0);
    pub const V3_0: Self = Self::new(3, 0);
    pub const V3_3: Self = Self::new(3, 3);
    pub const V4_0: Self = Self::new(4, 0);
    pub const V4_1: Self = Self::new(4, 1);
    pub const V4_6: Self = Self::new(4, 6);

    /// `minor` must be a single digit.
    pub const fn new(major: u8, minor: u8) -> Self {
        assert!(minor < 10, "GL minor versions are single digits");
        Self { major, minor }
    }

    /// `None` when the major version does not fit in a `u8`.
    pub const fn from_encoded(encoded: u16) -> Option<Self> {
        let major = encoded / 10;
        if major > u8::MAX as u16 {
            return None;
        }
        Some(Self::new(major as u8, (encoded % 10) as u8))
    }

    pub const fn major(self) -> u8 {
        self.major
    }

    pub const fn minor(self) -> u8 {
        self.minor
    }

    pub const fn encoded(self) -> u16 {
        self.major as u16 * 10 + self.minor as u16
    }

    /// Pulls the first `major.minor` pair out of a `GL_VERSION` style string.
    ///
    /// Accepts the desktop form (`"4.6.0 NVIDIA 550.54"`), vendor suffixes
    /// (`"3.3 (Core Profile) Mesa 23.1.4"`) and the ES prefix
    /// (`"OpenGL ES 3.2 v1.r32p1"`).
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        let missing = || VersionParseError::Missing(text.to_string());
        let out_of_range = || VersionParseError::OutOfRange(text.to_string());

        let start = text.find(|c: char| c.is_ascii_digit()).ok_or_else(missing)?;
        let mut parts = text[start..]
            .split(|c: char| !c.is_ascii_digit() && c != '.')
            .next()
            .unwrap_or_default()
            .split('.');

        let major = parts.next().filter(|s| !s.is_empty()).ok_or_else(missing)?;
        let minor = parts.next().filter(|s| !s.is_empty()).ok_or_else(missing)?;

        let major: u8 = major.parse().map_err(|_| out_of_range())?;
        let minor: u8 = minor.parse().map_err(|_| out_of_range())?;
        if minor >= 10 {
            return Err(out_of_range());
        }
        Ok(Self::new(major, minor))
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
