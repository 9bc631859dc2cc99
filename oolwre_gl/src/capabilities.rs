//! Sources of "is this OpenGL version available" answers.
//!
//! A [`DataProvider`](crate::DataProvider) asks its capability source before
//! every native call, so swapping the source (for instance a
//! [`FixedCapabilities`] capped below the real context version) changes which
//! entry points are used from then on.

use std::{cell::RefCell, rc::Rc};

use crate::{info::GlString, GlVersion, VersionParseError};

pub trait Capabilities {
    fn is_gl_version_supported(&self, version: GlVersion) -> bool;
}

/// Reports every version up to and including `max` as supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCapabilities {
    max: GlVersion,
}

impl FixedCapabilities {
    pub const fn new(max: GlVersion) -> Self {
        Self { max }
    }

    pub const fn max(&self) -> GlVersion {
        self.max
    }
}

impl Capabilities for FixedCapabilities {
    fn is_gl_version_supported(&self, version: GlVersion) -> bool {
        version <= self.max
    }
}

/// Capabilities of the context that was current when [`query`](Self::query)
/// ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextCapabilities {
    version: GlVersion,
}

impl ContextCapabilities {
    /// Reads `GL_VERSION` from the current context. Needs `gl::load_with`
    /// to have run and a context to be current.
    pub fn query() -> Result<Self, VersionParseError> {
        let version = GlString::Version.get_gl().unwrap_or_default();
        let caps = Self::from_version_string(version)?;
        log::info!("context reports OpenGL {}", caps.version);
        Ok(caps)
    }

    pub fn from_version_string(version: &str) -> Result<Self, VersionParseError> {
        Ok(Self {
            version: GlVersion::parse(version)?,
        })
    }

    pub const fn version(&self) -> GlVersion {
        self.version
    }
}

impl Capabilities for ContextCapabilities {
    fn is_gl_version_supported(&self, version: GlVersion) -> bool {
        version <= self.version
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Rc<dyn Capabilities>>> = const { RefCell::new(None) };
}

/// Makes `capabilities` the current thread's capability source, replacing
/// any previous one.
pub fn link(capabilities: Rc<dyn Capabilities>) {
    CURRENT.with_borrow_mut(|current| *current = Some(capabilities));
}

pub fn current() -> Option<Rc<dyn Capabilities>> {
    CURRENT.with_borrow(Clone::clone)
}

pub fn unlink() -> Option<Rc<dyn Capabilities>> {
    CURRENT.with_borrow_mut(Option::take)
}
