use thiserror::Error;

use crate::{GlVersion, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The kind's core entry point needs `required` and it has no extension
    /// fallback to use instead.
    #[error("OpenGL {required} must be supported in order to manage {kind} names")]
    UnsupportedVersion {
        kind: ResourceKind,
        required: GlVersion,
    },
    #[error("no capability provider is linked to the current thread")]
    NoCapabilities,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("no `major.minor` version number in {:?}", .0)]
    Missing(String),
    #[error("version component out of range in {:?}", .0)]
    OutOfRange(String),
}
