pub mod arb;
pub mod capabilities;
pub mod driver;
mod error;
#[cfg(feature = "glfw")]
pub mod glfw;
pub mod info;
pub mod kind;
pub mod provider;
pub mod version;

#[cfg(test)]
mod tests;

pub use capabilities::{Capabilities, ContextCapabilities, FixedCapabilities};
pub use driver::{GlDriver, NativeGl};
pub use error::{ProviderError, VersionParseError};
pub use kind::{EntryPoint, NewObject, ResourceKind, ShaderType};
pub use provider::{DataProvider, SharedProvider};
pub use version::GlVersion;

pub use gl;

#[macro_export]
macro_rules! transmutable_u32 {
    ($name: ident) => {
        impl $name {
            pub const fn to_u32(self) -> u32 {
                unsafe { std::mem::transmute(self) }
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.to_u32()
            }
        }
    };
}
