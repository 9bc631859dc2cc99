use std::ffi::CStr;

use crate::transmutable_u32;

#[repr(u32)]
#[derive(Debug, Clone, Copy)]
pub enum GlString {
    Vendor = gl::VENDOR,
    Renderer = gl::RENDERER,
    Version = gl::VERSION,
    ShadingLanguageVersion = gl::SHADING_LANGUAGE_VERSION,
}
transmutable_u32!(GlString);

impl GlString {
    /// `None` when no context is current or the driver returned non-UTF-8.
    pub fn get_gl(&self) -> Option<&'static str> {
        if !gl::GetString::is_loaded() {
            return None;
        }
        let str_ptr = unsafe { gl::GetString(self.to_u32()) };
        if str_ptr.is_null() {
            return None;
        }
        unsafe { CStr::from_ptr(str_ptr.cast()).to_str().ok() }
    }
}
