use color_eyre::{eyre::eyre, Result as EyreResult};
use std::{
    ffi::{c_char, c_void, CStr, CString},
    ptr::{self, NonNull},
};

use glfw::ffi;

use crate::GlVersion;

extern "C" fn err_callback(err: i32, desc: *const c_char) {
    let desc = unsafe { CStr::from_ptr(desc) }.to_string_lossy();
    log::error!("glfw error {err:#x}: {desc}");
}

pub fn init() -> Option<()> {
    let err = unsafe { ffi::glfwInit() };
    (err == 1).then_some(())
}

pub fn install_errors() {
    unsafe { ffi::glfwSetErrorCallback(Some(err_callback)) };
}

/// Null for names that contain a nul byte or that the context lacks.
pub fn get_proc_address(name: &'static str) -> *const c_void {
    match CString::new(name) {
        Ok(name) => unsafe { ffi::glfwGetProcAddress(name.as_ptr()) },
        Err(_) => ptr::null(),
    }
}

pub fn poll_events() {
    unsafe { ffi::glfwPollEvents() }
}

pub fn terminate() {
    unsafe { ffi::glfwTerminate() }
}

/// A GLFW window owning its GL context.
pub struct Window {
    window: NonNull<ffi::GLFWwindow>,
}

pub(crate) fn window_title(title: &str) -> EyreResult<CString> {
    CString::new(title).map_err(|_| eyre!("window title {title:?} contains a nul byte"))
}

impl Window {
    /// Opens a window; with `context` set, asks GLFW for at least that
    /// OpenGL version.
    pub fn open(
        width: i32,
        height: i32,
        title: &str,
        context: Option<GlVersion>,
    ) -> EyreResult<Self> {
        let title = window_title(title)?;
        unsafe {
            ffi::glfwDefaultWindowHints();
            if let Some(version) = context {
                ffi::glfwWindowHint(ffi::CONTEXT_VERSION_MAJOR, version.major().into());
                ffi::glfwWindowHint(ffi::CONTEXT_VERSION_MINOR, version.minor().into());
            }
        }
        let window = unsafe {
            ffi::glfwCreateWindow(width, height, title.as_ptr(), ptr::null_mut(), ptr::null_mut())
        };

        NonNull::new(window)
            .map(|window| Self { window })
            .ok_or_else(|| match context {
                Some(version) => eyre!("no {width}x{height} window with an OpenGL {version} context"),
                None => eyre!("no {width}x{height} window could be opened"),
            })
    }

    pub fn should_close(&self) -> bool {
        unsafe { ffi::glfwWindowShouldClose(self.window.as_ptr()) != 0 }
    }

    pub fn present(&self) {
        unsafe { ffi::glfwSwapBuffers(self.window.as_ptr()) }
    }

    pub fn make_current(&self) {
        unsafe { ffi::glfwMakeContextCurrent(self.window.as_ptr()) };
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        unsafe { ffi::glfwDestroyWindow(self.window.as_ptr()) };
    }
}
