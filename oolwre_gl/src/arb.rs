//! ARB extension entry points.
//!
//! The `gl` crate only exposes the core API, so the extension fallbacks are
//! resolved here through the same kind of proc-address loader that
//! `gl::load_with` takes. Extensions promoted to core without a suffix
//! (framebuffer objects, vertex arrays, samplers, ...) resolve to the same
//! symbol name as the core function.

use std::{
    ffi::c_void,
    mem,
    sync::{PoisonError, RwLock},
};

use gl::types::*;

/// `GLhandleARB` outside of Apple platforms.
pub type HandleArb = GLuint;

macro_rules! arb_fns {
    ($($field: ident = $symbol: literal: fn($($arg: ty),*) $(-> $ret: ty)?;)*) => {
        #[derive(Clone, Copy)]
        pub struct ArbFns {
            $($field: Option<unsafe extern "system" fn($($arg),*) $(-> $ret)?>,)*
        }

        impl ArbFns {
            pub const EMPTY: Self = Self { $($field: None,)* };

            pub fn load_with(mut loader: impl FnMut(&'static str) -> *const c_void) -> Self {
                Self {
                    $($field: {
                        let ptr = loader($symbol);
                        if ptr.is_null() {
                            log::debug!("{} is unavailable", $symbol);
                            None
                        } else {
                            Some(unsafe {
                                mem::transmute::<
                                    *const c_void,
                                    unsafe extern "system" fn($($arg),*) $(-> $ret)?,
                                >(ptr)
                            })
                        }
                    },)*
                }
            }

            /// Symbols the loader could not resolve.
            pub fn missing(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $(if self.$field.is_none() {
                    missing.push($symbol);
                })*
                missing
            }

            $(
                /// Panics if the symbol was not loaded.
                pub fn $field(&self) -> unsafe extern "system" fn($($arg),*) $(-> $ret)? {
                    self.$field
                        .unwrap_or_else(|| panic!("{} was not loaded", $symbol))
                }
            )*
        }
    };
}

arb_fns! {
    gen_buffers = "glGenBuffersARB": fn(GLsizei, *mut GLuint);
    delete_buffers = "glDeleteBuffersARB": fn(GLsizei, *const GLuint);
    gen_queries = "glGenQueriesARB": fn(GLsizei, *mut GLuint);
    delete_queries = "glDeleteQueriesARB": fn(GLsizei, *const GLuint);
    create_program_object = "glCreateProgramObjectARB": fn() -> HandleArb;
    create_shader_object = "glCreateShaderObjectARB": fn(GLenum) -> HandleArb;
    delete_object = "glDeleteObjectARB": fn(HandleArb);
    gen_framebuffers = "glGenFramebuffers": fn(GLsizei, *mut GLuint);
    delete_framebuffers = "glDeleteFramebuffers": fn(GLsizei, *const GLuint);
    gen_renderbuffers = "glGenRenderbuffers": fn(GLsizei, *mut GLuint);
    delete_renderbuffers = "glDeleteRenderbuffers": fn(GLsizei, *const GLuint);
    gen_vertex_arrays = "glGenVertexArrays": fn(GLsizei, *mut GLuint);
    delete_vertex_arrays = "glDeleteVertexArrays": fn(GLsizei, *const GLuint);
    gen_samplers = "glGenSamplers": fn(GLsizei, *mut GLuint);
    delete_samplers = "glDeleteSamplers": fn(GLsizei, *const GLuint);
    gen_transform_feedbacks = "glGenTransformFeedbacks": fn(GLsizei, *mut GLuint);
    delete_transform_feedbacks = "glDeleteTransformFeedbacks": fn(GLsizei, *const GLuint);
    gen_program_pipelines = "glGenProgramPipelines": fn(GLsizei, *mut GLuint);
    delete_program_pipelines = "glDeleteProgramPipelines": fn(GLsizei, *const GLuint);
    create_shader_programv = "glCreateShaderProgramv": fn(GLenum, GLsizei, *const *const GLchar) -> GLuint;
}

impl Default for ArbFns {
    fn default() -> Self {
        Self::EMPTY
    }
}

static LOADED: RwLock<ArbFns> = RwLock::new(ArbFns::EMPTY);

/// Resolves every ARB fallback through `loader`, replacing what was loaded
/// before. Call it next to `gl::load_with`, with the same loader.
pub fn load_with(loader: impl FnMut(&'static str) -> *const c_void) {
    let fns = ArbFns::load_with(loader);
    let missing = fns.missing();
    if !missing.is_empty() {
        log::debug!("unresolved ARB entry points: {missing:?}");
    }
    *LOADED.write().unwrap_or_else(PoisonError::into_inner) = fns;
}

pub fn loaded() -> ArbFns {
    *LOADED.read().unwrap_or_else(PoisonError::into_inner)
}
