use gl::types::*;

use crate::{arb, EntryPoint, NewObject, ResourceKind};

/// The native create/delete pair of every kind, for both entry points.
///
/// Calls are made as-is: the driver decides what a name is and nothing here
/// queries `glGetError` afterwards.
///
/// Callers pick the entry point from the kind's
/// [`DispatchEntry`](crate::kind::DispatchEntry); asking for
/// [`EntryPoint::Arb`] on a kind without a fallback (textures) is a bug, and
/// [`NativeGl`] panics on it.
pub trait GlDriver {
    fn create(&self, entry: EntryPoint, object: &NewObject<'_>) -> GLuint;
    fn delete(&self, entry: EntryPoint, kind: ResourceKind, name: GLuint);
}

/// Forwards to the loaded OpenGL functions: `gl::load_with` for the core
/// entry points and [`arb::load_with`] for the fallbacks.
///
/// # Panics
/// On an ARB request for a texture, or on an ARB function the loader could
/// not resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeGl;

fn gen_one(create: unsafe fn(GLsizei, *mut GLuint)) -> GLuint {
    let mut name = 0;
    unsafe { create(1, &mut name) };
    name
}

pub(crate) fn gen_one_arb(create: unsafe extern "system" fn(GLsizei, *mut GLuint)) -> GLuint {
    let mut name = 0;
    unsafe { create(1, &mut name) };
    name
}

impl NativeGl {
    fn create_core(object: &NewObject<'_>) -> GLuint {
        unsafe {
            match *object {
                NewObject::Texture => gen_one(gl::GenTextures),
                NewObject::Buffer => gen_one(gl::GenBuffers),
                NewObject::Query => gen_one(gl::GenQueries),
                NewObject::Program => gl::CreateProgram(),
                NewObject::Shader(stage) => gl::CreateShader(stage.to_u32()),
                NewObject::Framebuffer => gen_one(gl::GenFramebuffers),
                NewObject::Renderbuffer => gen_one(gl::GenRenderbuffers),
                NewObject::VertexArray => gen_one(gl::GenVertexArrays),
                NewObject::Sampler => gen_one(gl::GenSamplers),
                NewObject::TransformFeedback => gen_one(gl::GenTransformFeedbacks),
                NewObject::ProgramPipeline => gen_one(gl::GenProgramPipelines),
                NewObject::ShaderProgram { stage, sources } => {
                    let sources: Vec<*const GLchar> =
                        sources.iter().map(|s| s.as_ptr()).collect();
                    gl::CreateShaderProgramv(
                        stage.to_u32(),
                        sources.len() as GLsizei,
                        sources.as_ptr(),
                    )
                }
            }
        }
    }

    fn create_arb(object: &NewObject<'_>) -> GLuint {
        let fns = arb::loaded();
        unsafe {
            match *object {
                // Checked by the caller; there is no texture extension.
                NewObject::Texture => unreachable!("textures have no ARB entry point"),
                NewObject::Buffer => gen_one_arb(fns.gen_buffers()),
                NewObject::Query => gen_one_arb(fns.gen_queries()),
                NewObject::Program => fns.create_program_object()(),
                NewObject::Shader(stage) => fns.create_shader_object()(stage.to_u32()),
                NewObject::Framebuffer => gen_one_arb(fns.gen_framebuffers()),
                NewObject::Renderbuffer => gen_one_arb(fns.gen_renderbuffers()),
                NewObject::VertexArray => gen_one_arb(fns.gen_vertex_arrays()),
                NewObject::Sampler => gen_one_arb(fns.gen_samplers()),
                NewObject::TransformFeedback => gen_one_arb(fns.gen_transform_feedbacks()),
                NewObject::ProgramPipeline => gen_one_arb(fns.gen_program_pipelines()),
                NewObject::ShaderProgram { stage, sources } => {
                    let sources: Vec<*const GLchar> =
                        sources.iter().map(|s| s.as_ptr()).collect();
                    fns.create_shader_programv()(
                        stage.to_u32(),
                        sources.len() as GLsizei,
                        sources.as_ptr(),
                    )
                }
            }
        }
    }

    fn delete_core(kind: ResourceKind, name: GLuint) {
        unsafe {
            match kind {
                ResourceKind::Texture => gl::DeleteTextures(1, &name),
                ResourceKind::Buffer => gl::DeleteBuffers(1, &name),
                ResourceKind::Query => gl::DeleteQueries(1, &name),
                ResourceKind::Program => gl::DeleteProgram(name),
                ResourceKind::Shader => gl::DeleteShader(name),
                ResourceKind::Framebuffer => gl::DeleteFramebuffers(1, &name),
                ResourceKind::Renderbuffer => gl::DeleteRenderbuffers(1, &name),
                ResourceKind::VertexArray => gl::DeleteVertexArrays(1, &name),
                ResourceKind::Sampler => gl::DeleteSamplers(1, &name),
                ResourceKind::TransformFeedback => gl::DeleteTransformFeedbacks(1, &name),
                ResourceKind::ProgramPipeline => gl::DeleteProgramPipelines(1, &name),
            }
        }
    }

    fn delete_arb(kind: ResourceKind, name: GLuint) {
        let fns = arb::loaded();
        unsafe {
            match kind {
                ResourceKind::Texture => unreachable!("textures have no ARB entry point"),
                ResourceKind::Buffer => fns.delete_buffers()(1, &name),
                ResourceKind::Query => fns.delete_queries()(1, &name),
                ResourceKind::Program | ResourceKind::Shader => fns.delete_object()(name),
                ResourceKind::Framebuffer => fns.delete_framebuffers()(1, &name),
                ResourceKind::Renderbuffer => fns.delete_renderbuffers()(1, &name),
                ResourceKind::VertexArray => fns.delete_vertex_arrays()(1, &name),
                ResourceKind::Sampler => fns.delete_samplers()(1, &name),
                ResourceKind::TransformFeedback => fns.delete_transform_feedbacks()(1, &name),
                ResourceKind::ProgramPipeline => fns.delete_program_pipelines()(1, &name),
            }
        }
    }
}

impl GlDriver for NativeGl {
    fn create(&self, entry: EntryPoint, object: &NewObject<'_>) -> GLuint {
        let name = match entry {
            EntryPoint::Core => Self::create_core(object),
            EntryPoint::Arb => Self::create_arb(object),
        };
        log::trace!("created {} {name} ({entry:?})", object.kind());
        name
    }

    fn delete(&self, entry: EntryPoint, kind: ResourceKind, name: GLuint) {
        log::trace!("deleting {kind} {name} ({entry:?})");
        match entry {
            EntryPoint::Core => Self::delete_core(kind, name),
            EntryPoint::Arb => Self::delete_arb(kind, name),
        }
    }
}
