//! Name allocation that picks the right entry point for the context.

use std::{cell::RefCell, ffi::CStr, rc::Rc};

use gl::types::GLuint;

use crate::{
    capabilities, kind::DispatchEntry, Capabilities, EntryPoint, GlDriver, NativeGl, NewObject,
    ProviderError, ResourceKind, ShaderType,
};

pub type Result<T> = std::result::Result<T, ProviderError>;

pub type SharedProvider = Rc<RefCell<DataProvider>>;

thread_local! {
    static CURRENT: RefCell<Option<SharedProvider>> = const { RefCell::new(None) };
}

/// Generates and deletes GL object names, using the ARB extension entry
/// points when the context is too old for the core ones.
///
/// Names created with [`generate`](Self::generate) are remembered per kind so
/// they can be released together with [`delete_all`](Self::delete_all).
/// Names from [`generate_untracked`](Self::generate_untracked) are not, and
/// their owner has to delete them.
///
/// Nothing is deleted on drop: the context may no longer be current then.
pub struct DataProvider {
    capabilities: Rc<dyn Capabilities>,
    driver: Rc<dyn GlDriver>,
    tracked: [Vec<GLuint>; ResourceKind::COUNT],
}

macro_rules! per_kind {
    ($($kind: ident: $gen: ident, $delete: ident, $delete_all: ident;)*) => {
        impl DataProvider {
            $(
                pub fn $gen(&mut self) -> Result<GLuint> {
                    self.generate(NewObject::$kind)
                }

                pub fn $delete(&mut self, name: GLuint) -> Result<()> {
                    self.delete(ResourceKind::$kind, name)
                }

                pub fn $delete_all(&mut self) -> Result<()> {
                    self.delete_all_of(ResourceKind::$kind)
                }
            )*
        }
    };
}

per_kind! {
    Texture: gen_texture, delete_texture, delete_textures;
    Buffer: gen_buffer, delete_buffer, delete_buffers;
    Query: gen_query, delete_query, delete_queries;
    Program: gen_program, delete_program, delete_programs;
    Framebuffer: gen_framebuffer, delete_framebuffer, delete_framebuffers;
    Renderbuffer: gen_renderbuffer, delete_renderbuffer, delete_renderbuffers;
    VertexArray: gen_vertex_array, delete_vertex_array, delete_vertex_arrays;
    Sampler: gen_sampler, delete_sampler, delete_samplers;
    TransformFeedback: gen_transform_feedback, delete_transform_feedback, delete_transform_feedbacks;
    ProgramPipeline: gen_program_pipeline, delete_program_pipeline, delete_program_pipelines;
}

impl DataProvider {
    /// A provider calling into the loaded OpenGL functions.
    pub fn new(capabilities: Rc<dyn Capabilities>) -> Self {
        Self::with_driver(capabilities, Rc::new(NativeGl))
    }

    pub fn with_driver(capabilities: Rc<dyn Capabilities>, driver: Rc<dyn GlDriver>) -> Self {
        Self {
            capabilities,
            driver,
            tracked: Default::default(),
        }
    }

    /// Uses the capability source linked to this thread with
    /// [`capabilities::link`].
    pub fn from_current_thread() -> Result<Self> {
        capabilities::current()
            .map(Self::new)
            .ok_or(ProviderError::NoCapabilities)
    }

    pub fn into_shared(self) -> SharedProvider {
        Rc::new(RefCell::new(self))
    }

    /// Makes `provider` the one [`get`](Self::get) returns on this thread,
    /// replacing any previous one.
    pub fn link(provider: &SharedProvider) {
        CURRENT.with_borrow_mut(|current| *current = Some(Rc::clone(provider)));
    }

    pub fn get() -> Option<SharedProvider> {
        CURRENT.with_borrow(Clone::clone)
    }

    pub fn unlink() -> Option<SharedProvider> {
        CURRENT.with_borrow_mut(Option::take)
    }

    pub fn capabilities(&self) -> &Rc<dyn Capabilities> {
        &self.capabilities
    }

    /// Names of `kind` generated through this provider and not yet deleted,
    /// oldest first.
    pub fn tracked(&self, kind: ResourceKind) -> &[GLuint] {
        &self.tracked[kind.index()]
    }

    /// Which entry point `object` would be created with right now.
    pub fn entry_point(&self, object: &NewObject<'_>) -> Result<EntryPoint> {
        self.select(object.kind(), object.dispatch())
    }

    fn select(&self, kind: ResourceKind, entry: DispatchEntry) -> Result<EntryPoint> {
        if self.capabilities.is_gl_version_supported(entry.min_core) {
            return Ok(EntryPoint::Core);
        }
        match entry.fallback {
            Some(ext) => {
                log::debug!(
                    "OpenGL {} unsupported, using {} for {kind}",
                    entry.min_core,
                    ext.name(),
                );
                Ok(EntryPoint::Arb)
            }
            None => Err(ProviderError::UnsupportedVersion {
                kind,
                required: entry.min_core,
            }),
        }
    }

    /// Creates a name without tracking it.
    pub fn generate_untracked(&self, object: NewObject<'_>) -> Result<GLuint> {
        let entry = self.entry_point(&object)?;
        Ok(self.driver.create(entry, &object))
    }

    /// Deletes a name whether or not this provider tracks it. Tracking is
    /// left alone.
    pub fn delete_untracked(&self, kind: ResourceKind, name: GLuint) -> Result<()> {
        let entry = self.select(kind, kind.dispatch())?;
        self.driver.delete(entry, kind, name);
        Ok(())
    }

    pub fn generate(&mut self, object: NewObject<'_>) -> Result<GLuint> {
        let name = self.generate_untracked(object)?;
        self.tracked[object.kind().index()].push(name);
        Ok(name)
    }

    /// Like [`generate`](Self::generate), also pushing the name into `out`.
    pub fn generate_into(
        &mut self,
        object: NewObject<'_>,
        out: &mut impl Extend<GLuint>,
    ) -> Result<GLuint> {
        let name = self.generate(object)?;
        out.extend([name]);
        Ok(name)
    }

    pub fn gen_shader(&mut self, stage: ShaderType) -> Result<GLuint> {
        self.generate(NewObject::Shader(stage))
    }

    /// Compiles and links a single-stage program from `sources` in one call.
    /// The result is tracked as a program.
    pub fn gen_shader_program(&mut self, stage: ShaderType, sources: &[&CStr]) -> Result<GLuint> {
        self.generate(NewObject::ShaderProgram { stage, sources })
    }

    pub fn delete_shader(&mut self, name: GLuint) -> Result<()> {
        self.delete(ResourceKind::Shader, name)
    }

    pub fn delete_shaders(&mut self) -> Result<()> {
        self.delete_all_of(ResourceKind::Shader)
    }

    /// Deletes `name` if this provider generated it and has not deleted it
    /// yet. Any other name is ignored.
    pub fn delete(&mut self, kind: ResourceKind, name: GLuint) -> Result<()> {
        let Some(index) = self.tracked[kind.index()].iter().position(|&n| n == name) else {
            log::trace!("ignoring delete of untracked {kind} {name}");
            return Ok(());
        };
        self.delete_untracked(kind, name)?;
        self.tracked[kind.index()].remove(index);
        Ok(())
    }

    /// Deletes every tracked name of `kind`. On error nothing is deleted and
    /// the names stay tracked.
    pub fn delete_all_of(&mut self, kind: ResourceKind) -> Result<()> {
        if self.tracked[kind.index()].is_empty() {
            return Ok(());
        }
        let entry = self.select(kind, kind.dispatch())?;
        for name in self.tracked[kind.index()].drain(..) {
            self.driver.delete(entry, kind, name);
        }
        Ok(())
    }

    /// Deletes every tracked name of every kind. Stops at the first kind that
    /// fails, leaving it and the kinds after it tracked.
    pub fn delete_all(&mut self) -> Result<()> {
        ResourceKind::ALL
            .into_iter()
            .try_for_each(|kind| self.delete_all_of(kind))
    }
}
