use std::{ffi::CStr, fmt};

use crate::{transmutable_u32, GlVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    Buffer,
    Query,
    Program,
    Shader,
    Framebuffer,
    Renderbuffer,
    VertexArray,
    Sampler,
    TransformFeedback,
    ProgramPipeline,
}

impl ResourceKind {
    pub const COUNT: usize = 11;

    /// Bulk deletion order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Texture,
        Self::Buffer,
        Self::Query,
        Self::Shader,
        Self::Program,
        Self::Framebuffer,
        Self::Renderbuffer,
        Self::VertexArray,
        Self::Sampler,
        Self::TransformFeedback,
        Self::ProgramPipeline,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Texture => "texture",
            Self::Buffer => "buffer",
            Self::Query => "query",
            Self::Program => "program",
            Self::Shader => "shader",
            Self::Framebuffer => "framebuffer",
            Self::Renderbuffer => "renderbuffer",
            Self::VertexArray => "vertex array",
            Self::Sampler => "sampler",
            Self::TransformFeedback => "transform feedback",
            Self::ProgramPipeline => "program pipeline",
        }
    }

    /// Dispatch row for creating and deleting names of this kind.
    pub const fn dispatch(self) -> DispatchEntry {
        use Extension as Ext;
        let (min_core, fallback) = match self {
            Self::Texture => (GlVersion::V1_1, None),
            Self::Buffer => (GlVersion::V1_5, Some(Ext::VertexBufferObject)),
            Self::Query => (GlVersion::V1_5, Some(Ext::OcclusionQuery)),
            Self::Program | Self::Shader => (GlVersion::V2_0, Some(Ext::ShaderObjects)),
            Self::Framebuffer | Self::Renderbuffer => {
                (GlVersion::V3_0, Some(Ext::FramebufferObject))
            }
            Self::VertexArray => (GlVersion::V3_0, Some(Ext::VertexArrayObject)),
            Self::Sampler => (GlVersion::V3_3, Some(Ext::SamplerObjects)),
            Self::TransformFeedback => (GlVersion::V4_0, Some(Ext::TransformFeedback2)),
            Self::ProgramPipeline => (GlVersion::V4_1, Some(Ext::SeparateShaderObjects)),
        };
        DispatchEntry { min_core, fallback }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// ARB extensions that stand in for a core entry point on older drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    VertexBufferObject,
    OcclusionQuery,
    ShaderObjects,
    FramebufferObject,
    VertexArrayObject,
    SamplerObjects,
    TransformFeedback2,
    SeparateShaderObjects,
}

impl Extension {
    pub const fn name(self) -> &'static str {
        match self {
            Self::VertexBufferObject => "GL_ARB_vertex_buffer_object",
            Self::OcclusionQuery => "GL_ARB_occlusion_query",
            Self::ShaderObjects => "GL_ARB_shader_objects",
            Self::FramebufferObject => "GL_ARB_framebuffer_object",
            Self::VertexArrayObject => "GL_ARB_vertex_array_object",
            Self::SamplerObjects => "GL_ARB_sampler_objects",
            Self::TransformFeedback2 => "GL_ARB_transform_feedback2",
            Self::SeparateShaderObjects => "GL_ARB_separate_shader_objects",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEntry {
    /// First version whose core API has the entry point.
    pub min_core: GlVersion,
    /// `None` when there is nothing to fall back to.
    pub fallback: Option<Extension>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    Core,
    Arb,
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderType {
    Compute = gl::COMPUTE_SHADER,
    Vertex = gl::VERTEX_SHADER,
    TessControl = gl::TESS_CONTROL_SHADER,
    TessEval = gl::TESS_EVALUATION_SHADER,
    Geometry = gl::GEOMETRY_SHADER,
    Fragment = gl::FRAGMENT_SHADER,
}
transmutable_u32!(ShaderType);

/// What to create. Most kinds need no arguments; shaders need their stage,
/// and a shader program is compiled and linked from sources in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewObject<'a> {
    Texture,
    Buffer,
    Query,
    Program,
    Shader(ShaderType),
    Framebuffer,
    Renderbuffer,
    VertexArray,
    Sampler,
    TransformFeedback,
    ProgramPipeline,
    ShaderProgram {
        stage: ShaderType,
        sources: &'a [&'a CStr],
    },
}

impl NewObject<'_> {
    /// The list the created name is tracked in. Shader programs are programs.
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Texture => ResourceKind::Texture,
            Self::Buffer => ResourceKind::Buffer,
            Self::Query => ResourceKind::Query,
            Self::Program | Self::ShaderProgram { .. } => ResourceKind::Program,
            Self::Shader(_) => ResourceKind::Shader,
            Self::Framebuffer => ResourceKind::Framebuffer,
            Self::Renderbuffer => ResourceKind::Renderbuffer,
            Self::VertexArray => ResourceKind::VertexArray,
            Self::Sampler => ResourceKind::Sampler,
            Self::TransformFeedback => ResourceKind::TransformFeedback,
            Self::ProgramPipeline => ResourceKind::ProgramPipeline,
        }
    }

    pub const fn dispatch(&self) -> DispatchEntry {
        match self {
            Self::ShaderProgram { .. } => DispatchEntry {
                min_core: GlVersion::V4_1,
                fallback: Some(Extension::SeparateShaderObjects),
            },
            other => other.kind().dispatch(),
        }
    }

    /// The plain creation request for `kind`, if it has one. Shaders need a
    /// stage and have none.
    pub const fn plain(kind: ResourceKind) -> Option<Self> {
        Some(match kind {
            ResourceKind::Texture => Self::Texture,
            ResourceKind::Buffer => Self::Buffer,
            ResourceKind::Query => Self::Query,
            ResourceKind::Program => Self::Program,
            ResourceKind::Shader => return None,
            ResourceKind::Framebuffer => Self::Framebuffer,
            ResourceKind::Renderbuffer => Self::Renderbuffer,
            ResourceKind::VertexArray => Self::VertexArray,
            ResourceKind::Sampler => Self::Sampler,
            ResourceKind::TransformFeedback => Self::TransformFeedback,
            ResourceKind::ProgramPipeline => Self::ProgramPipeline,
        })
    }
}
