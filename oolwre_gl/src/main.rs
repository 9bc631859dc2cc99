use std::rc::Rc;

use color_eyre::{eyre::OptionExt, Result as EyreResult};
use oolwre_gl::{
    arb, capabilities, gl,
    glfw::{self, Window},
    info::GlString,
    Capabilities, ContextCapabilities, DataProvider, FixedCapabilities, GlVersion, ResourceKind,
    ShaderType,
};

const VERTEX_SOURCE: &std::ffi::CStr = c"#version 410 core
out gl_PerVertex { vec4 gl_Position; };
void main() { gl_Position = vec4(0.0); }
";

/// `OOLWRE_GL_VERSION=3.0` pretends the context stops at 3.0, exercising the
/// ARB fallbacks for everything newer.
fn capabilities_for_context() -> EyreResult<Rc<dyn Capabilities>> {
    if let Ok(forced) = std::env::var("OOLWRE_GL_VERSION") {
        let version = GlVersion::parse(&forced)?;
        log::info!("capping reported OpenGL version at {version}");
        let capped: Rc<dyn Capabilities> = Rc::new(FixedCapabilities::new(version));
        return Ok(capped);
    }
    let queried: Rc<dyn Capabilities> = Rc::new(ContextCapabilities::query()?);
    Ok(queried)
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::init();

    glfw::install_errors();
    glfw::init().ok_or_eyre("glfw init failed")?;

    let window = Window::open(640, 480, "oolwre", None)?;
    window.make_current();

    gl::load_with(glfw::get_proc_address);
    arb::load_with(glfw::get_proc_address);

    if let Some(renderer) = GlString::Renderer.get_gl() {
        log::info!("renderer: {renderer}");
    }

    capabilities::link(capabilities_for_context()?);
    let provider = DataProvider::from_current_thread()?.into_shared();
    DataProvider::link(&provider);

    {
        let provider = DataProvider::get().ok_or_eyre("provider was just linked")?;
        let mut provider = provider.borrow_mut();
        for _ in 0..4 {
            provider.gen_buffer()?;
        }
        provider.gen_vertex_array()?;
        provider.gen_framebuffer()?;
        provider.gen_sampler()?;
        provider.gen_shader(ShaderType::Fragment)?;
        provider.gen_shader_program(ShaderType::Vertex, &[VERTEX_SOURCE])?;

        let texture = provider.gen_texture()?;
        provider.delete_texture(texture)?;

        for kind in ResourceKind::ALL {
            log::info!("{kind}: {:?}", provider.tracked(kind));
        }
    }

    while !window.should_close() {
        glfw::poll_events();
        window.present();
    }

    provider.borrow_mut().delete_all()?;
    DataProvider::unlink();
    capabilities::unlink();

    drop(window);
    glfw::terminate();
    Ok(())
}
