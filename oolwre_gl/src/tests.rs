use std::{
    cell::{Cell, RefCell},
    ffi::c_void,
    ptr,
    rc::Rc,
    thread,
};

use gl::types::{GLsizei, GLuint};
use pretty_assertions::assert_eq;

use crate::{
    arb::ArbFns, capabilities, Capabilities, ContextCapabilities, DataProvider, EntryPoint,
    FixedCapabilities, GlDriver, GlVersion, NativeGl, NewObject, ProviderError, ResourceKind,
    ShaderType, VersionParseError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Create(EntryPoint, ResourceKind),
    CreateShader(EntryPoint, ShaderType),
    CreateShaderProgram(EntryPoint, ShaderType, usize),
    Delete(EntryPoint, ResourceKind, GLuint),
}

#[derive(Default)]
struct MockDriver {
    last_name: Cell<GLuint>,
    calls: RefCell<Vec<Call>>,
}

impl MockDriver {
    fn take_calls(&self) -> Vec<Call> {
        self.calls.take()
    }
}

impl GlDriver for MockDriver {
    fn create(&self, entry: EntryPoint, object: &NewObject<'_>) -> GLuint {
        let call = match *object {
            NewObject::Shader(stage) => Call::CreateShader(entry, stage),
            NewObject::ShaderProgram { stage, sources } => {
                Call::CreateShaderProgram(entry, stage, sources.len())
            }
            _ => Call::Create(entry, object.kind()),
        };
        self.calls.borrow_mut().push(call);
        self.last_name.set(self.last_name.get() + 1);
        self.last_name.get()
    }

    fn delete(&self, entry: EntryPoint, kind: ResourceKind, name: GLuint) {
        self.calls
            .borrow_mut()
            .push(Call::Delete(entry, kind, name));
    }
}

/// A capability source whose reported version can change mid-test.
struct SwitchableCapabilities(Cell<GlVersion>);

impl Capabilities for SwitchableCapabilities {
    fn is_gl_version_supported(&self, version: GlVersion) -> bool {
        version <= self.0.get()
    }
}

fn provider_with(capabilities: Rc<dyn Capabilities>) -> (DataProvider, Rc<MockDriver>) {
    let driver = Rc::new(MockDriver::default());
    let provider = DataProvider::with_driver(capabilities, driver.clone());
    (provider, driver)
}

fn provider_at(max: GlVersion) -> (DataProvider, Rc<MockDriver>) {
    provider_with(Rc::new(FixedCapabilities::new(max)))
}

fn plain_kinds() -> impl Iterator<Item = (ResourceKind, NewObject<'static>)> {
    ResourceKind::ALL
        .into_iter()
        .filter_map(|kind| NewObject::plain(kind).map(|object| (kind, object)))
}

fn just_below(version: GlVersion) -> GlVersion {
    GlVersion::from_encoded(version.encoded() - 1).unwrap()
}

#[test]
fn generate_then_delete_every_kind() {
    let (mut provider, driver) = provider_at(GlVersion::V4_6);

    for (kind, object) in plain_kinds() {
        let name = provider.generate(object).unwrap();
        assert_eq!(provider.tracked(kind), &[name]);
        assert_eq!(driver.take_calls(), vec![Call::Create(EntryPoint::Core, kind)]);

        provider.delete(kind, name).unwrap();
        assert_eq!(provider.tracked(kind), &[] as &[GLuint]);
        assert_eq!(
            driver.take_calls(),
            vec![Call::Delete(EntryPoint::Core, kind, name)]
        );
    }

    let shader = provider.gen_shader(ShaderType::Vertex).unwrap();
    assert_eq!(provider.tracked(ResourceKind::Shader), &[shader]);
    provider.delete_shader(shader).unwrap();
    assert_eq!(
        driver.take_calls(),
        vec![
            Call::CreateShader(EntryPoint::Core, ShaderType::Vertex),
            Call::Delete(EntryPoint::Core, ResourceKind::Shader, shader),
        ]
    );
    assert!(provider.tracked(ResourceKind::Shader).is_empty());
}

#[test]
fn delete_only_touches_its_own_kind() {
    let (mut provider, driver) = provider_at(GlVersion::V4_6);

    let framebuffer = provider.gen_framebuffer().unwrap();
    let renderbuffer = provider.gen_renderbuffer().unwrap();
    let query = provider.gen_query().unwrap();
    let sampler = provider.gen_sampler().unwrap();
    let feedback = provider.gen_transform_feedback().unwrap();
    driver.take_calls();

    provider.delete_renderbuffer(renderbuffer).unwrap();
    provider.delete_sampler(sampler).unwrap();
    provider.delete_transform_feedback(feedback).unwrap();

    assert_eq!(provider.tracked(ResourceKind::Renderbuffer), &[] as &[GLuint]);
    assert_eq!(provider.tracked(ResourceKind::Sampler), &[] as &[GLuint]);
    assert_eq!(provider.tracked(ResourceKind::TransformFeedback), &[] as &[GLuint]);
    assert_eq!(provider.tracked(ResourceKind::Framebuffer), &[framebuffer]);
    assert_eq!(provider.tracked(ResourceKind::Query), &[query]);

    // A renderbuffer-kind delete of the framebuffer's name is not tracked.
    provider.delete_renderbuffer(framebuffer).unwrap();
    assert_eq!(provider.tracked(ResourceKind::Framebuffer), &[framebuffer]);
    assert_eq!(driver.take_calls().len(), 3);
}

#[test]
fn delete_all_of_kind_clears_list_once() {
    let (mut provider, driver) = provider_at(GlVersion::V4_6);

    let names: Vec<_> = (0..3).map(|_| provider.gen_buffer().unwrap()).collect();
    let other = provider.gen_texture().unwrap();
    driver.take_calls();

    provider.delete_buffers().unwrap();
    assert!(provider.tracked(ResourceKind::Buffer).is_empty());
    assert_eq!(
        driver.take_calls(),
        names
            .iter()
            .map(|&name| Call::Delete(EntryPoint::Core, ResourceKind::Buffer, name))
            .collect::<Vec<_>>()
    );
    assert_eq!(provider.tracked(ResourceKind::Texture), &[other]);

    provider.delete_buffers().unwrap();
    assert_eq!(driver.take_calls(), vec![]);
}

#[test]
fn unknown_or_repeated_delete_is_ignored() {
    let (mut provider, driver) = provider_at(GlVersion::V4_6);

    provider.delete_buffer(1234).unwrap();
    assert_eq!(driver.take_calls(), vec![]);

    let buffer = provider.gen_buffer().unwrap();
    provider.delete_buffer(buffer).unwrap();
    driver.take_calls();

    provider.delete_buffer(buffer).unwrap();
    assert_eq!(driver.take_calls(), vec![]);
}

#[test]
fn untracked_names_are_not_remembered() {
    let (mut provider, driver) = provider_at(GlVersion::V4_6);

    let buffer = provider.generate_untracked(NewObject::Buffer).unwrap();
    assert!(provider.tracked(ResourceKind::Buffer).is_empty());

    provider.delete_buffers().unwrap();
    provider.delete_buffer(buffer).unwrap();
    assert_eq!(driver.take_calls(), vec![Call::Create(EntryPoint::Core, ResourceKind::Buffer)]);

    provider
        .delete_untracked(ResourceKind::Buffer, buffer)
        .unwrap();
    assert_eq!(
        driver.take_calls(),
        vec![Call::Delete(EntryPoint::Core, ResourceKind::Buffer, buffer)]
    );
}

#[test]
fn entry_point_follows_minimum_version_per_kind() {
    for (kind, object) in plain_kinds() {
        let min = kind.dispatch().min_core;

        let (mut provider, driver) = provider_at(min);
        let name = provider.generate(object).unwrap();
        provider.delete(kind, name).unwrap();
        assert_eq!(
            driver.take_calls(),
            vec![
                Call::Create(EntryPoint::Core, kind),
                Call::Delete(EntryPoint::Core, kind, name),
            ],
            "{kind} at {min}"
        );

        if kind == ResourceKind::Texture {
            continue;
        }
        let below = just_below(min);
        let (mut provider, driver) = provider_at(below);
        let name = provider.generate(object).unwrap();
        provider.delete(kind, name).unwrap();
        assert_eq!(
            driver.take_calls(),
            vec![
                Call::Create(EntryPoint::Arb, kind),
                Call::Delete(EntryPoint::Arb, kind, name),
            ],
            "{kind} at {below}"
        );
    }
}

#[test]
fn textures_need_gl_1_1() {
    let capabilities = Rc::new(SwitchableCapabilities(Cell::new(GlVersion::new(1, 0))));
    let (mut provider, driver) = provider_with(capabilities.clone());

    let expected = ProviderError::UnsupportedVersion {
        kind: ResourceKind::Texture,
        required: GlVersion::V1_1,
    };
    assert_eq!(provider.gen_texture(), Err(expected));
    assert_eq!(
        provider.delete_untracked(ResourceKind::Texture, 7),
        Err(expected)
    );
    assert!(provider.tracked(ResourceKind::Texture).is_empty());
    assert_eq!(driver.take_calls(), vec![]);

    capabilities.0.set(GlVersion::V1_1);
    let texture = provider.gen_texture().unwrap();
    driver.take_calls();

    capabilities.0.set(GlVersion::new(1, 0));
    assert_eq!(provider.delete_texture(texture), Err(expected));
    assert_eq!(provider.delete_textures(), Err(expected));
    assert_eq!(provider.tracked(ResourceKind::Texture), &[texture]);
    assert_eq!(driver.take_calls(), vec![]);
}

#[test]
fn other_kinds_never_fail_on_old_contexts() {
    let (mut provider, _driver) = provider_at(GlVersion::new(1, 0));

    for (kind, object) in plain_kinds().filter(|(kind, _)| *kind != ResourceKind::Texture) {
        let name = provider.generate(object).unwrap();
        provider.delete(kind, name).unwrap();
    }
    provider.gen_shader(ShaderType::Fragment).unwrap();
    provider
        .gen_shader_program(ShaderType::Vertex, &[c"void main() {}"])
        .unwrap();
    provider.delete_all().unwrap();
}

#[test]
fn gl_1_5_context_uses_core_buffers_and_arb_framebuffers() {
    let (mut provider, driver) = provider_at(GlVersion::V1_5);

    provider.gen_buffer().unwrap();
    provider.gen_framebuffer().unwrap();
    assert_eq!(
        driver.take_calls(),
        vec![
            Call::Create(EntryPoint::Core, ResourceKind::Buffer),
            Call::Create(EntryPoint::Arb, ResourceKind::Framebuffer),
        ]
    );
}

#[test]
fn shader_programs_are_tracked_as_programs() {
    let (mut provider, driver) = provider_at(GlVersion::V3_3);

    let sources = [c"#version 330 core\n", c"void main() {}\n"];
    let program = provider
        .gen_shader_program(ShaderType::Fragment, &sources)
        .unwrap();
    assert_eq!(provider.tracked(ResourceKind::Program), &[program]);

    provider.delete_program(program).unwrap();
    assert_eq!(
        driver.take_calls(),
        vec![
            Call::CreateShaderProgram(EntryPoint::Arb, ShaderType::Fragment, 2),
            Call::Delete(EntryPoint::Core, ResourceKind::Program, program),
        ]
    );
}

#[test]
fn delete_all_goes_kind_by_kind() {
    let (mut provider, driver) = provider_at(GlVersion::V4_6);

    let mut created = Vec::new();
    for (kind, object) in plain_kinds().collect::<Vec<_>>().into_iter().rev() {
        created.push((kind, provider.generate(object).unwrap()));
    }
    created.push((
        ResourceKind::Shader,
        provider.gen_shader(ShaderType::Compute).unwrap(),
    ));
    driver.take_calls();

    provider.delete_all().unwrap();

    let expected: Vec<_> = ResourceKind::ALL
        .into_iter()
        .flat_map(|kind| {
            created
                .iter()
                .filter(move |(k, _)| *k == kind)
                .map(move |&(_, name)| Call::Delete(EntryPoint::Core, kind, name))
        })
        .collect();
    assert_eq!(driver.take_calls(), expected);
    for kind in ResourceKind::ALL {
        assert!(provider.tracked(kind).is_empty(), "{kind}");
    }

    provider.delete_all().unwrap();
    assert_eq!(driver.take_calls(), vec![]);
}

#[test]
fn delete_all_stops_at_failing_kind() {
    let capabilities = Rc::new(SwitchableCapabilities(Cell::new(GlVersion::V4_6)));
    let (mut provider, driver) = provider_with(capabilities.clone());

    let texture = provider.gen_texture().unwrap();
    let buffer = provider.gen_buffer().unwrap();
    driver.take_calls();

    capabilities.0.set(GlVersion::new(1, 0));
    assert!(matches!(
        provider.delete_all(),
        Err(ProviderError::UnsupportedVersion { .. })
    ));
    assert_eq!(provider.tracked(ResourceKind::Texture), &[texture]);
    assert_eq!(provider.tracked(ResourceKind::Buffer), &[buffer]);
    assert_eq!(driver.take_calls(), vec![]);
}

#[test]
fn generate_into_extends_buffer() {
    let (mut provider, _driver) = provider_at(GlVersion::V4_6);

    let mut names = vec![99];
    let first = provider
        .generate_into(NewObject::VertexArray, &mut names)
        .unwrap();
    let second = provider
        .generate_into(NewObject::VertexArray, &mut names)
        .unwrap();
    assert_eq!(names, vec![99, first, second]);
    assert_eq!(provider.tracked(ResourceKind::VertexArray), &[first, second]);
}

#[test]
fn link_then_get_on_same_thread() {
    let provider = DataProvider::with_driver(
        Rc::new(FixedCapabilities::new(GlVersion::V4_6)),
        Rc::new(MockDriver::default()),
    )
    .into_shared();

    DataProvider::link(&provider);
    let linked = DataProvider::get().unwrap();
    assert!(Rc::ptr_eq(&linked, &provider));

    let replacement = DataProvider::with_driver(
        Rc::new(FixedCapabilities::new(GlVersion::V2_0)),
        Rc::new(MockDriver::default()),
    )
    .into_shared();
    DataProvider::link(&replacement);
    assert!(Rc::ptr_eq(&DataProvider::get().unwrap(), &replacement));

    thread::spawn(|| assert!(DataProvider::get().is_none()))
        .join()
        .unwrap();

    assert!(DataProvider::unlink().is_some());
    assert!(DataProvider::get().is_none());
}

#[test]
fn provider_from_thread_capabilities() {
    thread::spawn(|| {
        assert!(matches!(
            DataProvider::from_current_thread(),
            Err(ProviderError::NoCapabilities)
        ));

        let linked: Rc<dyn Capabilities> = Rc::new(FixedCapabilities::new(GlVersion::V3_0));
        capabilities::link(linked.clone());
        let provider = DataProvider::from_current_thread().unwrap();
        assert!(Rc::ptr_eq(provider.capabilities(), &linked));

        assert!(capabilities::unlink().is_some());
        assert!(capabilities::current().is_none());
    })
    .join()
    .unwrap();
}

#[test]
fn version_encoding_and_order() {
    assert_eq!(GlVersion::V4_1.encoded(), 41);
    assert_eq!(GlVersion::from_encoded(33), Some(GlVersion::V3_3));
    assert_eq!(GlVersion::from_encoded(2559), Some(GlVersion::new(255, 9)));
    assert_eq!(GlVersion::from_encoded(2560), None);
    assert_eq!(GlVersion::from_encoded(u16::MAX), None);
    assert!(GlVersion::new(3, 3) < GlVersion::new(4, 0));
    assert!(GlVersion::new(1, 5) > GlVersion::new(1, 1));
    assert_eq!(GlVersion::V1_5.to_string(), "1.5");
}

#[test]
fn parse_version_strings() {
    let cases = [
        ("4.6.0 NVIDIA 550.54.14", GlVersion::V4_6),
        ("3.3 (Core Profile) Mesa 23.1.4", GlVersion::V3_3),
        ("OpenGL ES 3.2 v1.r32p1", GlVersion::new(3, 2)),
        ("2.1 INTEL-10.2.37", GlVersion::new(2, 1)),
    ];
    for (text, version) in cases {
        assert_eq!(GlVersion::parse(text), Ok(version), "{text}");
    }

    assert!(matches!(
        GlVersion::parse("no version here"),
        Err(VersionParseError::Missing(_))
    ));
    assert!(matches!(
        GlVersion::parse("4"),
        Err(VersionParseError::Missing(_))
    ));
    assert!(matches!(
        GlVersion::parse("4.10"),
        Err(VersionParseError::OutOfRange(_))
    ));
}

#[test]
fn context_capabilities_compare_against_reported_version() {
    let caps = ContextCapabilities::from_version_string("3.0 Mesa 21.0").unwrap();
    assert_eq!(caps.version(), GlVersion::V3_0);
    assert!(caps.is_gl_version_supported(GlVersion::V1_5));
    assert!(caps.is_gl_version_supported(GlVersion::V3_0));
    assert!(!caps.is_gl_version_supported(GlVersion::V3_3));
}

extern "system" fn fake_gen_buffers(n: GLsizei, names: *mut GLuint) {
    assert_eq!(n, 1);
    unsafe { *names = 77 };
}

#[test]
fn arb_table_maps_null_to_missing() {
    let fns = ArbFns::load_with(|_| ptr::null());
    let missing = fns.missing();
    assert_eq!(missing.len(), 20);
    assert!(missing.contains(&"glGenBuffersARB"));
    assert!(missing.contains(&"glCreateShaderProgramv"));
    assert_eq!(ArbFns::default().missing(), missing);
}

#[test]
fn arb_table_resolves_loaded_symbols() {
    let mut requested = Vec::new();
    let fns = ArbFns::load_with(|symbol| {
        requested.push(symbol);
        if symbol == "glGenBuffersARB" {
            fake_gen_buffers as extern "system" fn(GLsizei, *mut GLuint) as *const c_void
        } else {
            ptr::null()
        }
    });
    assert_eq!(requested.len(), 20);

    let missing = fns.missing();
    assert_eq!(missing.len(), 19);
    assert!(!missing.contains(&"glGenBuffersARB"));

    let mut name = 0;
    unsafe { fns.gen_buffers()(1, &mut name) };
    assert_eq!(name, 77);
    assert_eq!(crate::driver::gen_one_arb(fns.gen_buffers()), 77);
}

#[test]
#[should_panic(expected = "glDeleteBuffersARB was not loaded")]
fn unloaded_arb_symbol_panics_with_its_name() {
    let _ = ArbFns::EMPTY.delete_buffers();
}

#[test]
#[should_panic(expected = "textures have no ARB entry point")]
fn native_textures_have_no_arb_path() {
    NativeGl.create(EntryPoint::Arb, &NewObject::Texture);
}

#[cfg(feature = "glfw")]
mod window {
    use crate::glfw::window_title;

    #[test]
    fn title_is_passed_through() {
        assert_eq!(window_title("oolwre").unwrap().as_bytes(), b"oolwre");
    }

    #[test]
    fn title_with_nul_is_rejected() {
        let err = window_title("bad\0title").unwrap_err();
        assert!(err.to_string().contains("nul byte"), "{err}");
    }
}
