use viewbind_codegen_java::{BindingClassGenerator, JavaCodeGenConfig};
use viewbind_model::{
    binding_class_name, ClassName, FieldBinding, HostCategory, ResolvedId, TargetBindingSet,
    TargetBindingSetBuilder, TypeName,
};

pub mod resource_subclass;
pub mod shared_lookup;
pub mod text_watcher_activity;

#[derive(Debug)]
pub struct BindingGoldenCase {
    pub name: &'static str,
    pub config: JavaCodeGenConfig,
    pub set: TargetBindingSet,
    pub expected: &'static str,
}

pub fn run_case(case: BindingGoldenCase) {
    let BindingGoldenCase {
        name,
        config,
        set,
        expected,
    } = case;

    let generator = BindingClassGenerator::with_config(config);
    let rendered = generator
        .generate_source(&set)
        .unwrap_or_else(|err| panic!("failed to render {name}: {err}"));

    let actual = rendered.trim_end_matches('\n');
    let expected = expected.trim_end_matches('\n');

    assert_eq!(actual, expected, "golden mismatch for {name}");
}

pub(crate) fn target_builder(
    simple_name: &str,
    is_final: bool,
    category: HostCategory,
) -> TargetBindingSetBuilder {
    let target = TypeName::best_guess(&format!("test.{simple_name}")).unwrap();
    TargetBindingSetBuilder::new(
        target,
        binding_class_name("test", &[simple_name]),
        is_final,
        category,
    )
}

/// `test.R.<category>.<member>`.
pub(crate) fn r_ref(category: &str, member: &str, value: i32) -> ResolvedId {
    ResolvedId::reference(ClassName::new("test", "R").nested(category), member, value)
}

pub(crate) fn field(name: &str, ty: &str, required: bool) -> FieldBinding {
    FieldBinding::new(name, TypeName::best_guess(ty).unwrap(), required)
}
