use super::*;
use viewbind_model::listener::ON_CLICK;
use viewbind_model::MethodBinding;

/// A field and a click listener on the same id share one lookup.
pub fn field_and_click() -> BindingGoldenCase {
    let mut builder = target_builder("Test", false, HostCategory::Generic);
    builder
        .add_field(ResolvedId::Constant(1), field("x", "android.view.View", true))
        .unwrap();
    assert!(builder.add_method(
        ResolvedId::Constant(1),
        &ON_CLICK,
        &ON_CLICK.methods[0],
        MethodBinding::new("y", Vec::new(), true, false),
    ));

    BindingGoldenCase {
        name: "shared_lookup",
        config: JavaCodeGenConfig::default(),
        set: builder.build(None),
        expected: include_str!("expected/shared_lookup.java"),
    }
}
