use super::*;
use viewbind_model::listener::ON_TEXT_CHANGED;
use viewbind_model::{MethodBinding, Parameter, ResourceBinding, ResourceKind};

pub fn optional_watcher_with_resources() -> BindingGoldenCase {
    let mut builder = target_builder("Main", true, HostCategory::Activity);
    builder
        .add_field(
            r_ref("id", "title", 0x7f01_0001),
            field("title", "android.widget.TextView", true),
        )
        .unwrap();

    let text_changed = ON_TEXT_CHANGED.callback_by_constant("TEXT_CHANGED").unwrap();
    let on_search = MethodBinding::new(
        "onSearch",
        vec![Parameter::new(
            0,
            TypeName::best_guess("java.lang.CharSequence").unwrap(),
        )],
        false,
        false,
    );
    assert!(builder.add_method(
        r_ref("id", "search", 0x7f01_0002),
        &ON_TEXT_CHANGED,
        text_changed,
        on_search,
    ));

    builder.add_resource(ResourceBinding::new(
        r_ref("color", "accent", 0x7f03_0001),
        "accent",
        ResourceKind::Color,
    ));
    builder.add_resource(ResourceBinding::new(
        ResolvedId::Constant(3),
        "appName",
        ResourceKind::String,
    ));

    BindingGoldenCase {
        name: "text_watcher_activity",
        config: JavaCodeGenConfig::default(),
        set: builder.build(None),
        expected: include_str!("expected/text_watcher_activity.java"),
    }
}
