use super::*;
use viewbind_model::{
    ExternalParentInfo, ParentLink, ResourceBinding, ResourceKind, TypefaceStyle,
};

/// Resource-only custom view extending a companion compiled earlier.
pub fn sdk26_view() -> BindingGoldenCase {
    let mut builder = target_builder("Child", false, HostCategory::View);
    builder.add_resource(ResourceBinding::new(
        r_ref("font", "inter", 0x7f05_0000),
        "typeface",
        ResourceKind::Typeface {
            style: TypefaceStyle::Bold,
        },
    ));
    builder.add_resource(ResourceBinding::new(
        ResolvedId::reference(
            ClassName::new("android", "R").nested("drawable"),
            "ic_delete",
            0x0108_0038,
        ),
        "icon",
        ResourceKind::Drawable {
            tint: Some(r_ref("attr", "tint", 0x7f04_0001)),
        },
    ));
    builder.add_resource(ResourceBinding::new(
        r_ref("attr", "highlight", 0x7f04_0002),
        "highlight",
        ResourceKind::AttrColor,
    ));

    let parent = ParentLink::Classpath(ExternalParentInfo {
        binding_class: ClassName::new("lib", "Base_ViewBinding"),
        constructor_needs_view: false,
    });

    BindingGoldenCase {
        name: "resource_subclass_sdk26",
        config: JavaCodeGenConfig::for_platform(26, true),
        set: builder.build(Some(parent)),
        expected: include_str!("expected/resource_subclass.java"),
    }
}
