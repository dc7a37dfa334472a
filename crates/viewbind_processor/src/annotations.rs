use viewbind_model::ListenerKind;

/// Field annotations, in the order a round processes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAnnotation {
    BindAnim,
    BindArray,
    BindAttr,
    BindBitmap,
    BindBool,
    BindColor,
    BindDimen,
    BindDrawable,
    BindFloat,
    BindFont,
    BindInt,
    BindString,
    BindView,
    BindViews,
}

impl FieldAnnotation {
    pub const ALL: [FieldAnnotation; 14] = [
        FieldAnnotation::BindAnim,
        FieldAnnotation::BindArray,
        FieldAnnotation::BindAttr,
        FieldAnnotation::BindBitmap,
        FieldAnnotation::BindBool,
        FieldAnnotation::BindColor,
        FieldAnnotation::BindDimen,
        FieldAnnotation::BindDrawable,
        FieldAnnotation::BindFloat,
        FieldAnnotation::BindFont,
        FieldAnnotation::BindInt,
        FieldAnnotation::BindString,
        FieldAnnotation::BindView,
        FieldAnnotation::BindViews,
    ];

    pub fn simple_name(self) -> &'static str {
        match self {
            FieldAnnotation::BindAnim => "BindAnim",
            FieldAnnotation::BindArray => "BindArray",
            FieldAnnotation::BindAttr => "BindAttr",
            FieldAnnotation::BindBitmap => "BindBitmap",
            FieldAnnotation::BindBool => "BindBool",
            FieldAnnotation::BindColor => "BindColor",
            FieldAnnotation::BindDimen => "BindDimen",
            FieldAnnotation::BindDrawable => "BindDrawable",
            FieldAnnotation::BindFloat => "BindFloat",
            FieldAnnotation::BindFont => "BindFont",
            FieldAnnotation::BindInt => "BindInt",
            FieldAnnotation::BindString => "BindString",
            FieldAnnotation::BindView => "BindView",
            FieldAnnotation::BindViews => "BindViews",
        }
    }

    /// View bindings force the companion's constructor to take a `View`.
    pub fn requires_view(self) -> bool {
        matches!(self, FieldAnnotation::BindView | FieldAnnotation::BindViews)
    }
}

/// Simple names of every annotation the processor claims, fields first.
pub fn supported_annotations(listener_kinds: &[&'static ListenerKind]) -> Vec<&'static str> {
    FieldAnnotation::ALL
        .iter()
        .map(|annotation| annotation.simple_name())
        .chain(listener_kinds.iter().map(|kind| kind.annotation))
        .collect()
}

/// Whether an annotation on an ancestor makes its companion constructor take a `View`.
pub fn requires_view_in_constructor(
    simple_name: &str,
    listener_kinds: &[&'static ListenerKind],
) -> bool {
    FieldAnnotation::ALL
        .iter()
        .any(|annotation| annotation.requires_view() && annotation.simple_name() == simple_name)
        || listener_kinds.iter().any(|kind| kind.annotation == simple_name)
}

/// A supported annotation that binds without a view hierarchy.
pub fn is_resource_annotation(simple_name: &str) -> bool {
    FieldAnnotation::ALL
        .iter()
        .any(|annotation| !annotation.requires_view() && annotation.simple_name() == simple_name)
}
