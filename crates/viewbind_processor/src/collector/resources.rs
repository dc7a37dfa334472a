use super::{location, RoundContext};
use crate::annotations::FieldAnnotation;
use crate::checks::{is_in_wrong_package, is_inaccessible};
use crate::error::ProcessorError;
use viewbind_elements::{AnnotationValue, ElementRef, MemberKind, PrimitiveKind, TypeMirror};
use viewbind_model::{ResourceBinding, ResourceKind, TypefaceStyle};

const ANIMATION_TYPE: &str = "android.view.animation.Animation";
const BITMAP_TYPE: &str = "android.graphics.Bitmap";
const COLOR_STATE_LIST_TYPE: &str = "android.content.res.ColorStateList";
const DRAWABLE_TYPE: &str = "android.graphics.drawable.Drawable";
const STRING_TYPE: &str = "java.lang.String";
const CHAR_SEQUENCE_TYPE: &str = "java.lang.CharSequence";
const TYPED_ARRAY_TYPE: &str = "android.content.res.TypedArray";
const TYPEFACE_TYPE: &str = "android.graphics.Typeface";

/// How a resource field is loaded, before its ids are resolved.
enum Shape {
    Plain(ResourceKind),
    Drawable,
    Typeface,
}

/// The field type a resource annotation accepts, or the expectation to report.
fn classify(annotation: FieldAnnotation, ty: &TypeMirror) -> Result<Shape, String> {
    let rendered = ty.to_string();
    let is = |kind: PrimitiveKind| ty.is_primitive(kind);
    let shape = match annotation {
        FieldAnnotation::BindAnim if rendered == ANIMATION_TYPE => Shape::Plain(ResourceKind::Animation),
        FieldAnnotation::BindAnim => return Err("'Animation'".into()),
        FieldAnnotation::BindArray => match array_kind(ty) {
            Some(kind) => Shape::Plain(kind),
            None => return Err(format!("one of: String[], int[], CharSequence[], {TYPED_ARRAY_TYPE}")),
        },
        FieldAnnotation::BindAttr if is(PrimitiveKind::Int) => Shape::Plain(ResourceKind::AttrColor),
        FieldAnnotation::BindAttr if rendered == COLOR_STATE_LIST_TYPE => {
            Shape::Plain(ResourceKind::AttrColorStateList)
        }
        FieldAnnotation::BindAttr => return Err("'int' or 'ColorStateList'".into()),
        FieldAnnotation::BindBitmap if rendered == BITMAP_TYPE => Shape::Plain(ResourceKind::Bitmap),
        FieldAnnotation::BindBitmap => return Err("'Bitmap'".into()),
        FieldAnnotation::BindBool if is(PrimitiveKind::Boolean) => Shape::Plain(ResourceKind::Bool),
        FieldAnnotation::BindBool => return Err("'boolean'".into()),
        FieldAnnotation::BindColor if rendered == COLOR_STATE_LIST_TYPE => {
            Shape::Plain(ResourceKind::ColorStateList)
        }
        FieldAnnotation::BindColor if is(PrimitiveKind::Int) => Shape::Plain(ResourceKind::Color),
        FieldAnnotation::BindColor => return Err("'int' or 'ColorStateList'".into()),
        FieldAnnotation::BindDimen if is(PrimitiveKind::Int) => Shape::Plain(ResourceKind::DimenAsInt),
        FieldAnnotation::BindDimen if is(PrimitiveKind::Float) => Shape::Plain(ResourceKind::DimenAsFloat),
        FieldAnnotation::BindDimen => return Err("'int' or 'float'".into()),
        FieldAnnotation::BindDrawable if rendered == DRAWABLE_TYPE => Shape::Drawable,
        FieldAnnotation::BindDrawable => return Err("'Drawable'".into()),
        FieldAnnotation::BindFloat if is(PrimitiveKind::Float) => Shape::Plain(ResourceKind::Float),
        FieldAnnotation::BindFloat => return Err("'float'".into()),
        FieldAnnotation::BindFont if rendered == TYPEFACE_TYPE => Shape::Typeface,
        FieldAnnotation::BindFont => return Err("'Typeface'".into()),
        FieldAnnotation::BindInt if is(PrimitiveKind::Int) => Shape::Plain(ResourceKind::Int),
        FieldAnnotation::BindInt => return Err("'int'".into()),
        FieldAnnotation::BindString if rendered == STRING_TYPE => Shape::Plain(ResourceKind::String),
        FieldAnnotation::BindString => return Err("'String'".into()),
        FieldAnnotation::BindView | FieldAnnotation::BindViews => {
            return Err("a resource type".into());
        }
    };
    Ok(shape)
}

fn array_kind(ty: &TypeMirror) -> Option<ResourceKind> {
    if ty.to_string() == TYPED_ARRAY_TYPE {
        return Some(ResourceKind::TypedArray);
    }
    let TypeMirror::Array(component) = ty else {
        return None;
    };
    match component.to_string().as_str() {
        STRING_TYPE => Some(ResourceKind::StringArray),
        "int" => Some(ResourceKind::IntArray),
        CHAR_SEQUENCE_TYPE => Some(ResourceKind::TextArray),
        _ => None,
    }
}

/// Reads `@BindFont(style = ...)`, written either as a constant name or as the
/// `Typeface` integer value. Absent means `NORMAL`.
fn typeface_style(value: Option<&AnnotationValue>) -> Option<TypefaceStyle> {
    match value {
        None => Some(TypefaceStyle::Normal),
        Some(AnnotationValue::Text(name)) => {
            let constant = name.rsplit('.').next().unwrap_or(name);
            TypefaceStyle::from_constant(constant).ok()
        }
        Some(AnnotationValue::Id(id)) => match id.value {
            0 => Some(TypefaceStyle::Normal),
            1 => Some(TypefaceStyle::Bold),
            2 => Some(TypefaceStyle::Italic),
            3 => Some(TypefaceStyle::BoldItalic),
            _ => None,
        },
        Some(_) => None,
    }
}

pub(super) fn parse_resource(
    context: &mut RoundContext<'_>,
    annotation: FieldAnnotation,
    element: ElementRef<'_>,
) -> Result<(), ProcessorError> {
    let name = annotation.simple_name();
    let MemberKind::Field { ty } = &element.element.kind else {
        return Err(ProcessorError::WrongElementKind {
            annotation: name.to_string(),
            expected: "field",
        });
    };
    let location = location(element);
    let mirror = element
        .element
        .annotation(name)
        .ok_or(ProcessorError::MissingValue {
            annotation: name.to_string(),
            key: "value",
        })?;

    let mut has_error = false;
    let shape = match classify(annotation, ty) {
        Ok(shape) => Some(shape),
        Err(expected) => {
            context.diagnostics().error(
                &element.path(),
                format!("@{name} field type must be {expected}. {location}"),
            );
            has_error = true;
            None
        }
    };

    has_error |= is_inaccessible(context.diagnostics(), name, "fields", element);
    has_error |= is_in_wrong_package(context.diagnostics(), name, element);

    let mut style = TypefaceStyle::Normal;
    if annotation == FieldAnnotation::BindFont {
        match typeface_style(mirror.value("style")) {
            Some(parsed) => style = parsed,
            None => {
                context.diagnostics().error(
                    &element.path(),
                    format!("@{name} style must be NORMAL, BOLD, ITALIC, or BOLD_ITALIC. {location}"),
                );
                has_error = true;
            }
        }
    }

    let Some(shape) = shape.filter(|_| !has_error) else {
        return Ok(());
    };

    let id = mirror.id("value").ok_or(ProcessorError::MissingValue {
        annotation: name.to_string(),
        key: "value",
    })?;
    let resource_id = context.resolve_id(element, id);
    let kind = match shape {
        Shape::Plain(kind) => kind,
        Shape::Drawable => {
            let tint = mirror
                .id("tint")
                .filter(|tint| tint.value != 0)
                .map(|tint| context.resolve_id(element, tint));
            ResourceKind::Drawable { tint }
        }
        Shape::Typeface => ResourceKind::Typeface { style },
    };

    let binding = ResourceBinding::new(resource_id, element.element.name.clone(), kind);
    context.builder_for(element.enclosing)?.add_resource(binding);
    context.mark_bound(element.enclosing);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use viewbind_elements::IdValue;

    fn parse(ty: &str) -> TypeMirror {
        TypeMirror::parse(ty).unwrap()
    }

    #[test_case(FieldAnnotation::BindBool, "boolean", ResourceKind::Bool ; "bool")]
    #[test_case(FieldAnnotation::BindColor, "int", ResourceKind::Color ; "color")]
    #[test_case(FieldAnnotation::BindColor, COLOR_STATE_LIST_TYPE, ResourceKind::ColorStateList ; "color state list")]
    #[test_case(FieldAnnotation::BindDimen, "float", ResourceKind::DimenAsFloat ; "dimen float")]
    #[test_case(FieldAnnotation::BindArray, "java.lang.CharSequence[]", ResourceKind::TextArray ; "text array")]
    #[test_case(FieldAnnotation::BindArray, TYPED_ARRAY_TYPE, ResourceKind::TypedArray ; "typed array")]
    #[test_case(FieldAnnotation::BindAttr, "int", ResourceKind::AttrColor ; "attr color")]
    fn accepted_field_types(annotation: FieldAnnotation, ty: &str, expected: ResourceKind) {
        match classify(annotation, &parse(ty)) {
            Ok(Shape::Plain(kind)) => assert_eq!(kind, expected),
            _ => panic!("{ty} should be accepted"),
        }
    }

    #[test_case(FieldAnnotation::BindBool, "int", "'boolean'" ; "bool")]
    #[test_case(FieldAnnotation::BindDimen, "long", "'int' or 'float'" ; "dimen")]
    #[test_case(FieldAnnotation::BindArray, "long[]", "one of: String[], int[], CharSequence[], android.content.res.TypedArray" ; "array")]
    #[test_case(FieldAnnotation::BindDrawable, BITMAP_TYPE, "'Drawable'" ; "drawable")]
    fn rejected_field_types(annotation: FieldAnnotation, ty: &str, expected: &str) {
        match classify(annotation, &parse(ty)) {
            Err(message) => assert_eq!(message, expected),
            Ok(_) => panic!("{ty} should be rejected"),
        }
    }

    #[test]
    fn font_style_accepts_names_and_values() {
        let bold = AnnotationValue::Text("Typeface.BOLD".to_string());
        assert_eq!(typeface_style(Some(&bold)), Some(TypefaceStyle::Bold));
        let italic = AnnotationValue::Id(IdValue::literal(2));
        assert_eq!(typeface_style(Some(&italic)), Some(TypefaceStyle::Italic));
        let invalid = AnnotationValue::Id(IdValue::literal(7));
        assert_eq!(typeface_style(Some(&invalid)), None);
        assert_eq!(typeface_style(None), Some(TypefaceStyle::Normal));
    }
}
