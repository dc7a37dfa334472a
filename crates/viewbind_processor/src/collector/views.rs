use super::{is_field_required, location, RoundContext};
use crate::checks::{find_duplicate, is_in_wrong_package, is_inaccessible};
use crate::error::ProcessorError;
use viewbind_elements::{ElementRef, MemberKind, TypeMirror};
use viewbind_model::{CollectionBinding, CollectionKind, FieldBinding, VIEW_TYPE};

const LIST_TYPE: &str = "java.util.List";

fn field_type<'a>(annotation: &str, element: ElementRef<'a>) -> Result<&'a TypeMirror, ProcessorError> {
    match &element.element.kind {
        MemberKind::Field { ty } => Ok(ty),
        MemberKind::Method { .. } => Err(ProcessorError::WrongElementKind {
            annotation: annotation.to_string(),
            expected: "field",
        }),
    }
}

pub(super) fn parse_bind_view(
    context: &mut RoundContext<'_>,
    element: ElementRef<'_>,
) -> Result<(), ProcessorError> {
    const ANNOTATION: &str = "BindView";
    let declared = field_type(ANNOTATION, element)?;
    let enclosing = element.enclosing;
    let location = location(element);

    let mut has_error = is_inaccessible(context.diagnostics(), ANNOTATION, "fields", element);
    has_error |= is_in_wrong_package(context.diagnostics(), ANNOTATION, element);

    let element_type = declared.upper_bound();
    let universe = context.universe();
    if !universe.is_subtype_of(element_type, VIEW_TYPE) && !universe.is_interface(element_type) {
        if element_type.is_error() {
            context.diagnostics().note(
                &element.path(),
                format!(
                    "@{ANNOTATION} field with unresolved type ({element_type}) must elsewhere be generated as a View or interface. {location}"
                ),
            );
        } else {
            context.diagnostics().error(
                &element.path(),
                format!("@{ANNOTATION} fields must extend from View or be an interface. {location}"),
            );
            has_error = true;
        }
    }

    if has_error {
        return Ok(());
    }

    let id = element
        .element
        .annotation(ANNOTATION)
        .and_then(|mirror| mirror.id("value"))
        .ok_or(ProcessorError::MissingValue {
            annotation: ANNOTATION.to_string(),
            key: "value",
        })?;
    let resource_id = context.resolve_id(element, id);

    if let Some(existing) = context
        .existing_builder(enclosing)
        .and_then(|builder| builder.field_binding_name(&resource_id))
        .map(str::to_string)
    {
        context.diagnostics().error(
            &element.path(),
            format!(
                "Attempt to use @{ANNOTATION} for an already bound ID {} on '{existing}'. {location}",
                id.value
            ),
        );
        return Ok(());
    }

    let binding = FieldBinding::new(
        element.element.name.clone(),
        context.type_name(element_type)?,
        is_field_required(element),
    );
    context.builder_for(enclosing)?.add_field(resource_id, binding)?;
    context.mark_bound(enclosing);
    Ok(())
}

pub(super) fn parse_bind_views(
    context: &mut RoundContext<'_>,
    element: ElementRef<'_>,
) -> Result<(), ProcessorError> {
    const ANNOTATION: &str = "BindViews";
    let declared = field_type(ANNOTATION, element)?;
    let enclosing = element.enclosing;
    let location = location(element);

    let mut has_error = is_inaccessible(context.diagnostics(), ANNOTATION, "fields", element);
    has_error |= is_in_wrong_package(context.diagnostics(), ANNOTATION, element);

    let mut view_type = None;
    let mut kind = None;
    match declared {
        TypeMirror::Array(component) => {
            view_type = Some(component.as_ref());
            kind = Some(CollectionKind::Array);
        }
        TypeMirror::Declared { name, args } if name == LIST_TYPE => {
            if let [component] = args.as_slice() {
                view_type = Some(component);
            } else {
                context.diagnostics().error(
                    &element.path(),
                    format!("@{ANNOTATION} List must have a generic component. {location}"),
                );
                has_error = true;
            }
            kind = Some(CollectionKind::List);
        }
        _ => {
            context.diagnostics().error(
                &element.path(),
                format!("@{ANNOTATION} must be a List or array. {location}"),
            );
            has_error = true;
        }
    }
    let view_type = view_type.map(TypeMirror::upper_bound);

    if let Some(view_type) = view_type {
        let universe = context.universe();
        if !universe.is_subtype_of(view_type, VIEW_TYPE) && !universe.is_interface(view_type) {
            if view_type.is_error() {
                context.diagnostics().note(
                    &element.path(),
                    format!(
                        "@{ANNOTATION} List or array with unresolved type ({view_type}) must elsewhere be generated as a View or interface. {location}"
                    ),
                );
            } else {
                context.diagnostics().error(
                    &element.path(),
                    format!(
                        "@{ANNOTATION} List or array type must extend from View or be an interface. {location}"
                    ),
                );
                has_error = true;
            }
        }
    }

    let ids = element
        .element
        .annotation(ANNOTATION)
        .map(|mirror| mirror.ids("value"))
        .unwrap_or_default();
    if ids.is_empty() {
        context.diagnostics().error(
            &element.path(),
            format!("@{ANNOTATION} must specify at least one ID. {location}"),
        );
        has_error = true;
    }

    let values: Vec<i32> = ids.iter().map(|id| id.value).collect();
    if let Some(duplicate) = find_duplicate(&values) {
        context.diagnostics().error(
            &element.path(),
            format!("@{ANNOTATION} annotation contains duplicate ID {duplicate}. {location}"),
        );
        has_error = true;
    }

    if has_error {
        return Ok(());
    }
    let (Some(view_type), Some(kind)) = (view_type, kind) else {
        return Ok(());
    };

    let resolved = ids.iter().map(|id| context.resolve_id(element, id)).collect();
    let binding = CollectionBinding {
        name: element.element.name.clone(),
        element_type: context.type_name(view_type)?,
        kind,
        required: is_field_required(element),
        ids: resolved,
    };
    context.builder_for(enclosing)?.add_collection(binding);
    context.mark_bound(enclosing);
    Ok(())
}
