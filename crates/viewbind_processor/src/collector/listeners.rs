use super::{is_listener_required, location, RoundContext};
use crate::checks::{find_duplicate, is_in_wrong_package, is_inaccessible};
use crate::error::ProcessorError;
use viewbind_elements::{ElementRef, IdValue, MemberKind, TypeMirror, TypeUniverse};
use viewbind_model::{
    ListenerCallback, ListenerKind, MethodBinding, Parameter, NO_ID, VIEW_TYPE,
};

/// Picks the callback an annotation binds to: the kind's single method, or the
/// constant named by the annotation's `callback` value.
fn select_callback(
    kind: &'static ListenerKind,
    requested: Option<&str>,
) -> Result<&'static ListenerCallback, ProcessorError> {
    let annotation = kind.annotation.to_string();
    match kind.methods {
        [] => {
            let constant = requested
                .map(|text| text.rsplit('.').next().unwrap_or(text))
                .or(kind.default_callback)
                .ok_or_else(|| ProcessorError::MissingValue {
                    annotation: annotation.clone(),
                    key: "callback",
                })?;
            kind.callback_by_constant(constant)
                .ok_or_else(|| ProcessorError::UnknownCallback {
                    annotation,
                    callback: constant.to_string(),
                })
        }
        [method] if kind.callbacks.is_empty() => Ok(method),
        [_] => Err(ProcessorError::MethodAndCallback { annotation }),
        _ => Err(ProcessorError::MultipleListenerMethods { annotation }),
    }
}

/// Whether a method parameter of type `ty` can receive the callback argument
/// declared as `callback_type`.
fn is_assignable(universe: &TypeUniverse, ty: &TypeMirror, callback_type: &str) -> bool {
    (universe.is_subtype_of(ty, callback_type) && universe.is_subtype_of(ty, VIEW_TYPE))
        || ty.to_string() == callback_type
        || universe.is_interface(ty)
}

/// Matches method parameters to callback parameters, each callback parameter
/// used at most once. Fails with the full mismatch description.
fn match_parameters(
    context: &RoundContext<'_>,
    annotation: &str,
    element: ElementRef<'_>,
    parameters: &[TypeMirror],
    callback: &ListenerCallback,
) -> Result<Result<Vec<Parameter>, String>, ProcessorError> {
    let universe = context.universe();
    let mut matched: Vec<Option<Parameter>> = vec![None; parameters.len()];
    let mut used = vec![false; callback.parameters.len()];

    for (index, parameter) in parameters.iter().enumerate() {
        let ty = parameter.upper_bound();
        let position = callback
            .parameters
            .iter()
            .enumerate()
            .find(|(position, callback_type)| !used[*position] && is_assignable(universe, ty, callback_type))
            .map(|(position, _)| position);

        match position {
            Some(position) => {
                used[position] = true;
                matched[index] = Some(Parameter::new(position, context.type_name(ty)?));
            }
            None => {
                return Ok(Err(mismatch_message(
                    annotation, element, parameters, &matched, callback,
                )));
            }
        }
    }
    Ok(Ok(matched.into_iter().flatten().collect()))
}

fn mismatch_message(
    annotation: &str,
    element: ElementRef<'_>,
    parameters: &[TypeMirror],
    matched: &[Option<Parameter>],
    callback: &ListenerCallback,
) -> String {
    let mut message = format!(
        "Unable to match @{annotation} method arguments. {}",
        location(element)
    );
    for (index, (parameter, found)) in parameters.iter().zip(matched).enumerate() {
        message.push_str(&format!("\n\n  Parameter #{}: {parameter}\n    ", index + 1));
        match found {
            None => message.push_str("did not match any listener parameters"),
            Some(found) => message.push_str(&format!(
                "matched listener parameter #{}: {}",
                found.listener_position + 1,
                found.ty
            )),
        }
    }
    message.push_str(&format!(
        "\n\nMethods may have up to {} parameter(s):\n",
        callback.parameters.len()
    ));
    for parameter in callback.parameters {
        message.push_str(&format!("\n  {parameter}"));
    }
    message.push_str("\n\nThese may be listed in any order but will be searched for from top to bottom.");
    message
}

pub(super) fn parse_listener(
    context: &mut RoundContext<'_>,
    kind: &'static ListenerKind,
    element: ElementRef<'_>,
) -> Result<(), ProcessorError> {
    let annotation = kind.annotation;
    let MemberKind::Method {
        return_type,
        parameters,
    } = &element.element.kind
    else {
        return Err(ProcessorError::WrongElementKind {
            annotation: annotation.to_string(),
            expected: "method",
        });
    };
    let enclosing = element.enclosing;
    let location = location(element);
    let mirror = element
        .element
        .annotation(annotation)
        .ok_or(ProcessorError::MissingValue {
            annotation: annotation.to_string(),
            key: "value",
        })?;

    let mut ids = mirror.ids("value");
    if ids.is_empty() {
        ids.push(IdValue::literal(NO_ID));
    }
    let required = is_listener_required(element);

    let mut has_error = is_inaccessible(context.diagnostics(), annotation, "methods", element);
    has_error |= is_in_wrong_package(context.diagnostics(), annotation, element);

    let values: Vec<i32> = ids.iter().map(|id| id.value).collect();
    if let Some(duplicate) = find_duplicate(&values) {
        context.diagnostics().error(
            &element.path(),
            format!("@{annotation} annotation for method contains duplicate ID {duplicate}. {location}"),
        );
        has_error = true;
    }

    for value in values.iter().filter(|value| **value == NO_ID) {
        if values.len() == 1 {
            if !required {
                context.diagnostics().error(
                    &element.path(),
                    format!("ID-free binding must not be annotated with @Optional. {location}"),
                );
                has_error = true;
            }
        } else {
            context.diagnostics().error(
                &element.path(),
                format!("@{annotation} annotation contains invalid ID {value}. {location}"),
            );
            has_error = true;
        }
    }

    let callback = select_callback(kind, mirror.text("callback"))?;

    if parameters.len() > callback.parameters.len() {
        context.diagnostics().error(
            &element.path(),
            format!(
                "@{annotation} methods can have at most {} parameter(s). {location}",
                callback.parameters.len()
            ),
        );
        has_error = true;
    }

    let return_type = return_type.upper_bound().to_string();
    let has_return_value = return_type != "void";
    if has_return_value && return_type != callback.return_type {
        context.diagnostics().error(
            &element.path(),
            format!(
                "@{annotation} methods must have a '{}' return type. {location}",
                callback.return_type
            ),
        );
        has_error = true;
    }

    if has_error {
        return Ok(());
    }

    let matched = match match_parameters(context, annotation, element, parameters, callback)? {
        Ok(matched) => matched,
        Err(message) => {
            context.diagnostics().error(&element.path(), message);
            return Ok(());
        }
    };

    let binding = MethodBinding::new(element.element.name.clone(), matched, required, has_return_value);
    let resolved: Vec<_> = ids
        .iter()
        .map(|id| (id.value, context.resolve_id(element, id)))
        .collect();
    let builder = context.builder_for(enclosing)?;
    let rejected = resolved
        .into_iter()
        .find(|(_, id)| !builder.add_method(id.clone(), kind, callback, binding.clone()))
        .map(|(value, _)| value);
    if let Some(value) = rejected {
        context.diagnostics().error(
            &element.path(),
            format!("Multiple listener methods with return value specified for ID {value}. {location}"),
        );
        return Ok(());
    }

    context.mark_bound(enclosing);
    Ok(())
}
