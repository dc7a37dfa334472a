//! Walks one round's annotated elements and gathers a binding builder per
//! enclosing class.

mod listeners;
mod resources;
mod views;

use crate::annotations::{supported_annotations, FieldAnnotation};
use crate::diagnostics::Diagnostics;
use crate::error::ProcessorError;
use crate::resolver::ResourceSymbols;
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};
use viewbind_elements::{
    ElementRef, IdValue, MemberKind, Modifier, RoundEnvironment, TypeDecl, TypeMirror,
    TypeUniverse,
};
use viewbind_model::{
    binding_class_name, ClassName, HostCategory, ListenerKind, QualifiedResourceRef, ResolvedId,
    TargetBindingSetBuilder, TypeName, VIEW_TYPE,
};

pub const ACTIVITY_TYPE: &str = "android.app.Activity";
pub const DIALOG_TYPE: &str = "android.app.Dialog";
const NULLABLE_ANNOTATION_NAME: &str = "Nullable";
const OPTIONAL_ANNOTATION_NAME: &str = "Optional";

/// Builders of one round, keyed by the qualified name of the enclosing class.
#[derive(Debug, Default)]
pub struct CollectedTargets {
    pub builders: IndexMap<String, TargetBindingSetBuilder>,
    /// Classes that received at least one accepted binding.
    pub erased_target_names: IndexSet<String>,
}

/// Mutable state of one collection pass. Dropped when the round ends.
pub(crate) struct RoundContext<'env> {
    universe: &'env TypeUniverse,
    symbols: ResourceSymbols,
    builders: IndexMap<String, TargetBindingSetBuilder>,
    erased_target_names: IndexSet<String>,
    diagnostics: Diagnostics,
}

/// Runs every field and listener annotation of the round through its validator.
pub fn collect_targets(
    env: &RoundEnvironment,
    listener_kinds: &[&'static ListenerKind],
) -> (CollectedTargets, Diagnostics) {
    let annotations = supported_annotations(listener_kinds);
    let mut context = RoundContext {
        universe: &env.universe,
        symbols: ResourceSymbols::scan_round(env, &annotations),
        builders: IndexMap::new(),
        erased_target_names: IndexSet::new(),
        diagnostics: Diagnostics::new(),
    };

    for annotation in FieldAnnotation::ALL {
        let name = annotation.simple_name();
        for element in env.universe.elements_annotated_with(name) {
            // Unresolved view types may still be generated by a later round.
            if !annotation.requires_view() && !is_superficially_valid(element) {
                trace!(element = %element.path(), annotation = name, "deferring element with unresolved types");
                continue;
            }
            let parsed = match annotation {
                FieldAnnotation::BindView => views::parse_bind_view(&mut context, element),
                FieldAnnotation::BindViews => views::parse_bind_views(&mut context, element),
                resource => resources::parse_resource(&mut context, resource, element),
            };
            if let Err(error) = parsed {
                context
                    .diagnostics
                    .error(&element.path(), format!("Unable to parse @{name} binding.\n\n{error}"));
            }
        }
    }

    for kind in listener_kinds {
        for element in env.universe.elements_annotated_with(kind.annotation) {
            if !is_superficially_valid(element) {
                trace!(element = %element.path(), annotation = kind.annotation, "deferring element with unresolved types");
                continue;
            }
            if let Err(error) = listeners::parse_listener(&mut context, kind, element) {
                context.diagnostics.error(
                    &element.path(),
                    format!("Unable to generate view binder for @{}.\n\n{error}", kind.annotation),
                );
            }
        }
    }

    debug!(
        targets = context.builders.len(),
        bound = context.erased_target_names.len(),
        diagnostics = context.diagnostics.len(),
        "collected binding targets"
    );
    let collected = CollectedTargets {
        builders: context.builders,
        erased_target_names: context.erased_target_names,
    };
    (collected, context.diagnostics)
}

impl<'env> RoundContext<'env> {
    pub(crate) fn universe(&self) -> &'env TypeUniverse {
        self.universe
    }

    pub(crate) fn diagnostics(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub(crate) fn resolve_id(&mut self, element: ElementRef<'_>, id: &IdValue) -> ResolvedId {
        self.symbols
            .resolve(QualifiedResourceRef::new(element.enclosing.package.clone(), id.value))
    }

    pub(crate) fn existing_builder(&self, enclosing: &TypeDecl) -> Option<&TargetBindingSetBuilder> {
        self.builders.get(&enclosing.name)
    }

    pub(crate) fn builder_for(
        &mut self,
        enclosing: &TypeDecl,
    ) -> Result<&mut TargetBindingSetBuilder, ProcessorError> {
        match self.builders.entry(enclosing.name.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(new_builder(self.universe, enclosing)?)),
        }
    }

    pub(crate) fn mark_bound(&mut self, enclosing: &TypeDecl) {
        self.erased_target_names.insert(enclosing.name.clone());
    }

    pub(crate) fn type_name(&self, ty: &TypeMirror) -> Result<TypeName, ProcessorError> {
        type_name(self.universe, ty)
    }
}

fn new_builder(
    universe: &TypeUniverse,
    enclosing: &TypeDecl,
) -> Result<TargetBindingSetBuilder, ProcessorError> {
    let simple_names = enclosing.simple_names();
    let target = ClassName::with_nested(
        enclosing.package.clone(),
        simple_names.iter().map(|name| name.to_string()).collect(),
    )?;
    let ty = enclosing.as_type();
    let category = if universe.is_subtype_of(&ty, VIEW_TYPE) {
        HostCategory::View
    } else if universe.is_subtype_of(&ty, ACTIVITY_TYPE) {
        HostCategory::Activity
    } else if universe.is_subtype_of(&ty, DIALOG_TYPE) {
        HostCategory::Dialog
    } else {
        HostCategory::Generic
    };
    trace!(target = %enclosing.name, ?category, "new binding target");
    Ok(TargetBindingSetBuilder::new(
        TypeName::class(target),
        binding_class_name(&enclosing.package, &simple_names),
        enclosing.has_modifier(Modifier::Final),
        category,
    ))
}

/// Converts an element type into its generated-code form. Type variables are
/// written as their bound.
pub(crate) fn type_name(universe: &TypeUniverse, ty: &TypeMirror) -> Result<TypeName, ProcessorError> {
    Ok(match ty {
        TypeMirror::Primitive(kind) => TypeName::Primitive(kind.keyword().to_string()),
        TypeMirror::Void => TypeName::Void,
        TypeMirror::Declared { name, args } => {
            let raw = class_name(universe, name)?;
            if args.is_empty() {
                TypeName::Class(raw)
            } else {
                TypeName::Parameterized {
                    raw,
                    args: args
                        .iter()
                        .map(|arg| type_name(universe, arg))
                        .collect::<Result<_, _>>()?,
                }
            }
        }
        TypeMirror::Array(component) => TypeName::Array(Box::new(type_name(universe, component)?)),
        TypeMirror::TypeVariable { upper_bound, .. } => type_name(universe, upper_bound)?,
        TypeMirror::Wildcard { extends } => TypeName::Wildcard(
            extends
                .as_deref()
                .map(|bound| type_name(universe, bound).map(Box::new))
                .transpose()?,
        ),
        TypeMirror::Error(name) => TypeName::Class(ClassName::best_guess(name)?),
    })
}

fn class_name(universe: &TypeUniverse, name: &str) -> Result<ClassName, ProcessorError> {
    match universe.get(name) {
        Some(decl) => Ok(ClassName::with_nested(
            decl.package.clone(),
            decl.simple_names().into_iter().map(str::to_string).collect(),
        )?),
        None => Ok(ClassName::best_guess(name)?),
    }
}

pub(crate) fn is_field_required(element: ElementRef<'_>) -> bool {
    !element.element.has_annotation(NULLABLE_ANNOTATION_NAME)
}

pub(crate) fn is_listener_required(element: ElementRef<'_>) -> bool {
    !element.element.has_annotation(OPTIONAL_ANNOTATION_NAME)
}

/// `(pkg.Type.member)`, the suffix every validation message carries.
pub(crate) fn location(element: ElementRef<'_>) -> String {
    format!("({}.{})", element.enclosing.name, element.element.name)
}

// Elements whose declared types are still unresolved are left for a later round.
fn is_superficially_valid(element: ElementRef<'_>) -> bool {
    match &element.element.kind {
        MemberKind::Field { ty } => !contains_error(ty),
        MemberKind::Method {
            return_type,
            parameters,
        } => !contains_error(return_type) && !parameters.iter().any(contains_error),
    }
}

fn contains_error(ty: &TypeMirror) -> bool {
    match ty {
        TypeMirror::Error(_) => true,
        TypeMirror::Declared { args, .. } => args.iter().any(contains_error),
        TypeMirror::Array(component) => contains_error(component),
        TypeMirror::TypeVariable { upper_bound, .. } => contains_error(upper_bound),
        TypeMirror::Wildcard { extends } => extends.as_deref().is_some_and(contains_error),
        TypeMirror::Primitive(_) | TypeMirror::Void => false,
    }
}
