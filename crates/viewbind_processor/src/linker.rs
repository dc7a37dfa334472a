//! Connects each collected target to the companion of its nearest bound
//! ancestor and freezes the builders.

use crate::annotations::{is_resource_annotation, requires_view_in_constructor};
use crate::collector::CollectedTargets;
use crate::error::ProcessorError;
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;
use tracing::{debug, trace};
use viewbind_elements::{Origin, TypeDecl, TypeUniverse};
use viewbind_model::{
    binding_class_name, ExternalParentInfo, ListenerKind, ParentLink, TargetBindingSet,
    TargetBindingSetBuilder,
};

/// Frozen binding sets keyed by target class, in the order they were frozen.
pub type LinkedTargets = IndexMap<String, TargetBindingSet>;

pub fn link_targets(
    universe: &TypeUniverse,
    collected: CollectedTargets,
    listener_kinds: &[&'static ListenerKind],
) -> Result<LinkedTargets, ProcessorError> {
    let CollectedTargets {
        builders,
        erased_target_names,
    } = collected;
    let classpath = find_all_supertype_bindings(universe, &builders, &erased_target_names, listener_kinds);

    let mut slots: Vec<(String, Option<TargetBindingSetBuilder>)> = builders
        .into_iter()
        .map(|(name, builder)| (name, Some(builder)))
        .collect();
    let mut queue: VecDeque<usize> = (0..slots.len()).collect();
    let mut linked = LinkedTargets::new();
    let mut deferred_in_a_row = 0usize;

    while let Some(slot) = queue.pop_front() {
        let name = slots[slot].0.clone();
        let parent_type = universe
            .get(&name)
            .and_then(|decl| find_parent_type(universe, decl, &erased_target_names, &classpath));

        let parent = match parent_type {
            None => None,
            Some(parent_type) => match linked.get(&parent_type) {
                Some(set) => Some(ParentLink::to_round_set(parent_type, set)),
                None => match classpath.get(&parent_type) {
                    Some(info) => Some(ParentLink::Classpath(info.clone())),
                    None => {
                        // Parent is still queued; revisit once it has been frozen.
                        trace!(target = %name, parent = %parent_type, "deferring until parent is linked");
                        queue.push_back(slot);
                        deferred_in_a_row += 1;
                        if deferred_in_a_row > queue.len() {
                            return Err(stalled(&slots, &queue));
                        }
                        continue;
                    }
                },
            },
        };

        deferred_in_a_row = 0;
        let Some(builder) = slots[slot].1.take() else {
            continue;
        };
        debug!(
            target = %name,
            parent = ?parent.as_ref().map(|link| link.binding_class().canonical()),
            "froze binding set"
        );
        linked.insert(name, builder.build(parent));
    }
    Ok(linked)
}

fn stalled(slots: &[(String, Option<TargetBindingSetBuilder>)], queue: &VecDeque<usize>) -> ProcessorError {
    let pending: Vec<&str> = queue.iter().map(|slot| slots[*slot].0.as_str()).collect();
    ProcessorError::UnresolvedParents {
        pending: pending.join(", "),
    }
}

/// Nearest ancestor that is either bound this round or has a classpath companion.
fn find_parent_type(
    universe: &TypeUniverse,
    decl: &TypeDecl,
    bound: &IndexSet<String>,
    classpath: &IndexMap<String, ExternalParentInfo>,
) -> Option<String> {
    universe
        .superclass_chain(decl)
        .into_iter()
        .find(|ancestor| bound.contains(&ancestor.name) || classpath.contains_key(&ancestor.name))
        .map(|ancestor| ancestor.name.clone())
}

/// Discovers ancestors compiled in an earlier round whose companions subclasses
/// must extend.
fn find_all_supertype_bindings(
    universe: &TypeUniverse,
    builders: &IndexMap<String, TargetBindingSetBuilder>,
    bound: &IndexSet<String>,
    listener_kinds: &[&'static ListenerKind],
) -> IndexMap<String, ExternalParentInfo> {
    let mut classpath: IndexMap<String, ExternalParentInfo> = IndexMap::new();

    for name in builders.keys() {
        let Some(decl) = universe.get(name) else {
            continue;
        };
        // Superclasses are inspected base first: a base needing a view makes
        // every descendant need one too.
        let mut unvisited = Vec::new();
        let mut parent_needs_view = false;
        for ancestor in universe.superclass_chain(decl) {
            if bound.contains(&ancestor.name) {
                break;
            }
            if let Some(known) = classpath.get(&ancestor.name) {
                parent_needs_view = known.constructor_needs_view;
                break;
            }
            unvisited.push(ancestor);
        }

        for ancestor in unvisited.into_iter().rev() {
            if let Some(info) = find_binding_info(ancestor, listener_kinds, parent_needs_view) {
                parent_needs_view |= info.constructor_needs_view;
                trace!(ancestor = %ancestor.name, needs_view = info.constructor_needs_view, "found classpath binding");
                classpath.insert(ancestor.name.clone(), info);
            }
        }
    }
    classpath
}

fn find_binding_info(
    decl: &TypeDecl,
    listener_kinds: &[&'static ListenerKind],
    needs_view: bool,
) -> Option<ExternalParentInfo> {
    if decl.origin != Origin::Classpath {
        return None;
    }
    let mut found_supported = false;
    for member in &decl.members {
        for annotation in &member.annotations {
            let name = annotation.simple_name();
            if requires_view_in_constructor(name, listener_kinds) {
                return Some(external_info(decl, true));
            }
            if is_resource_annotation(name) {
                if needs_view {
                    return Some(external_info(decl, true));
                }
                found_supported = true;
            }
        }
    }
    found_supported.then(|| external_info(decl, false))
}

fn external_info(decl: &TypeDecl, constructor_needs_view: bool) -> ExternalParentInfo {
    ExternalParentInfo {
        binding_class: binding_class_name(&decl.package, &decl.simple_names()),
        constructor_needs_view,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewbind_elements::{AnnotationMirror, Element, TypeMirror};
    use viewbind_model::LISTENERS;

    fn annotated(annotation: &str) -> Element {
        Element::field("thing", TypeMirror::declared("android.view.View"))
            .annotated(AnnotationMirror::new(annotation))
    }

    #[test]
    fn classpath_views_force_view_constructor() {
        let decl = TypeDecl::class("lib.Base").with_member(annotated("BindView")).on_classpath();
        let info = find_binding_info(&decl, LISTENERS, false).unwrap();
        assert!(info.constructor_needs_view);
        assert_eq!(info.binding_class.canonical(), "lib.Base_ViewBinding");
    }

    #[test]
    fn classpath_resources_inherit_view_requirement() {
        let decl = TypeDecl::class("lib.Base").with_member(annotated("BindString")).on_classpath();
        assert!(!find_binding_info(&decl, LISTENERS, false).unwrap().constructor_needs_view);
        assert!(find_binding_info(&decl, LISTENERS, true).unwrap().constructor_needs_view);
    }

    #[test]
    fn source_and_unannotated_ancestors_have_no_companion() {
        let source = TypeDecl::class("app.Base").with_member(annotated("BindView"));
        assert!(find_binding_info(&source, LISTENERS, false).is_none());
        let plain = TypeDecl::class("lib.Base").with_member(annotated("Deprecated")).on_classpath();
        assert!(find_binding_info(&plain, LISTENERS, false).is_none());
    }
}
