use crate::binding::{CollectionBinding, FieldBinding, MethodBinding, ViewBindingGroup};
use crate::error::ModelError;
use crate::id::ResolvedId;
use crate::listener::{ListenerCallback, ListenerKind};
use crate::names::{ClassName, TypeName};
use crate::resource::ResourceBinding;
use indexmap::IndexMap;

pub const BINDING_CLASS_SUFFIX: &str = "_ViewBinding";

/// Name of the generated companion: nested names are flattened with `$`.
pub fn binding_class_name(package: &str, simple_names: &[&str]) -> ClassName {
    ClassName::new(
        package,
        format!("{}{BINDING_CLASS_SUFFIX}", simple_names.join("$")),
    )
}

/// Which single-argument constructor the companion offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCategory {
    View,
    Activity,
    Dialog,
    Generic,
}

/// Stand-in for an ancestor whose companion was compiled earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalParentInfo {
    pub binding_class: ClassName,
    pub constructor_needs_view: bool,
}

/// The companion a binding class extends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentLink {
    /// Built in this round for the named target type.
    Round {
        target: String,
        binding_class: ClassName,
        constructor_needs_view: bool,
    },
    Classpath(ExternalParentInfo),
}

impl ParentLink {
    pub fn to_round_set(target: impl Into<String>, set: &TargetBindingSet) -> Self {
        ParentLink::Round {
            target: target.into(),
            binding_class: set.binding_class().clone(),
            constructor_needs_view: set.constructor_needs_view(),
        }
    }

    pub fn binding_class(&self) -> &ClassName {
        match self {
            ParentLink::Round { binding_class, .. } => binding_class,
            ParentLink::Classpath(info) => &info.binding_class,
        }
    }

    pub fn constructor_needs_view(&self) -> bool {
        match self {
            ParentLink::Round {
                constructor_needs_view,
                ..
            } => *constructor_needs_view,
            ParentLink::Classpath(info) => info.constructor_needs_view,
        }
    }
}

/// Collects one class's bindings while its annotations are processed.
#[derive(Debug, Clone)]
pub struct TargetBindingSetBuilder {
    target_type: TypeName,
    binding_class: ClassName,
    is_final: bool,
    category: HostCategory,
    view_groups: IndexMap<ResolvedId, ViewBindingGroup>,
    collections: Vec<CollectionBinding>,
    resources: Vec<ResourceBinding>,
}

impl TargetBindingSetBuilder {
    pub fn new(
        target_type: TypeName,
        binding_class: ClassName,
        is_final: bool,
        category: HostCategory,
    ) -> Self {
        Self {
            target_type,
            binding_class,
            is_final,
            category,
            view_groups: IndexMap::new(),
            collections: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn binding_class(&self) -> &ClassName {
        &self.binding_class
    }

    /// Name of the field already bound to `id`, if any.
    pub fn field_binding_name(&self, id: &ResolvedId) -> Option<&str> {
        self.view_groups
            .get(id)
            .and_then(ViewBindingGroup::field)
            .map(|field| field.name.as_str())
    }

    pub fn add_field(&mut self, id: ResolvedId, field: FieldBinding) -> Result<(), ModelError> {
        self.group_mut(id).set_field(field)
    }

    /// Registers a method under a callback. Returns `false`, leaving the group
    /// unchanged, when the callback returns a value and already has a method.
    pub fn add_method(
        &mut self,
        id: ResolvedId,
        kind: &'static ListenerKind,
        callback: &'static ListenerCallback,
        method: MethodBinding,
    ) -> bool {
        let group = self.group_mut(id);
        if group.has_method_binding(kind, callback) && callback.has_return_type() {
            return false;
        }
        group.add_method(kind, callback, method);
        true
    }

    pub fn add_collection(&mut self, binding: CollectionBinding) {
        self.collections.push(binding);
    }

    pub fn add_resource(&mut self, binding: ResourceBinding) {
        self.resources.push(binding);
    }

    pub fn build(self, parent: Option<ParentLink>) -> TargetBindingSet {
        TargetBindingSet {
            target_type: self.target_type,
            binding_class: self.binding_class,
            is_final: self.is_final,
            category: self.category,
            view_bindings: self.view_groups.into_values().collect(),
            collection_bindings: self.collections,
            resource_bindings: self.resources,
            parent,
        }
    }

    fn group_mut(&mut self, id: ResolvedId) -> &mut ViewBindingGroup {
        self.view_groups
            .entry(id.clone())
            .or_insert_with(|| ViewBindingGroup::new(id))
    }
}

/// Frozen bindings of one target class, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetBindingSet {
    target_type: TypeName,
    binding_class: ClassName,
    is_final: bool,
    category: HostCategory,
    view_bindings: Vec<ViewBindingGroup>,
    collection_bindings: Vec<CollectionBinding>,
    resource_bindings: Vec<ResourceBinding>,
    parent: Option<ParentLink>,
}

impl TargetBindingSet {
    pub fn target_type(&self) -> &TypeName {
        &self.target_type
    }

    pub fn binding_class(&self) -> &ClassName {
        &self.binding_class
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn category(&self) -> HostCategory {
        self.category
    }

    pub fn view_bindings(&self) -> &[ViewBindingGroup] {
        &self.view_bindings
    }

    pub fn collection_bindings(&self) -> &[CollectionBinding] {
        &self.collection_bindings
    }

    pub fn resource_bindings(&self) -> &[ResourceBinding] {
        &self.resource_bindings
    }

    pub fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    /// True when this class's own bindings require a view hierarchy.
    pub fn has_view_bindings(&self) -> bool {
        !self.view_bindings.is_empty() || !self.collection_bindings.is_empty()
    }

    pub fn has_method_bindings(&self) -> bool {
        self.view_bindings.iter().any(ViewBindingGroup::has_listeners)
    }

    pub fn has_field_bindings(&self) -> bool {
        self.view_bindings.iter().any(|group| group.field().is_some())
            || !self.collection_bindings.is_empty()
    }

    pub fn has_target_field(&self) -> bool {
        self.has_field_bindings() || self.has_method_bindings()
    }

    pub fn has_view_local(&self) -> bool {
        self.view_bindings.iter().any(ViewBindingGroup::requires_local)
    }

    pub fn has_listener(&self, kind: &ListenerKind) -> bool {
        self.view_bindings.iter().any(|group| group.has_listener(kind))
    }

    /// Resource bindings written with raw integers instead of index references.
    pub fn has_unqualified_resource_bindings(&self) -> bool {
        self.resource_bindings
            .iter()
            .any(|binding| !binding.id.is_qualified())
    }

    pub fn needs_resources(&self, min_sdk: u32) -> bool {
        self.resource_bindings
            .iter()
            .any(|binding| binding.kind.requires_resources(min_sdk))
    }

    /// Whether the main constructor takes a `View` rather than a `Context`.
    pub fn constructor_needs_view(&self) -> bool {
        self.has_view_bindings()
            || self
                .parent
                .as_ref()
                .is_some_and(ParentLink::constructor_needs_view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::VIEW_TYPE;
    use crate::listener::ON_EDITOR_ACTION;
    use crate::resource::ResourceKind;

    fn builder() -> TargetBindingSetBuilder {
        TargetBindingSetBuilder::new(
            TypeName::best_guess("test.Test").unwrap(),
            binding_class_name("test", &["Test"]),
            false,
            HostCategory::Generic,
        )
    }

    #[test]
    fn nested_binding_class_uses_dollar() {
        let name = binding_class_name("test", &["Outer", "Inner"]);
        assert_eq!(name.canonical(), "test.Outer$Inner_ViewBinding");
    }

    #[test]
    fn second_value_returning_method_is_refused() {
        let mut builder = builder();
        let callback = &ON_EDITOR_ACTION.methods[0];
        let first = MethodBinding::new("a", vec![], true, true);
        let second = MethodBinding::new("b", vec![], true, true);
        assert!(builder.add_method(ResolvedId::Constant(1), &ON_EDITOR_ACTION, callback, first));
        assert!(!builder.add_method(ResolvedId::Constant(1), &ON_EDITOR_ACTION, callback, second));
    }

    #[test]
    fn resource_only_set_takes_context() {
        let mut builder = builder();
        builder.add_resource(ResourceBinding::new(
            ResolvedId::Constant(1),
            "title",
            ResourceKind::String,
        ));
        let set = builder.build(None);
        assert!(!set.constructor_needs_view());
        assert!(set.has_unqualified_resource_bindings());
        assert!(set.needs_resources(1));
        assert!(!set.has_target_field());
    }

    #[test]
    fn parent_needing_view_propagates() {
        let parent = ParentLink::Classpath(ExternalParentInfo {
            binding_class: binding_class_name("test", &["Base"]),
            constructor_needs_view: true,
        });
        let set = builder().build(Some(parent));
        assert!(set.constructor_needs_view());
    }

    #[test]
    fn groups_keep_insertion_order() {
        let mut builder = builder();
        let view = TypeName::best_guess(VIEW_TYPE).unwrap();
        builder
            .add_field(ResolvedId::Constant(2), FieldBinding::new("b", view.clone(), true))
            .unwrap();
        builder
            .add_field(ResolvedId::Constant(1), FieldBinding::new("a", view, true))
            .unwrap();
        assert_eq!(builder.field_binding_name(&ResolvedId::Constant(1)), Some("a"));
        let set = builder.build(None);
        let ids: Vec<i32> = set.view_bindings().iter().map(|group| group.id().value()).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
