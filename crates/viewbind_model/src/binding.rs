use crate::error::ModelError;
use crate::id::ResolvedId;
use crate::listener::{ListenerCallback, ListenerKind};
use crate::names::TypeName;
use indexmap::{IndexMap, IndexSet};

pub const VIEW_TYPE: &str = "android.view.View";

/// Whether a value of `ty` must be cast from a plain `View`.
pub fn requires_view_cast(ty: &TypeName) -> bool {
    ty.to_string() != VIEW_TYPE
}

/// Assigns the view found for an id to a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldBinding {
    pub name: String,
    pub ty: TypeName,
    pub required: bool,
}

impl FieldBinding {
    pub fn new(name: impl Into<String>, ty: TypeName, required: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            required,
        }
    }

    pub fn description(&self) -> String {
        format!("field '{}'", self.name)
    }

    pub fn requires_cast(&self) -> bool {
        requires_view_cast(&self.ty)
    }
}

/// One parameter of a bound method and the callback argument feeding it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub listener_position: usize,
    pub ty: TypeName,
}

impl Parameter {
    pub fn new(listener_position: usize, ty: TypeName) -> Self {
        Self {
            listener_position,
            ty,
        }
    }

    /// True when the declared type differs from the callback parameter it receives.
    pub fn requires_cast(&self, callback_parameter: &str) -> bool {
        self.ty.to_string() != callback_parameter
    }
}

/// A target method invoked from a listener callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodBinding {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub required: bool,
    pub has_return_value: bool,
}

impl MethodBinding {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        required: bool,
        has_return_value: bool,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            required,
            has_return_value,
        }
    }

    pub fn description(&self) -> String {
        format!("method '{}'", self.name)
    }
}

pub type CallbackBindings = IndexMap<&'static ListenerCallback, IndexSet<MethodBinding>>;

/// All bindings sharing one view id within a target class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewBindingGroup {
    id: ResolvedId,
    field: Option<FieldBinding>,
    listeners: IndexMap<&'static ListenerKind, CallbackBindings>,
}

impl ViewBindingGroup {
    pub fn new(id: ResolvedId) -> Self {
        Self {
            id,
            field: None,
            listeners: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &ResolvedId {
        &self.id
    }

    pub fn field(&self) -> Option<&FieldBinding> {
        self.field.as_ref()
    }

    pub fn listeners(&self) -> &IndexMap<&'static ListenerKind, CallbackBindings> {
        &self.listeners
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn has_listener(&self, kind: &ListenerKind) -> bool {
        self.listeners.contains_key(kind)
    }

    pub fn has_method_binding(&self, kind: &ListenerKind, callback: &ListenerCallback) -> bool {
        self.listeners
            .get(kind)
            .and_then(|callbacks| callbacks.get(callback))
            .is_some()
    }

    pub fn set_field(&mut self, field: FieldBinding) -> Result<(), ModelError> {
        if let Some(existing) = &self.field {
            return Err(ModelError::FieldAlreadyBound {
                id: self.id.value(),
                existing: existing.name.clone(),
                requested: field.name,
            });
        }
        self.field = Some(field);
        Ok(())
    }

    /// Adds a method under its listener callback; an identical binding is stored once.
    pub fn add_method(
        &mut self,
        kind: &'static ListenerKind,
        callback: &'static ListenerCallback,
        method: MethodBinding,
    ) {
        self.listeners
            .entry(kind)
            .or_default()
            .entry(callback)
            .or_default()
            .insert(method);
    }

    pub fn is_bound_to_root(&self) -> bool {
        self.id.is_bound_to_root()
    }

    pub fn is_single_field_binding(&self) -> bool {
        self.field.is_some() && self.listeners.is_empty()
    }

    /// Whether the lookup result must be held in the shared `view` local.
    pub fn requires_local(&self) -> bool {
        !(self.is_bound_to_root() || self.is_single_field_binding())
    }

    /// Descriptions of every required member: the field first, then methods in
    /// listener and callback order.
    pub fn required_descriptions(&self) -> Vec<String> {
        let mut descriptions = Vec::new();
        if let Some(field) = self.field.as_ref().filter(|field| field.required) {
            descriptions.push(field.description());
        }
        for callbacks in self.listeners.values() {
            for methods in callbacks.values() {
                descriptions.extend(
                    methods
                        .iter()
                        .filter(|method| method.required)
                        .map(MethodBinding::description),
                );
            }
        }
        descriptions
    }

    /// All members are optional, so every use of the looked-up view is null-guarded.
    pub fn needs_null_check(&self) -> bool {
        self.required_descriptions().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Array,
    List,
}

impl CollectionKind {
    /// Runtime helper assembling the collection from individual lookups.
    pub fn factory(self) -> &'static str {
        match self {
            CollectionKind::Array => "arrayFilteringNull",
            CollectionKind::List => "listFilteringNull",
        }
    }
}

/// Several ids bound into one array or `List` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionBinding {
    pub name: String,
    pub element_type: TypeName,
    pub kind: CollectionKind,
    pub required: bool,
    pub ids: Vec<ResolvedId>,
}

impl CollectionBinding {
    pub fn description(&self) -> String {
        format!("field '{}'", self.name)
    }

    pub fn requires_cast(&self) -> bool {
        requires_view_cast(&self.element_type)
    }
}

/// Joins descriptions with English list punctuation.
pub fn human_description(descriptions: &[String]) -> String {
    match descriptions {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
