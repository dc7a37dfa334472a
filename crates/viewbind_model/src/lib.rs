//! Binding model for generated view-binding companions.
//!
//! A [`TargetBindingSetBuilder`] gathers the bindings of one annotated class;
//! [`TargetBindingSetBuilder::build`] freezes it into a [`TargetBindingSet`]
//! linked to the companion of its nearest bound ancestor.

pub mod binding;
pub mod error;
pub mod id;
pub mod listener;
pub mod names;
pub mod resource;
pub mod set;

pub use binding::{
    human_description, requires_view_cast, CollectionBinding, CollectionKind, FieldBinding,
    MethodBinding, Parameter, ViewBindingGroup, VIEW_TYPE,
};
pub use error::ModelError;
pub use id::{QualifiedResourceRef, ResolvedId, NO_ID};
pub use listener::{ListenerCallback, ListenerKind, LISTENERS};
pub use names::{ClassName, TypeName};
pub use resource::{ResourceBinding, ResourceKind, TypefaceStyle};
pub use set::{
    binding_class_name, ExternalParentInfo, HostCategory, ParentLink, TargetBindingSet,
    TargetBindingSetBuilder,
};
