//! Program-element facts for the viewbind processor: declared types, their
//! members and annotations, and the resource-index classes of a round.

pub mod element;
pub mod error;
mod platform;
pub mod resources;
pub mod round;
pub mod types;
pub mod universe;

pub use element::{
    AnnotationMirror, AnnotationValue, Element, IdValue, MemberKind, Modifier, Origin, TypeDecl,
    TypeKind,
};
pub use error::ElementError;
pub use resources::{
    CompiledClass, CompiledMember, ResourceIndex, ResourceIndexForm, SourceClass, SourceField,
};
pub use round::{RoundEnvironment, RoundInput};
pub use types::{PrimitiveKind, TypeMirror};
pub use universe::{ElementRef, TypeUniverse};
