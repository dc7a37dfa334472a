use crate::names::ClassName;
use std::hash::{Hash, Hasher};

/// `View.NO_ID`: binds a listener to the bound object itself.
pub const NO_ID: i32 = -1;

/// Resolution key: the same literal may mean different resources in
/// different packages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedResourceRef {
    pub package: String,
    pub value: i32,
}

impl QualifiedResourceRef {
    pub fn new(package: impl Into<String>, value: i32) -> Self {
        Self {
            package: package.into(),
            value,
        }
    }
}

/// A resource identifier as it will be written into generated code.
///
/// A `Constant` compares by value. A `Reference` compares by owning type and
/// member name only; its numeric value is carried for naming and messages.
#[derive(Debug, Clone)]
pub enum ResolvedId {
    Constant(i32),
    Reference {
        /// Category class inside the index, e.g. `com.example.R.id`.
        owner: ClassName,
        member: String,
        value: i32,
    },
}

impl ResolvedId {
    pub fn reference(owner: ClassName, member: impl Into<String>, value: i32) -> Self {
        ResolvedId::Reference {
            owner,
            member: member.into(),
            value,
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            ResolvedId::Constant(value) | ResolvedId::Reference { value, .. } => *value,
        }
    }

    /// Whether the id is written symbolically rather than as a raw integer.
    pub fn is_qualified(&self) -> bool {
        matches!(self, ResolvedId::Reference { .. })
    }

    pub fn is_bound_to_root(&self) -> bool {
        self.value() == NO_ID
    }
}

impl PartialEq for ResolvedId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ResolvedId::Constant(a), ResolvedId::Constant(b)) => a == b,
            (
                ResolvedId::Reference { owner, member, .. },
                ResolvedId::Reference {
                    owner: other_owner,
                    member: other_member,
                    ..
                },
            ) => owner == other_owner && member == other_member,
            _ => false,
        }
    }
}

impl Eq for ResolvedId {}

impl Hash for ResolvedId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ResolvedId::Constant(value) => {
                0u8.hash(state);
                value.hash(state);
            }
            ResolvedId::Reference { owner, member, .. } => {
                1u8.hash(state);
                owner.hash(state);
                member.hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(package: &str) -> ClassName {
        ClassName::new(package, "R").nested("id")
    }

    #[test]
    fn references_compare_by_symbol() {
        let a = ResolvedId::reference(owner("com.example"), "title", 1);
        let b = ResolvedId::reference(owner("com.example"), "title", 2);
        let c = ResolvedId::reference(owner("com.other"), "title", 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn constants_never_equal_references() {
        let reference = ResolvedId::reference(owner("com.example"), "title", 1);
        assert_ne!(ResolvedId::Constant(1), reference);
        assert_eq!(ResolvedId::Constant(1), ResolvedId::Constant(1));
    }

    #[test]
    fn no_id_binds_to_root() {
        assert!(ResolvedId::Constant(NO_ID).is_bound_to_root());
        assert!(!ResolvedId::Constant(1).is_qualified());
    }
}
