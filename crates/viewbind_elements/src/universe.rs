use crate::element::{derive_package, Element, Origin, TypeDecl, TypeKind};
use crate::error::ElementError;
use crate::platform;
use crate::types::TypeMirror;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Every declared type visible to one round, answering the structural
/// queries the processor asks of the host compiler.
#[derive(Debug, Clone, Default)]
pub struct TypeUniverse {
    types: IndexMap<String, TypeDecl>,
}

/// An element together with the type that declares it.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    pub enclosing: &'a TypeDecl,
    pub element: &'a Element,
}

impl<'a> ElementRef<'a> {
    /// `pkg.Type.member`, the form used in diagnostics.
    pub fn path(&self) -> String {
        format!("{}.{}", self.enclosing.name, self.element.name)
    }
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A universe seeded with the framework declarations the processor reasons about.
    pub fn with_platform() -> Self {
        let mut universe = Self::new();
        for decl in platform::declarations() {
            universe.types.insert(decl.name.clone(), decl);
        }
        universe
    }

    /// Registers a declaration. Platform stubs may be replaced; anything else
    /// declared twice is rejected.
    pub fn insert(&mut self, mut decl: TypeDecl) -> Result<(), ElementError> {
        if decl.package.is_empty() {
            decl.package = derive_package(&decl.name);
        } else if !decl.name.starts_with(&format!("{}.", decl.package)) {
            return Err(ElementError::PackageMismatch {
                name: decl.name,
                package: decl.package,
            });
        }

        if let Some(existing) = self.types.get(&decl.name) {
            if !platform::is_platform_type(&existing.name) || existing.origin == Origin::Source {
                return Err(ElementError::DuplicateType { name: decl.name });
            }
        }
        self.types.insert(decl.name.clone(), decl);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn lookup(&self, ty: &TypeMirror) -> Option<&TypeDecl> {
        ty.declared_name().and_then(|name| self.get(name))
    }

    pub fn source_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types
            .values()
            .filter(|decl| decl.origin == Origin::Source)
    }

    /// Annotated members of source types, in declaration order.
    pub fn elements_annotated_with<'a>(
        &'a self,
        simple_name: &'a str,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.source_types().flat_map(move |enclosing| {
            enclosing
                .members
                .iter()
                .filter(move |element| element.has_annotation(simple_name))
                .map(move |element| ElementRef { enclosing, element })
        })
    }

    pub fn superclass_of(&self, decl: &TypeDecl) -> Option<&TypeDecl> {
        decl.superclass.as_ref().and_then(|ty| self.lookup(ty))
    }

    /// Declared superclasses from the immediate one upward. Stops at the first
    /// type outside this universe or on a repeated type.
    pub fn superclass_chain<'a>(&'a self, decl: &'a TypeDecl) -> Vec<&'a TypeDecl> {
        let mut chain: Vec<&TypeDecl> = Vec::new();
        let mut current = self.superclass_of(decl);
        while let Some(superclass) = current {
            if superclass.name == decl.name || chain.iter().any(|seen| seen.name == superclass.name) {
                break;
            }
            chain.push(superclass);
            current = self.superclass_of(superclass);
        }
        chain
    }

    pub fn is_interface(&self, ty: &TypeMirror) -> bool {
        self.lookup(ty.upper_bound())
            .is_some_and(|decl| decl.kind == TypeKind::Interface)
    }

    /// Whether `ty` is `other` or inherits from it. A generic `other` is
    /// matched by its all-wildcard form (`android.widget.AdapterView<?>`).
    /// A cyclic hierarchy is never a subtype of anything outside the cycle.
    pub fn is_subtype_of(&self, ty: &TypeMirror, other: &str) -> bool {
        self.is_subtype_within(ty, other, &mut HashSet::new())
    }

    fn is_subtype_within<'a>(
        &'a self,
        ty: &'a TypeMirror,
        other: &str,
        visited: &mut HashSet<&'a str>,
    ) -> bool {
        if ty.to_string() == other {
            return true;
        }
        let TypeMirror::Declared { name, args } = ty else {
            return false;
        };
        if !args.is_empty() {
            let wildcards = vec!["?"; args.len()].join(",");
            if format!("{name}<{wildcards}>") == other {
                return true;
            }
        }
        if !visited.insert(name.as_str()) {
            return false;
        }
        let Some(decl) = self.get(name) else {
            return false;
        };
        if let Some(superclass) = &decl.superclass {
            if self.is_subtype_within(superclass, other, visited) {
                return true;
            }
        }
        decl.interfaces
            .iter()
            .any(|interface| self.is_subtype_within(interface, other, visited))
    }
}
