use crate::types::TypeMirror;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

/// Where a declaration comes from: the sources compiled in this round, or an
/// already-compiled dependency on the classpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    Source,
    Classpath,
}

/// An integer annotation value, optionally carrying the resource-index symbol it
/// was written as (`R.id.title` carries `com.example.R.id.title`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "IdValueRepr")]
pub struct IdValue {
    pub value: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl IdValue {
    pub fn literal(value: i32) -> Self {
        Self {
            value,
            symbol: None,
        }
    }

    pub fn symbolic(value: i32, symbol: impl Into<String>) -> Self {
        Self {
            value,
            symbol: Some(symbol.into()),
        }
    }

    /// Splits the symbol into index type, category and member
    /// (`com.example.R`, `id`, `title`).
    pub fn symbol_parts(&self) -> Option<(&str, &str, &str)> {
        let mut parts = self.symbol.as_deref()?.rsplitn(3, '.');
        let member = parts.next()?;
        let category = parts.next()?;
        let index_type = parts.next()?;
        Some((index_type, category, member))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValueRepr {
    Literal(i32),
    Full {
        value: i32,
        #[serde(default)]
        symbol: Option<String>,
    },
}

impl From<IdValueRepr> for IdValue {
    fn from(repr: IdValueRepr) -> Self {
        match repr {
            IdValueRepr::Literal(value) => IdValue::literal(value),
            IdValueRepr::Full { value, symbol } => IdValue { value, symbol },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Id(IdValue),
    Ids(Vec<IdValue>),
    /// Strings and enum constant names.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationMirror {
    /// Simple (`BindView`) or qualified (`butterknife.BindView`) annotation name.
    pub name: String,
    #[serde(default)]
    pub values: IndexMap<String, AnnotationValue>,
}

impl AnnotationMirror {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: AnnotationValue) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn value(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }

    /// Reads a single id or an id array as a list.
    pub fn ids(&self, key: &str) -> Vec<IdValue> {
        match self.values.get(key) {
            Some(AnnotationValue::Id(id)) => vec![id.clone()],
            Some(AnnotationValue::Ids(ids)) => ids.clone(),
            _ => Vec::new(),
        }
    }

    pub fn id(&self, key: &str) -> Option<&IdValue> {
        match self.values.get(key) {
            Some(AnnotationValue::Id(id)) => Some(id),
            Some(AnnotationValue::Ids(ids)) if ids.len() == 1 => ids.first(),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(AnnotationValue::Text(text)) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberKind {
    Field {
        #[serde(rename = "type")]
        ty: TypeMirror,
    },
    Method {
        return_type: TypeMirror,
        #[serde(default)]
        parameters: Vec<TypeMirror>,
    },
}

/// A field or method declared directly inside a [`TypeDecl`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub annotations: Vec<AnnotationMirror>,
    #[serde(flatten)]
    pub kind: MemberKind,
}

impl Element {
    pub fn field(name: impl Into<String>, ty: TypeMirror) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            kind: MemberKind::Field { ty },
        }
    }

    pub fn method(name: impl Into<String>, return_type: TypeMirror, parameters: Vec<TypeMirror>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            kind: MemberKind::Method {
                return_type,
                parameters,
            },
        }
    }

    pub fn annotated(mut self, annotation: AnnotationMirror) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn annotation(&self, simple_name: &str) -> Option<&AnnotationMirror> {
        self.annotations
            .iter()
            .find(|annotation| annotation.simple_name() == simple_name)
    }

    pub fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotation(simple_name).is_some()
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field { .. })
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }
}

/// A declared class or interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Canonical name, nested types joined with `.` (`test.Outer.Inner`).
    pub name: String,
    /// Derived from `name` when omitted.
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub superclass: Option<TypeMirror>,
    #[serde(default)]
    pub interfaces: Vec<TypeMirror>,
    #[serde(default)]
    pub members: Vec<Element>,
    #[serde(default)]
    pub origin: Origin,
}

impl TypeDecl {
    pub fn class(name: impl Into<String>) -> Self {
        let name = name.into();
        let package = derive_package(&name);
        Self {
            name,
            package,
            kind: TypeKind::Class,
            modifiers: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            origin: Origin::Source,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(name)
        }
    }

    pub fn extending(mut self, superclass: TypeMirror) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implementing(mut self, interface: TypeMirror) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_member(mut self, member: Element) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn on_classpath(mut self) -> Self {
        self.origin = Origin::Classpath;
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Nested simple names below the package (`["Outer", "Inner"]`).
    pub fn simple_names(&self) -> Vec<&str> {
        let relative = if self.package.is_empty() {
            self.name.as_str()
        } else {
            self.name
                .strip_prefix(&self.package)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(&self.name)
        };
        relative.split('.').collect()
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn as_type(&self) -> TypeMirror {
        TypeMirror::declared(self.name.clone())
    }
}

// Nested types are not distinguishable by name alone; a leading upper-case
// segment marks the start of the type names.
pub(crate) fn derive_package(name: &str) -> String {
    let segments: Vec<&str> = name.split('.').collect();
    let package_len = segments
        .iter()
        .position(|segment| segment.chars().next().is_some_and(char::is_uppercase))
        .unwrap_or(segments.len().saturating_sub(1));
    segments[..package_len].join(".")
}
