use crate::error::ElementError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive Java types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => PrimitiveKind::Boolean,
            "byte" => PrimitiveKind::Byte,
            "short" => PrimitiveKind::Short,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "char" => PrimitiveKind::Char,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            _ => return None,
        })
    }
}

/// A use of a type as seen by the host compiler.
///
/// `Display` follows the compiler's own rendering (`java.util.List<android.view.View>`,
/// type arguments joined by a bare comma). The textual form accepted by
/// [`TypeMirror::parse`] extends that syntax with two markers:
///
/// * `T extends Bound` declares a type variable with its upper bound.
/// * `!Name` declares a type the compiler could not resolve yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeMirror {
    Primitive(PrimitiveKind),
    Void,
    Declared { name: String, args: Vec<TypeMirror> },
    Array(Box<TypeMirror>),
    TypeVariable { name: String, upper_bound: Box<TypeMirror> },
    Wildcard { extends: Option<Box<TypeMirror>> },
    Error(String),
}

impl TypeMirror {
    pub fn declared(name: impl Into<String>) -> Self {
        TypeMirror::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ElementError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(syntax_error(input, "empty type"));
        }

        if let Some(unresolved) = trimmed.strip_prefix('!') {
            return Ok(TypeMirror::Error(unresolved.trim().to_string()));
        }

        if let Some(component) = trimmed.strip_suffix("[]") {
            return Ok(TypeMirror::Array(Box::new(Self::parse(component)?)));
        }

        if trimmed == "void" {
            return Ok(TypeMirror::Void);
        }
        if let Some(kind) = PrimitiveKind::from_keyword(trimmed) {
            return Ok(TypeMirror::Primitive(kind));
        }

        if let Some(rest) = trimmed.strip_prefix('?') {
            let rest = rest.trim();
            if rest.is_empty() {
                return Ok(TypeMirror::Wildcard { extends: None });
            }
            let bound = rest
                .strip_prefix("extends ")
                .ok_or_else(|| syntax_error(input, "only upper-bounded wildcards are supported"))?;
            return Ok(TypeMirror::Wildcard {
                extends: Some(Box::new(Self::parse(bound)?)),
            });
        }

        if let Some((name, bound)) = split_type_variable(trimmed) {
            return Ok(TypeMirror::TypeVariable {
                name: name.to_string(),
                upper_bound: Box::new(Self::parse(bound)?),
            });
        }

        match trimmed.find('<') {
            None => {
                validate_qualified_name(input, trimmed)?;
                Ok(TypeMirror::declared(trimmed))
            }
            Some(open) => {
                let inner = trimmed[open + 1..]
                    .strip_suffix('>')
                    .ok_or_else(|| syntax_error(input, "unbalanced type arguments"))?;
                let name = &trimmed[..open];
                validate_qualified_name(input, name)?;
                let args = split_top_level(inner)
                    .into_iter()
                    .map(Self::parse)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeMirror::Declared {
                    name: name.to_string(),
                    args,
                })
            }
        }
    }

    /// Resolves type variables to their upper bound.
    pub fn upper_bound(&self) -> &TypeMirror {
        match self {
            TypeMirror::TypeVariable { upper_bound, .. } => upper_bound.upper_bound(),
            other => other,
        }
    }

    /// Qualified name without type arguments, when this is a declared type.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeMirror::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn type_arguments(&self) -> &[TypeMirror] {
        match self {
            TypeMirror::Declared { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeMirror::Void)
    }

    pub fn is_primitive(&self, kind: PrimitiveKind) -> bool {
        matches!(self, TypeMirror::Primitive(actual) if *actual == kind)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TypeMirror::Error(_))
    }

    /// Serialised form understood by [`TypeMirror::parse`].
    pub fn to_syntax(&self) -> String {
        match self {
            TypeMirror::TypeVariable { name, upper_bound } => {
                format!("{name} extends {}", upper_bound.to_syntax())
            }
            TypeMirror::Error(name) => format!("!{name}"),
            TypeMirror::Array(component) => format!("{}[]", component.to_syntax()),
            TypeMirror::Declared { name, args } if !args.is_empty() => {
                let rendered: Vec<String> = args.iter().map(TypeMirror::to_syntax).collect();
                format!("{name}<{}>", rendered.join(","))
            }
            TypeMirror::Wildcard {
                extends: Some(bound),
            } => format!("? extends {}", bound.to_syntax()),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for TypeMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMirror::Primitive(kind) => f.write_str(kind.keyword()),
            TypeMirror::Void => f.write_str("void"),
            TypeMirror::Declared { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeMirror::Array(component) => write!(f, "{component}[]"),
            TypeMirror::TypeVariable { name, .. } => f.write_str(name),
            TypeMirror::Wildcard { extends: None } => f.write_str("?"),
            TypeMirror::Wildcard {
                extends: Some(bound),
            } => write!(f, "? extends {bound}"),
            TypeMirror::Error(name) => f.write_str(name),
        }
    }
}

impl TryFrom<String> for TypeMirror {
    type Error = ElementError;

    fn try_from(value: String) -> Result<Self, ElementError> {
        TypeMirror::parse(&value)
    }
}

impl From<TypeMirror> for String {
    fn from(value: TypeMirror) -> Self {
        value.to_syntax()
    }
}

fn syntax_error(input: &str, message: &str) -> ElementError {
    ElementError::InvalidTypeSyntax {
        input: input.to_string(),
        message: message.to_string(),
    }
}

fn validate_qualified_name(input: &str, name: &str) -> Result<(), ElementError> {
    let valid = name.split('.').all(|segment| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(first) if first.is_alphabetic() || first == '_' || first == '$')
            && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    });
    if valid {
        Ok(())
    } else {
        Err(syntax_error(input, "malformed qualified name"))
    }
}

// `T extends Bound` at the top level, outside any type argument list.
fn split_type_variable(input: &str) -> Option<(&str, &str)> {
    let position = input.find(" extends ")?;
    if input[..position].contains('<') {
        return None;
    }
    Some((input[..position].trim(), input[position + " extends ".len()..].trim()))
}

fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (index, ch) in input.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(input[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(input[start..].trim());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("int" ; "primitive")]
    #[test_case("void" ; "void")]
    #[test_case("android.view.View" ; "declared")]
    #[test_case("java.util.List<android.view.View>" ; "generic")]
    #[test_case("java.util.Map<java.lang.String,java.util.List<? extends android.view.View>>" ; "nested generic")]
    #[test_case("java.lang.String[]" ; "array")]
    fn display_matches_input(input: &str) {
        let parsed = TypeMirror::parse(input).unwrap();
        assert_eq!(parsed.to_string(), input);
    }

    #[test]
    fn type_variable_resolves_to_bound() {
        let parsed = TypeMirror::parse("T extends android.widget.Button").unwrap();
        assert_eq!(parsed.to_string(), "T");
        assert_eq!(parsed.upper_bound().to_string(), "android.widget.Button");
        assert_eq!(parsed.to_syntax(), "T extends android.widget.Button");
    }

    #[test]
    fn unresolved_marker_produces_error_type() {
        let parsed = TypeMirror::parse("!test.GeneratedView").unwrap();
        assert!(parsed.is_error());
        assert_eq!(parsed.to_string(), "test.GeneratedView");
    }

    #[test]
    fn rejects_unbalanced_arguments() {
        let error = TypeMirror::parse("java.util.List<android.view.View").unwrap_err();
        assert!(matches!(error, ElementError::InvalidTypeSyntax { .. }));
    }

    #[test]
    fn serde_uses_textual_form() {
        let parsed: TypeMirror = serde_json::from_str("\"java.util.List<T extends android.view.View>\"").unwrap();
        assert_eq!(parsed.to_string(), "java.util.List<T>");
        let encoded = serde_json::to_string(&parsed).unwrap();
        assert_eq!(encoded, "\"java.util.List<T extends android.view.View>\"");
    }
}
