use crate::error::ModelError;
use std::fmt;

/// A fully-qualified class reference, nested names kept separate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    pub fn new(package: impl Into<String>, top_level: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![top_level.into()],
        }
    }

    pub fn with_nested(package: impl Into<String>, simple_names: Vec<String>) -> Result<Self, ModelError> {
        let package = package.into();
        if simple_names.is_empty() || simple_names.iter().any(|name| name.is_empty()) {
            return Err(ModelError::InvalidClassName {
                name: format!("{package}.{}", simple_names.join(".")),
            });
        }
        Ok(Self {
            package,
            simple_names,
        })
    }

    /// Splits `a.b.Outer.Inner` assuming packages are lower case and types are not.
    pub fn best_guess(name: &str) -> Result<Self, ModelError> {
        let segments: Vec<&str> = name.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ModelError::InvalidClassName {
                name: name.to_string(),
            });
        }
        let first_type = segments
            .iter()
            .position(|segment| segment.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len() - 1);
        Self::with_nested(
            segments[..first_type].join("."),
            segments[first_type..].iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map_or("", String::as_str)
    }

    pub fn top_level(&self) -> ClassName {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..1].to_vec(),
        }
    }

    pub fn nested(&self, name: impl Into<String>) -> ClassName {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// Name as it appears in source: `pkg.Outer.Inner`.
    pub fn canonical(&self) -> String {
        let nested = self.simple_names.join(".");
        if self.package.is_empty() {
            nested
        } else {
            format!("{}.{nested}", self.package)
        }
    }

    /// Binary name: `pkg.Outer$Inner`.
    pub fn reflection_name(&self) -> String {
        let nested = self.simple_names.join("$");
        if self.package.is_empty() {
            nested
        } else {
            format!("{}.{nested}", self.package)
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// A type as it is written in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Void,
    Primitive(String),
    Class(ClassName),
    Parameterized { raw: ClassName, args: Vec<TypeName> },
    Array(Box<TypeName>),
    Wildcard(Option<Box<TypeName>>),
}

impl TypeName {
    /// Parses source-form type text such as `android.widget.AdapterView<?>`.
    pub fn best_guess(text: &str) -> Result<Self, ModelError> {
        let text = text.trim();
        if text == "void" {
            return Ok(TypeName::Void);
        }
        if is_primitive(text) {
            return Ok(TypeName::Primitive(text.to_string()));
        }
        if let Some(component) = text.strip_suffix("[]") {
            return Ok(TypeName::Array(Box::new(Self::best_guess(component)?)));
        }
        if let Some(rest) = text.strip_prefix('?') {
            let rest = rest.trim();
            return Ok(match rest.strip_prefix("extends ") {
                Some(bound) => TypeName::Wildcard(Some(Box::new(Self::best_guess(bound)?))),
                None => TypeName::Wildcard(None),
            });
        }
        match text.find('<') {
            None => Ok(TypeName::Class(ClassName::best_guess(text)?)),
            Some(open) => {
                let inner = text[open + 1..]
                    .strip_suffix('>')
                    .ok_or_else(|| ModelError::InvalidClassName {
                        name: text.to_string(),
                    })?;
                let args = split_arguments(inner)
                    .into_iter()
                    .map(Self::best_guess)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeName::Parameterized {
                    raw: ClassName::best_guess(&text[..open])?,
                    args,
                })
            }
        }
    }

    pub fn class(name: ClassName) -> Self {
        TypeName::Class(name)
    }

    /// The type without its type arguments, as used for class literals and casts.
    pub fn raw(&self) -> TypeName {
        match self {
            TypeName::Parameterized { raw, .. } => TypeName::Class(raw.clone()),
            other => other.clone(),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeName::Void)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Void => f.write_str("void"),
            TypeName::Primitive(keyword) => f.write_str(keyword),
            TypeName::Class(class) => write!(f, "{class}"),
            TypeName::Parameterized { raw, args } => {
                write!(f, "{raw}<")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeName::Array(component) => write!(f, "{component}[]"),
            TypeName::Wildcard(None) => f.write_str("?"),
            TypeName::Wildcard(Some(bound)) => write!(f, "? extends {bound}"),
        }
    }
}

fn is_primitive(text: &str) -> bool {
    matches!(
        text,
        "boolean" | "byte" | "short" | "int" | "long" | "char" | "float" | "double"
    )
}

fn split_arguments(input: &str) -> Vec<&str> {
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

    #[test]
    fn best_guess_splits_nested_types() {
        let name = ClassName::best_guess("android.widget.AdapterView.OnItemClickListener").unwrap();
        assert_eq!(name.package(), "android.widget");
        assert_eq!(name.simple_names(), ["AdapterView", "OnItemClickListener"]);
        assert_eq!(name.top_level().canonical(), "android.widget.AdapterView");
        assert_eq!(name.reflection_name(), "android.widget.AdapterView$OnItemClickListener");
    }

    #[test]
    fn parameterized_type_keeps_wildcards() {
        let ty = TypeName::best_guess("android.widget.AdapterView<?>").unwrap();
        assert_eq!(ty.to_string(), "android.widget.AdapterView<?>");
        assert_eq!(ty.raw().to_string(), "android.widget.AdapterView");
    }

    #[test]
    fn default_package_is_allowed() {
        let name = ClassName::best_guess("Generated").unwrap();
        assert_eq!(name.package(), "");
        assert_eq!(name.canonical(), "Generated");
    }

    #[test]
    fn empty_segments_are_rejected() {
        assert!(ClassName::best_guess("android..View").is_err());
    }
}
