use crate::element::Modifier;
use serde::{Deserialize, Serialize};

/// A generated resource-index class (`R` or its library mirror `R2`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceIndex {
    /// Qualified name of the index type, e.g. `com.example.R2`.
    pub name: String,
    #[serde(flatten)]
    pub form: ResourceIndexForm,
}

impl ResourceIndex {
    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(package, _)| package)
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit_once('.').map_or(self.name.as_str(), |(_, simple)| simple)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ResourceIndexForm {
    /// The index is part of this round's source, available as a declaration tree.
    Source { tree: SourceClass },
    /// Only the compiled form is available; members expose their constant values.
    Compiled {
        #[serde(default)]
        classes: Vec<CompiledClass>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SourceClass {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub fields: Vec<SourceField>,
    #[serde(default)]
    pub nested: Vec<SourceClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Initializer expression text, e.g. `0x7f0a0001`.
    #[serde(default)]
    pub initializer: Option<String>,
}

impl SourceField {
    /// The initializer as an `int` literal, if it is one.
    pub fn int_value(&self) -> Option<i32> {
        self.initializer.as_deref().and_then(parse_int_literal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledClass {
    pub name: String,
    #[serde(default)]
    pub members: Vec<CompiledMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledMember {
    pub name: String,
    /// Present for `int` constants only.
    #[serde(default)]
    pub constant_value: Option<i32>,
}

/// Parses Java `int` literals: decimal, `0x` hex, optional sign and `_` separators.
pub fn parse_int_literal(text: &str) -> Option<i32> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        // Hex literals cover the full 32-bit range, sign bit included.
        u32::from_str_radix(hex, 16).ok()? as i32
    } else {
        digits.parse::<i32>().ok()?
    };
    Some(if negative { magnitude.wrapping_neg() } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1", Some(1))]
    #[test_case("0x7f0a0001", Some(0x7f0a_0001))]
    #[test_case("0xffffffff", Some(-1))]
    #[test_case("-5", Some(-5))]
    #[test_case("1_000", Some(1000))]
    #[test_case("R.id.other", None)]
    fn int_literals(text: &str, expected: Option<i32>) {
        assert_eq!(parse_int_literal(text), expected);
    }

    #[test]
    fn index_name_splits_package() {
        let index = ResourceIndex {
            name: "com.example.R2".to_string(),
            form: ResourceIndexForm::Compiled { classes: vec![] },
        };
        assert_eq!(index.package(), "com.example");
        assert_eq!(index.simple_name(), "R2");
    }
}
