use serde::{Deserialize, Serialize};

pub const GENERATED_FILE_COMMENT: &str = "Generated code from Butter Knife. Do not modify!";

/// Configuration options that drive companion generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaCodeGenConfig {
    /// Indentation string used when pretty-printing generated Java.
    pub indent: String,
    /// Lowest API level the generated code must run on; selects resource accessors.
    pub min_sdk: u32,
    /// Route lookups and casts through the runtime helpers that describe failures.
    pub debuggable: bool,
    /// Line comment written above the package declaration.
    pub file_comment: Option<String>,
}

impl Default for JavaCodeGenConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            min_sdk: 1,
            debuggable: true,
            file_comment: Some(GENERATED_FILE_COMMENT.to_string()),
        }
    }
}

impl JavaCodeGenConfig {
    pub fn for_platform(min_sdk: u32, debuggable: bool) -> Self {
        Self {
            min_sdk,
            debuggable,
            ..Self::default()
        }
    }
}
