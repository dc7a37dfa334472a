use crate::diagnostics::Diagnostics;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const OPTION_SDK_INT: &str = "butterknife.minSdk";
pub const OPTION_DEBUGGABLE: &str = "butterknife.debuggable";

/// Host-supplied switches affecting generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorOptions {
    /// Lowest API level the generated code must run on.
    pub min_sdk: u32,
    /// Emit descriptive runtime checks instead of plain lookups and casts.
    pub debuggable: bool,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            min_sdk: 1,
            debuggable: true,
        }
    }
}

impl ProcessorOptions {
    /// Reads the host option map. A malformed SDK level is reported and ignored.
    pub fn from_options(options: &IndexMap<String, String>, diagnostics: &mut Diagnostics) -> Self {
        let mut parsed = Self::default();
        if let Some(sdk) = options.get(OPTION_SDK_INT) {
            match sdk.trim().parse::<u32>() {
                Ok(value) => parsed.min_sdk = value,
                Err(_) => diagnostics.warning(format!(
                    "Unable to parse supplied minSdk option '{sdk}'. Falling back to API 1 support."
                )),
            }
        }
        parsed.debuggable = options
            .get(OPTION_DEBUGGABLE)
            .map_or(true, |value| value != "false");
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    fn options(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_options() {
        let mut diagnostics = Diagnostics::new();
        let parsed = ProcessorOptions::from_options(&IndexMap::new(), &mut diagnostics);
        assert_eq!(parsed, ProcessorOptions::default());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn reads_sdk_and_debuggable() {
        let mut diagnostics = Diagnostics::new();
        let parsed = ProcessorOptions::from_options(
            &options(&[(OPTION_SDK_INT, "26"), (OPTION_DEBUGGABLE, "false")]),
            &mut diagnostics,
        );
        assert_eq!(parsed.min_sdk, 26);
        assert!(!parsed.debuggable);
    }

    #[test]
    fn malformed_sdk_warns_and_falls_back() {
        let mut diagnostics = Diagnostics::new();
        let parsed = ProcessorOptions::from_options(&options(&[(OPTION_SDK_INT, "Q")]), &mut diagnostics);
        assert_eq!(parsed.min_sdk, 1);
        assert_eq!(
            diagnostics.messages(Severity::Warning),
            vec!["Unable to parse supplied minSdk option 'Q'. Falling back to API 1 support."]
        );
    }

    #[test]
    fn only_literal_false_disables_debuggable() {
        let mut diagnostics = Diagnostics::new();
        let parsed = ProcessorOptions::from_options(&options(&[(OPTION_DEBUGGABLE, "no")]), &mut diagnostics);
        assert!(parsed.debuggable);
    }
}
