use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use viewbind_processor::ProcessorOptions;

/// Contents of a `viewbind.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub processor: ProcessorSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessorSection {
    pub min_sdk: Option<u32>,
    pub debuggable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<PathBuf>,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Layers the file's processor settings over options read from the round.
    pub fn apply(&self, options: &mut ProcessorOptions) {
        if let Some(min_sdk) = self.processor.min_sdk {
            options.min_sdk = min_sdk;
        }
        if let Some(debuggable) = self.processor.debuggable {
            options.debuggable = debuggable;
        }
    }
}

/// Settings given on the command line; these win over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub min_sdk: Option<u32>,
    pub release: bool,
    pub output: Option<PathBuf>,
}

impl CliOverrides {
    pub fn apply(&self, options: &mut ProcessorOptions) {
        if let Some(min_sdk) = self.min_sdk {
            options.min_sdk = min_sdk;
        }
        if self.release {
            options.debuggable = false;
        }
    }

    pub fn output_dir(&self, config: &CliConfig) -> PathBuf {
        self.output
            .clone()
            .or_else(|| config.output.dir.clone())
            .unwrap_or_else(|| PathBuf::from(crate::DEFAULT_OUTPUT_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_sections() {
        let config = CliConfig::parse(
            "[processor]\nmin_sdk = 21\ndebuggable = false\n\n[output]\ndir = \"build/generated\"\n",
        )
        .unwrap();
        assert_eq!(config.processor.min_sdk, Some(21));
        assert_eq!(config.processor.debuggable, Some(false));
        assert_eq!(config.output.dir, Some(PathBuf::from("build/generated")));
    }

    #[test]
    fn rejects_unknown_keys() {
        let error = CliConfig::parse("[processor]\nmin_skd = 21\n").unwrap_err();
        assert!(error.to_string().contains("min_skd"), "{error}");
    }

    #[test]
    fn flags_win_over_file() {
        let config = CliConfig::parse("[processor]\nmin_sdk = 21\n[output]\ndir = \"gen\"\n").unwrap();
        let overrides = CliOverrides {
            min_sdk: Some(26),
            release: true,
            output: None,
        };
        let mut options = ProcessorOptions::default();
        config.apply(&mut options);
        assert_eq!(options.min_sdk, 21);
        overrides.apply(&mut options);
        assert_eq!(options.min_sdk, 26);
        assert!(!options.debuggable);
        assert_eq!(overrides.output_dir(&config), PathBuf::from("gen"));
    }

    #[test]
    fn output_defaults_without_file_or_flag() {
        let overrides = CliOverrides::default();
        assert_eq!(
            overrides.output_dir(&CliConfig::default()),
            PathBuf::from(crate::DEFAULT_OUTPUT_DIR)
        );
    }
}
