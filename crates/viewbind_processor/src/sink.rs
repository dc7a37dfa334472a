//! Destinations for generated companion sources.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// One rendered companion source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub package: String,
    pub simple_name: String,
    pub source: String,
}

impl GeneratedFile {
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }

    /// `com/example/Foo_ViewBinding.java`
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.package.split('.').filter(|part| !part.is_empty()).collect();
        path.push(format!("{}.java", self.simple_name));
        path
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} was already written this round")]
    AlreadyWritten { name: String },
}

/// Accepts generated files. A failure concerns that file only.
pub trait SourceSink {
    fn write(&mut self, file: &GeneratedFile) -> Result<(), SinkError>;
}

/// Keeps generated files in memory, keyed by qualified name.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Vec<GeneratedFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn get(&self, qualified_name: &str) -> Option<&GeneratedFile> {
        self.files
            .iter()
            .find(|file| file.qualified_name() == qualified_name)
    }
}

impl SourceSink for MemorySink {
    fn write(&mut self, file: &GeneratedFile) -> Result<(), SinkError> {
        let name = file.qualified_name();
        if self.get(&name).is_some() {
            return Err(SinkError::AlreadyWritten { name });
        }
        self.files.push(file.clone());
        Ok(())
    }
}

/// Writes files below a source root, one directory per package segment.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceSink for DirectorySink {
    fn write(&mut self, file: &GeneratedFile) -> Result<(), SinkError> {
        let path = self.root.join(file.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SinkError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.source).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote generated source");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> GeneratedFile {
        GeneratedFile {
            package: "com.example".to_string(),
            simple_name: "Main_ViewBinding".to_string(),
            source: "package com.example;\n".to_string(),
        }
    }

    #[test]
    fn directory_sink_writes_package_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        sink.write(&file()).unwrap();
        let written = fs::read_to_string(dir.path().join("com/example/Main_ViewBinding.java")).unwrap();
        assert_eq!(written, "package com.example;\n");
    }

    #[test]
    fn memory_sink_rejects_rewrites() {
        let mut sink = MemorySink::new();
        sink.write(&file()).unwrap();
        let error = sink.write(&file()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "com.example.Main_ViewBinding was already written this round"
        );
        assert!(sink.get("com.example.Main_ViewBinding").is_some());
    }

    #[test]
    fn default_package_has_no_directories() {
        let mut generated = file();
        generated.package.clear();
        assert_eq!(generated.relative_path(), PathBuf::from("Main_ViewBinding.java"));
    }
}
