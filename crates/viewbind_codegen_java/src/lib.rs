//! Java emission for view-binding companions.
//!
//! [`BindingClassGenerator`] renders a frozen binding set into a
//! [`JavaCompilationUnit`]; [`JavaCompilationUnit::to_source`] prints it.

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod imports;

pub use builder::{JavaCompilationUnit, JavaSourceBuilder};
pub use config::{JavaCodeGenConfig, GENERATED_FILE_COMMENT};
pub use error::CodeGenError;
pub use generator::BindingClassGenerator;
pub use imports::ImportManager;
