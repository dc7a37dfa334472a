use thiserror::Error;

/// Failures raised while loading or querying program-element facts.
#[derive(Debug, Error)]
pub enum ElementError {
    #[error("Invalid type syntax '{input}': {message}")]
    InvalidTypeSyntax { input: String, message: String },

    #[error("Type '{name}' is declared more than once in this round")]
    DuplicateType { name: String },

    #[error("Type '{name}' must belong to package '{package}'")]
    PackageMismatch { name: String, package: String },

    #[error("Unable to read round description: {0}")]
    Json(#[from] serde_json::Error),
}
