use thiserror::Error;
use viewbind_model::ModelError;

/// Error variants produced while rendering a binding set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeGenError {
    #[error("Unsupported type: {type_name} - {message}")]
    UnsupportedType { type_name: String, message: String },

    #[error("Invalid listener declaration on @{annotation}: {message}")]
    InvalidListener { annotation: String, message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}
