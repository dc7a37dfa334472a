use thiserror::Error;

/// Invariant violations raised while assembling a binding set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Invalid class name '{name}'")]
    InvalidClassName { name: String },

    #[error("Field binding '{existing}' already occupies ID {id}; cannot also bind '{requested}'")]
    FieldAlreadyBound {
        id: i32,
        existing: String,
        requested: String,
    },

    #[error("Unknown typeface style '{style}'")]
    UnknownTypefaceStyle { style: String },
}
