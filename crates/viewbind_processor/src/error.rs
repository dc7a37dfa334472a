use crate::sink::SinkError;
use thiserror::Error;
use viewbind_codegen_java::CodeGenError;
use viewbind_model::ModelError;

/// Invariant violations that abort processing of a single annotated element.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessorError {
    #[error("@{annotation} annotation must be on a {expected}.")]
    WrongElementKind {
        annotation: String,
        expected: &'static str,
    },

    #[error("@{annotation} annotation is missing its '{key}' value.")]
    MissingValue { annotation: String, key: &'static str },

    #[error("Multiple listener methods specified on @{annotation}.")]
    MultipleListenerMethods { annotation: String },

    #[error("Both method() and callback() defined on @{annotation}.")]
    MethodAndCallback { annotation: String },

    #[error("No @ListenerMethod defined on @{annotation}'s Callback.{callback}.")]
    UnknownCallback { annotation: String, callback: String },

    #[error("Superclass links of {pending} could not be resolved.")]
    UnresolvedParents { pending: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Why a generated companion did not reach the sink.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    CodeGen(#[from] CodeGenError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
