use alloc::string::String;

/// Errors reported while constructing a [`crate::ScrollEngine`].
///
/// Runtime conditions (unrendered items, zero-sized containers, failed fetches) are never errors;
/// only configuration that cannot be interpreted is.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The `item in collection [track by expr]` binding expression could not be parsed.
    #[error("malformed source expression {expression:?}: {reason}")]
    MalformedExpression {
        expression: String,
        reason: &'static str,
    },

    /// `edge_offset` must be a finite number.
    #[error("edge offset must be finite, got {0}")]
    InvalidEdgeOffset(f64),
}
