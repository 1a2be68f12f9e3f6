/// Errors produced by the `beacon-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The request body was absent, unparseable, or held an empty value.
    #[error("No data received")]
    EmptyPayload,

    /// The payload parsed but is not a JSON object, so it has no fields.
    #[error("expected a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    /// An environment variable held a value that could not be used.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: String, reason: String },
}
