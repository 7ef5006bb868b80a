//! Error taxonomy for mesh import.

/// Convenience result type used across mesh2shape.
pub type MeshResult<T> = Result<T, MeshError>;

/// Top-level error taxonomy used by the validator, synthesizer and driver.
///
/// Every variant is terminal for the current import: nothing is retried, and the caller is
/// expected to surface the message as-is.
#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    /// Malformed JSON text.
    #[error("parse error: {0}")]
    Parse(String),

    /// Unexpected or missing field, wrong JSON type, closed-schema violation.
    #[error("schema error: {0}")]
    Schema(String),

    /// Numeric or enumerated value outside of its allowed domain.
    #[error("range error: {0}")]
    Range(String),

    /// Polygon or vertex counts that disagree between keyframes.
    #[error("consistency error: {0}")]
    Consistency(String),

    /// The host is not in a state where an import can start.
    #[error("precondition error: {0}")]
    Precondition(String),

    /// The host rejected an authoring call.
    #[error("host error: {0}")]
    Host(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MeshError {
    /// Build a [`MeshError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`MeshError::Schema`] value.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Build a [`MeshError::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`MeshError::Consistency`] value.
    pub fn consistency(msg: impl Into<String>) -> Self {
        Self::Consistency(msg.into())
    }

    /// Build a [`MeshError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`MeshError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
