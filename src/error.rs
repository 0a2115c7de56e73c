use thiserror::Error;

/// Fatal failures for a consensus run; none of these produce a partial consensus.
#[derive(Debug, Error, PartialEq)]
pub enum ConsensusError {
    #[error("Malformed alignment path for record '{query_id}': {reason}")]
    MalformedAlignmentPath { query_id: String, reason: String },

    #[error("No records were provided, a consensus cannot be computed.")]
    EmptyInputSet,

    #[error("The alignment source is unavailable: {0}")]
    SourceUnavailable(String),
}

impl ConsensusError {
    /// Shorthand for building a `MalformedAlignmentPath`
    pub fn malformed(query_id: &str, reason: impl Into<String>) -> ConsensusError {
        ConsensusError::MalformedAlignmentPath {
            query_id: query_id.to_string(),
            reason: reason.into()
        }
    }
}
