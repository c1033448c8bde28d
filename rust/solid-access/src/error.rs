use solid_access_graph::SolidGraphError;
use thiserror::Error;

/// The common error type used by this crate
#[derive(Error, Debug, PartialEq)]
pub enum SolidAccessError {
    /// The target resource's metadata could not be fetched at all; without
    /// it no authorization decision is possible
    #[error("Fetching {url} failed: {status} {status_text}")]
    Http {
        /// The HTTP status code of the failed response
        status: u16,
        /// The status text of the failed response
        status_text: String,
        /// The URL that was requested
        url: String,
    },

    /// WAC expresses control as a single mode, so control-read and
    /// control-write must be changed together
    #[error(
        "WAC cannot represent differing control-read and control-write modes; \
         they must be granted, revoked or left unchanged together"
    )]
    UnequalControlModes,

    /// The requested change cannot be expressed in the target
    /// access-control model
    #[error("Not expressible in the target access-control model: {0}")]
    Inexpressible(String),

    /// The transport failed before a response was available
    #[error("Network request failed: {0}")]
    Fetch(String),

    /// An authorization graph could not be parsed
    #[error(transparent)]
    Graph(#[from] SolidGraphError),
}
