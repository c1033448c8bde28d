use thiserror::Error;

/// The common error type used by this crate
#[derive(Error, Debug, PartialEq)]
pub enum SolidGraphError {
    /// A string could not be interpreted as an absolute IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// A document could not be parsed as Turtle
    #[error("Could not parse Turtle: {0}")]
    Parse(String),
}
