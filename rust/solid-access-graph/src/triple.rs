use crate::{Iri, Subject, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single statement: subject, predicate and object
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// The node the statement is about
    pub subject: Subject,
    /// The property relating subject to object
    pub predicate: Iri,
    /// The value of the property
    pub object: Term,
}

impl Triple {
    /// Construct a [`Triple`] from anything convertible into its three parts
    pub fn new(
        subject: impl Into<Subject>,
        predicate: Iri,
        object: impl Into<Term>,
    ) -> Self {
        Triple {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {:?} .", self.subject, self.predicate, self.object)
    }
}
