use crate::{Iri, Subject, Term, Triple};

/// The basic query system for selecting [`Triple`]s from a
/// [`Graph`](crate::Graph). You can assign its fields directly, but for
/// convenience it can also be built up incrementally with the `with_*`
/// methods.
///
/// A field that is `None` matches any value in that position; a
/// [`TripleSelector`] with all fields unset selects every triple in the
/// graph.
#[derive(Clone, Debug, Default)]
pub struct TripleSelector {
    /// Constrains the subject of selected [`Triple`]s, when set
    pub subject: Option<Subject>,
    /// Constrains the predicate of selected [`Triple`]s, when set
    pub predicate: Option<Iri>,
    /// Constrains the object of selected [`Triple`]s, when set
    pub object: Option<Term>,
}

impl TripleSelector {
    /// Set the subject field of the [`TripleSelector`]
    pub fn with_subject(mut self, subject: impl Into<Subject>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the predicate field of the [`TripleSelector`]
    pub fn with_predicate(mut self, predicate: Iri) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Set the object field of the [`TripleSelector`]
    pub fn with_object(mut self, object: impl Into<Term>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Whether the given [`Triple`] satisfies every constraint of this
    /// selector
    pub fn matches(&self, triple: &Triple) -> bool {
        if let Some(subject) = &self.subject {
            if subject != &triple.subject {
                return false;
            }
        }
        if let Some(predicate) = &self.predicate {
            if predicate != &triple.predicate {
                return false;
            }
        }
        if let Some(object) = &self.object {
            if object != &triple.object {
                return false;
            }
        }
        true
    }
}
