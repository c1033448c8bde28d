use crate::{Iri, Subject, Term, Triple, TripleSelector};
use indexmap::IndexSet;

/// An insertion-ordered set of [`Triple`]s.
///
/// Insertion order is preserved across queries and serialization so that a
/// parse → edit → serialize round trip produces stable output. All edits go
/// through [`Graph::insert`] and the removal methods; mutation never happens
/// behind the caller's back, and [`Graph`] is cheap enough to clone that the
/// access engines always operate on a copy of their input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    /// Add a [`Triple`] to the graph. Returns `false` when an identical
    /// triple was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Remove a [`Triple`] from the graph, preserving the order of the
    /// remaining triples. Returns `false` when the triple was not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.shift_remove(triple)
    }

    /// Whether an identical [`Triple`] is present in the graph
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// The number of triples in the graph
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph holds no triples at all
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All triples that satisfy the given [`TripleSelector`], in insertion
    /// order
    pub fn select(&self, selector: &TripleSelector) -> Vec<&Triple> {
        self.triples
            .iter()
            .filter(|triple| selector.matches(triple))
            .collect()
    }

    /// Remove every triple that satisfies the given [`TripleSelector`],
    /// returning how many were removed
    pub fn remove_matching(&mut self, selector: &TripleSelector) -> usize {
        let before = self.triples.len();
        self.triples.retain(|triple| !selector.matches(triple));
        before - self.triples.len()
    }

    /// Remove every triple with the given subject, returning how many were
    /// removed
    pub fn remove_about(&mut self, subject: &Subject) -> usize {
        self.remove_matching(&TripleSelector::default().with_subject(subject.clone()))
    }

    /// All objects related to `subject` via `predicate`
    pub fn objects(&self, subject: &Subject, predicate: &Iri) -> Vec<&Term> {
        self.triples
            .iter()
            .filter(|triple| &triple.subject == subject && &triple.predicate == predicate)
            .map(|triple| &triple.object)
            .collect()
    }

    /// All IRI-valued objects related to `subject` via `predicate`,
    /// skipping blank nodes and literals
    pub fn iri_objects(&self, subject: &Subject, predicate: &Iri) -> Vec<&Iri> {
        self.objects(subject, predicate)
            .into_iter()
            .filter_map(Term::as_iri)
            .collect()
    }

    /// All distinct subjects that relate to `object` via `predicate`
    pub fn subjects_with(&self, predicate: &Iri, object: &Term) -> Vec<&Subject> {
        let mut subjects = Vec::new();
        for triple in &self.triples {
            if &triple.predicate == predicate
                && &triple.object == object
                && !subjects.contains(&&triple.subject)
            {
                subjects.push(&triple.subject);
            }
        }
        subjects
    }

    /// Whether the graph relates `subject` to `object` via `predicate`
    pub fn has(&self, subject: &Subject, predicate: &Iri, object: &Term) -> bool {
        self.triples.iter().any(|triple| {
            &triple.subject == subject
                && &triple.predicate == predicate
                && &triple.object == object
        })
    }

    /// Add every triple from `other` to this graph
    pub fn extend(&mut self, other: impl IntoIterator<Item = Triple>) {
        for triple in other {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::default();
        graph.extend(iter);
        graph
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = indexmap::set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}
