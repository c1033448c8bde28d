use crate::SolidGraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// An absolute IRI, validated at construction time.
///
/// Internally the IRI is kept in the normalized form produced by the `url`
/// crate, so two spellings of the same resource compare equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Iri(String);

impl Iri {
    /// Parse and validate an absolute IRI
    pub fn new(value: impl AsRef<str>) -> Result<Self, SolidGraphError> {
        let url = Url::parse(value.as_ref())
            .map_err(|error| SolidGraphError::InvalidIri(format!("{}: {error}", value.as_ref())))?;
        Ok(Iri(url.into()))
    }

    /// Construct an [`Iri`] from a string that is known to be a valid
    /// absolute IRI, such as a vocabulary constant. Validity is only checked
    /// in debug builds.
    pub fn from_static(value: &'static str) -> Self {
        debug_assert!(Url::parse(value).is_ok(), "invalid static IRI: {value}");
        Iri(value.to_owned())
    }

    /// The IRI as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve a (possibly relative) reference against this IRI
    pub fn join(&self, reference: &str) -> Result<Self, SolidGraphError> {
        let base = Url::parse(&self.0)
            .map_err(|error| SolidGraphError::InvalidIri(format!("{}: {error}", self.0)))?;
        let url = base
            .join(reference)
            .map_err(|error| SolidGraphError::InvalidIri(format!("{reference}: {error}")))?;
        Ok(Iri(url.into()))
    }

    /// A copy of this IRI with its fragment replaced
    pub fn with_fragment(&self, fragment: &str) -> Self {
        let mut url = Url::parse(&self.0).expect("Iri invariant: always a valid URL");
        url.set_fragment(Some(fragment));
        Iri(url.into())
    }

    /// The fragment of this IRI, if it has one
    pub fn fragment(&self) -> Option<&str> {
        self.0.split_once('#').map(|(_, fragment)| fragment)
    }

    /// Whether this IRI names a container (by Solid convention, a path that
    /// ends in a slash)
    pub fn is_container(&self) -> bool {
        match Url::parse(&self.0) {
            Ok(url) => url.path().ends_with('/'),
            Err(_) => false,
        }
    }

    /// The IRI of the container that holds this resource, or `None` when
    /// this IRI is already the root container of its origin.
    ///
    /// `https://pod.example/a/b` and `https://pod.example/a/b/` both resolve
    /// to `https://pod.example/a/`.
    pub fn parent_container(&self) -> Option<Self> {
        let mut url = Url::parse(&self.0).ok()?;
        url.set_fragment(None);
        url.set_query(None);

        let path = url.path();
        if path == "/" {
            return None;
        }

        let trimmed = path.trim_end_matches('/');
        let split = trimmed.rfind('/')?;
        let parent = path[..=split].to_owned();
        url.set_path(&parent);
        Some(Iri(url.into()))
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Iri {
    type Err = SolidGraphError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Iri::new(value)
    }
}

/// A blank (locally scoped) node label
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlankNode(String);

impl BlankNode {
    /// Construct a blank node with the given label
    pub fn new(label: impl Into<String>) -> Self {
        BlankNode(label.into())
    }

    /// The label of this blank node
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// An RDF literal: a lexical value with an optional language tag or datatype
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// The lexical form of the literal
    pub value: String,
    /// An optional language tag (mutually exclusive with `datatype`)
    pub language: Option<String>,
    /// An optional datatype IRI
    pub datatype: Option<Iri>,
}

impl Literal {
    /// A plain string literal
    pub fn string(value: impl Into<String>) -> Self {
        Literal {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }
}

/// The subject position of a [`Triple`](crate::Triple): an IRI or a blank
/// node
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// A named subject
    Iri(Iri),
    /// A locally scoped subject
    Blank(BlankNode),
}

impl Subject {
    /// The subject as an [`Iri`], when it is one
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Subject::Iri(iri) => Some(iri),
            Subject::Blank(_) => None,
        }
    }
}

impl From<Iri> for Subject {
    fn from(iri: Iri) -> Self {
        Subject::Iri(iri)
    }
}

impl From<BlankNode> for Subject {
    fn from(node: BlankNode) -> Self {
        Subject::Blank(node)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Iri(iri) => write!(f, "<{iri}>"),
            Subject::Blank(node) => write!(f, "{node}"),
        }
    }
}

/// Any RDF term that may appear in the object position of a
/// [`Triple`](crate::Triple)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A named node
    Iri(Iri),
    /// A locally scoped node
    Blank(BlankNode),
    /// A literal value
    Literal(Literal),
}

impl Term {
    /// The term as an [`Iri`], when it is one
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::Blank(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl From<Subject> for Term {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Iri(iri) => Term::Iri(iri),
            Subject::Blank(node) => Term::Blank(node),
        }
    }
}

impl TryFrom<Term> for Subject {
    type Error = SolidGraphError;

    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::Iri(iri) => Ok(Subject::Iri(iri)),
            Term::Blank(node) => Ok(Subject::Blank(node)),
            Term::Literal(literal) => Err(SolidGraphError::InvalidIri(format!(
                "a literal (\"{}\") cannot be the subject of a triple",
                literal.value
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_container_walks_one_level() -> Result<(), SolidGraphError> {
        let resource = Iri::new("https://some.pod/container/resource")?;
        assert_eq!(
            resource.parent_container(),
            Some(Iri::new("https://some.pod/container/")?)
        );

        let container = Iri::new("https://some.pod/container/")?;
        assert_eq!(
            container.parent_container(),
            Some(Iri::new("https://some.pod/")?)
        );

        let root = Iri::new("https://some.pod/")?;
        assert_eq!(root.parent_container(), None);
        Ok(())
    }

    #[test]
    fn parent_container_drops_fragment_and_query() -> Result<(), SolidGraphError> {
        let resource = Iri::new("https://some.pod/container/resource?v=2#section")?;
        assert_eq!(
            resource.parent_container(),
            Some(Iri::new("https://some.pod/container/")?)
        );
        Ok(())
    }

    #[test]
    fn container_detection_uses_the_trailing_slash() -> Result<(), SolidGraphError> {
        assert!(Iri::new("https://some.pod/container/")?.is_container());
        assert!(!Iri::new("https://some.pod/container/resource")?.is_container());
        Ok(())
    }

    #[test]
    fn relative_references_resolve_against_the_base() -> Result<(), SolidGraphError> {
        let base = Iri::new("https://some.pod/container/resource.acl")?;
        assert_eq!(
            base.join("#owner")?,
            Iri::new("https://some.pod/container/resource.acl#owner")?
        );
        assert_eq!(
            base.join("other")?,
            Iri::new("https://some.pod/container/other")?
        );
        Ok(())
    }
}
