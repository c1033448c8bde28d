#![warn(missing_docs)]

//! A typed triple repository for Solid authorization graphs.
//!
//! This package holds the in-memory representation of WAC ACLs and ACP
//! Access Control Resources: IRIs, blank nodes, literals, triples and an
//! insertion-ordered [`Graph`] that supports pattern queries via
//! [`TripleSelector`]. A deliberately narrow Turtle codec lives at the
//! boundary ([`parse_turtle`] / [`serialize_turtle`]); everything above it
//! operates on typed terms only.
//!
//! ```rust
//! use solid_access_graph::{Graph, Iri, Triple, TripleSelector, vocab};
//!
//! # fn main() -> Result<(), solid_access_graph::SolidGraphError> {
//! let mut graph = Graph::default();
//! let rule = Iri::new("https://some.pod/resource.acl#owner")?;
//! graph.insert(Triple::new(
//!     rule.clone(),
//!     vocab::rdf::type_(),
//!     vocab::acl::authorization(),
//! ));
//!
//! let rules = graph.select(
//!     &TripleSelector::default()
//!         .with_predicate(vocab::rdf::type_())
//!         .with_object(vocab::acl::authorization()),
//! );
//! assert_eq!(rules.len(), 1);
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::*;

mod term;
pub use term::*;

mod triple;
pub use triple::*;

mod selector;
pub use selector::*;

mod graph;
pub use graph::*;

pub mod vocab;

mod turtle;
pub use turtle::*;
