//! A deliberately narrow Turtle codec.
//!
//! This is not a general-purpose Turtle implementation: it covers the
//! subset that Solid servers emit for WAC ACLs and ACP Access Control
//! Resources (prefix and base directives, IRIs and prefixed names, labelled
//! blank nodes, `a`, predicate lists with `;`, object lists with `,`, and
//! string literals with language tags or datatypes). Collections, anonymous
//! blank-node property lists and numeric literals are out of scope here.

mod parse;
pub use parse::*;

mod serialize;
pub use serialize::*;
