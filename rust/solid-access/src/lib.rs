#![warn(missing_docs)]

//! A client library for inspecting and mutating the access-control rules
//! that govern Linked Data resources on Solid pods.
//!
//! Two authorization models are supported: legacy Web Access Control
//! ([`wac`]) and Access Control Policies ([`acp`]). For both, this crate
//! discovers the authorization resource that governs a target resource
//! (falling back to an ancestor container's ACL where WAC allows it),
//! parses it into a typed in-memory access model, computes effective access
//! per actor, and writes partial updates back without disturbing unrelated
//! grants.
//!
//! All network access goes through a caller-supplied [`Fetch`]
//! implementation; [`ReqwestFetch`] is the batteries-included default.
//! Reads that find no reachable authorization resource resolve to `None`
//! rather than failing, and a save that the server rejects also resolves to
//! `None` — only caller-input errors (such as requesting unequal
//! control-read/control-write under WAC) are surfaced as [`SolidAccessError`].
//!
//! ```ignore
//! use solid_access::{ReqwestFetch, wac};
//! use solid_access_graph::Iri;
//!
//! let fetch = ReqwestFetch::default();
//! let resource = Iri::new("https://some.pod/resource")?;
//! let agent = Iri::new("https://some.pod/profile#agent")?;
//!
//! if let Some(access) = wac::agent_access(&resource, &agent, &fetch).await? {
//!     println!("may read: {}", access.read);
//! }
//! ```

pub use solid_access_graph as graph;

mod error;
pub use error::*;

mod modes;
pub use modes::*;

mod actor;
pub use actor::*;

mod fetch;
pub use fetch::*;

mod metadata;
pub use metadata::*;

mod locator;
pub use locator::*;

pub mod wac;

pub mod acp;

mod effective;
pub use effective::*;

#[cfg(feature = "helpers")]
pub mod helpers;
