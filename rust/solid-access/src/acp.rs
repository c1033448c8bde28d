//! The Access Control Policy engine.
//!
//! An ACP Access Control Resource links Access Controls to Policies, and
//! Policies to Matchers through three combinators: `allOf` (every matcher
//! must hold), `anyOf` (at least one must hold) and `noneOf` (none may
//! hold). A policy with no positive matcher at all applies to no one.
//! Effective access is the union of the `allow` sets of every applying
//! policy minus the union of their `deny` sets — for any given mode, deny
//! wins over allow.
//!
//! Unlike WAC there is no ancestor walk here: the server resolves
//! inheritance and attaches one effective Access Control Resource per
//! protected resource. Inherited ("member") scope only matters when
//! writing, where [`set_target_access`] can link the maintained policy into
//! the member Access Control as well.

mod model;
pub use model::*;

mod read;
pub use read::*;

mod write;
pub use write::*;
