#![warn(missing_docs)]

//! Shared helpers for the `solid-access` family of crates.
//!
//! The only things that live here are the cross-target bound compatibility
//! traits that let the rest of the workspace compile for both native targets
//! (where futures cross threads and must be `Send`) and
//! `wasm32-unknown-unknown` (where they never do).

mod sync;
pub use sync::*;
