//! Data-source adapters for the `windowed` crate.
//!
//! The `windowed` crate is UI-agnostic and focuses on the core math and
//! state. This crate provides small, framework-neutral wrappers for the two
//! data-source shapes list hosts commonly sit on:
//!
//! - Incremental/infinite loading ([`InfiniteLoader`]): a near-end-of-scroll
//!   detector that asks a "fetch more" collaborator for the next page, at
//!   most once per in-flight request.
//! - Filtering/search ([`FilteredWindow`]): re-derives the backing
//!   collection through an external predicate before windowing.
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui/DOM
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod filter;
mod infinite;

#[cfg(test)]
mod tests;

pub use filter::{FilteredWindow, MatchPredicate};
pub use infinite::{InfiniteLoader, LoadMoreCallback, LoadState};
