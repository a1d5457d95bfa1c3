//! A headless windowed list engine for rendering huge collections.
//!
//! For data-source adapters (infinite loading, filtering), see the
//! `windowed-adapter` crate.
//!
//! This crate owns the algorithmic core of list virtualization: given a
//! scroll offset and viewport size, decide *which* indices of an
//! arbitrarily large collection are realized and *where* they are
//! positioned, in O(window) time per scroll event. It covers one-axis lists
//! ([`WindowedList`]) and two-axis grids ([`WindowedGrid`]), both built on
//! the same closed-form per-axis arithmetic ([`AxisLayout`]).
//!
//! The engine is UI-agnostic; the host layer (TUI, GUI, DOM) supplies:
//! - viewport geometry (sizes per axis)
//! - scroll offsets
//! - the actual rendering of each realized index
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod grid;
mod layout;
mod list;
mod options;
mod types;


pub use error::LayoutError;
pub use grid::WindowedGrid;
pub use layout::AxisLayout;
pub use list::WindowedList;
pub use options::{GridOptions, ListOptions, OnChangeCallback};
pub use types::{
    Align, GridCell, Placement, ScrollDirection, Viewport, VisibleRange, WindowItem,
};
