#![forbid(unsafe_code)]

//! Memoized views.
//!
//! Re-exports the [`tdom_core::lazy`] family so view modules can import
//! every helper from `tdom-html`. See that module for how argument identity
//! decides whether a view is re-run.

pub use tdom_core::lazy::{lazy, lazy2, lazy3, lazy4, lazy5, lazy6};
