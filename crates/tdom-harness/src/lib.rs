#![forbid(unsafe_code)]

//! Reference renderer and test harness for tdom.
//!
//! # Role in tdom
//! `tdom-harness` is the in-memory host engine. It implements the
//! [`Renderer`](tdom_render::Renderer) boundary with [`VirtualDom`], forces
//! resolved trees through a memoizing [`Session`], and gives tests
//! something concrete to look at: HTML markup, JSON snapshots, BLAKE3
//! checksums and event dispatch.
//!
//! # Key modules
//! - [`dom`]: unforced [`VNode`] and forced [`DomNode`] trees.
//! - [`session`]: render passes with position-keyed memo reuse.
//! - [`markup`]: HTML serialization rules.
//! - [`snapshot`]: serde snapshots of forced trees.
//! - [`golden`]: checksum files with bless mode.
//! - [`config`]: TOML/JSON harness configuration.
//! - [`fixtures`]: a small phrase catalog for tests and benchmarks.
//!
//! # Logging
//! Passes emit `tracing` events: a `render_pass` span, one debug event per
//! memo hit or miss, and a summary at the end of each pass. Install any
//! subscriber to see them.

pub mod config;
pub mod dom;
pub mod error;
pub mod fixtures;
pub mod golden;
pub mod markup;
pub mod session;
pub mod snapshot;

pub use config::{HarnessConfig, MarkupConfig};
pub use dom::{DomNode, Mapped, VNode, VirtualDom};
pub use error::HarnessError;
pub use golden::{GoldenOutcome, GoldenResult, check_golden, compute_markup_checksum};
pub use session::{RenderStats, Rendered, Session, Slot};
pub use snapshot::{KeyedSnapshot, NodeSnapshot};
