//! Concertina - a per-display accordion window tiler with leader-key navigation.
//!
//! Every monitor is carved into containers by its layout. Windows sharing a
//! container are stacked as an accordion: one size, staggered by a small
//! offset so the neighbours of the focused window stay visible at its edges.
//! A leader key opens a modal layer whose single-key bindings switch layouts,
//! move focus and move windows between containers.
//!
//! # Modules
//!
//! - [`tiling`]: state model, layout engine, animation and the orchestrator
//! - [`hotkey`]: key tables, compiled bindings and the leader state machine
//! - [`config`]: JSONC configuration, the shared snapshot and hot reload
//! - [`app`]: wiring all of the above into a running tiler
//! - [`cli`]: the `concertina` command-line interface

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod hotkey;
pub mod schema;
pub mod tiling;

pub use app::Concertina;
pub use error::ConcertinaError;
