//! SiteProbe command surface.
//!
//! Thin shell over the core crates: argument and event parsing, the
//! throttle-gated dispatcher, and plain-text rendering. The `siteprobe`
//! binary in `main.rs` only wires these together.

pub mod dispatch;
pub mod input;
pub mod render;

pub use dispatch::Dispatcher;
pub use input::{parse_event, Command};
