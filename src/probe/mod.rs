//! Probe engine.
//!
//! # Data Flow
//! ```text
//! raw `target` parameter
//!     → target.rs (validate, default scheme, summary endpoint)
//!     → client (fetch + retry + decode)
//!     → projector.rs (document → status gauges)
//!     → registry.rs (fresh per-probe recorder, rendered once)
//! ```
//!
//! # Design Decisions
//! - One registry per probe; nothing is registered globally
//! - The pipeline is linear: any failing step aborts the whole probe
//! - Malformed content degrades to Unknown; malformed shape or transport
//!   failure fails the probe

pub mod engine;
pub mod error;
pub mod projector;
pub mod registry;
pub mod target;

pub use engine::ProbeEngine;
pub use error::ProbeError;
pub use projector::{project, StatusSink};
pub use registry::ProbeRegistry;
