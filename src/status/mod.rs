//! Status page data model.
//!
//! # Data Flow
//! ```text
//! response body (JSON)
//!     → document.rs (defensive decode → StatusDocument)
//!     → taxonomy.rs (token → StatusCode)
//!     → probe::projector (gauges)
//! ```

pub mod document;
pub mod taxonomy;

pub use document::{ComponentEntry, DecodeError, StatusDocument};
pub use taxonomy::StatusCode;
