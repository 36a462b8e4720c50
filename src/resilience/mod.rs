//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Fetch attempt against a status page:
//!     → per-attempt timeout (client)
//!     → On transient failure: retries.rs (attempt budget)
//!     → backoff.rs (exponential delay + jitter before the next attempt)
//! ```
//!
//! # Design Decisions
//! - Every outbound call has a deadline
//! - Retries are bounded so a scrape caller can rely on an outer timeout

pub mod backoff;
pub mod retries;

pub use retries::RetryPolicy;
