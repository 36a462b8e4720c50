//! Status page client.
//!
//! # Responsibilities
//! - Issue the outbound GET with a per-attempt timeout
//! - Retry transient failures with backoff (see `resilience`)
//! - Decode the body into a `StatusDocument`
//!
//! # Design Decisions
//! - Exactly one network call per attempt; the caller never retries
//! - Dropping the fetch future abandons the in-flight request and any
//!   pending backoff

pub mod error;
pub mod fetch;

pub use error::FetchError;
pub use fetch::StatusPageClient;
