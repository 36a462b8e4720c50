//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / environment
//!     + config file (TOML, optional)
//!     → loader.rs (parse, overlay, deserialize)
//!     → validation.rs (semantic checks)
//!     → ExporterConfig (validated, immutable)
//!     → passed by reference into the probe engine and server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; nothing reads it through a global
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve_config, CliArgs, ConfigError};
pub use schema::{ClientConfig, ExporterConfig, LogConfig, LogFormat, ServerConfig};
pub use validation::ValidationError;
