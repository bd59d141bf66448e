//! Error types for the Lumière content pipeline.
//!
//! This crate provides the foundation error types used throughout the Lumière workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use lumiere_error::{LumiereResult, StorageError, StorageErrorKind};
//!
//! fn fetch_record() -> LumiereResult<String> {
//!     Err(StorageError::new(StorageErrorKind::Unavailable("connection refused".into())))?
//! }
//!
//! match fetch_record() {
//!     Ok(record) => println!("Got: {}", record),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod config;
mod error;
mod generation;
mod json;
mod parse;
mod storage;

pub use assembly::{AssemblyError, AssemblyErrorKind};
pub use config::ConfigError;
pub use error::{LumiereError, LumiereErrorKind, LumiereResult};
pub use generation::{GenerationError, GenerationErrorKind, RetryableError};
pub use json::JsonError;
pub use parse::ParseError;
pub use storage::{StorageError, StorageErrorKind};
