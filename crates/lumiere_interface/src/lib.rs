//! Capability traits for the Lumière workspace.
//!
//! The assembler and the catalog depend only on these traits, never on a concrete
//! generation endpoint or storage backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ContentStore, GenerationDriver};
