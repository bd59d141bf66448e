//! Content assembly for Lumière.
//!
//! - [`ContentAssembler`] turns a [`lumiere_core::Subject`] into a draft
//!   [`lumiere_core::ContentRecord`]: narrative text, a cover, and a gallery.
//! - [`PersonaGenerator`] invents a subject when the operator has none.
//! - [`extract_json`] / [`parse_json`] recover JSON from chatty model output.

mod assembler;
mod extraction;
mod persona;
mod progress;
pub mod prompts;
mod scenarios;

pub use assembler::ContentAssembler;
pub use extraction::{extract_json, parse_json};
pub use persona::{PersonaGenerator, PersonaTraits};
pub use progress::ProgressReporter;
pub use scenarios::ScenarioPool;
