//! Core data types for the Lumière content pipeline.
//!
//! This crate provides the record model shared by the generator, the assembler and
//! every persistence adapter, plus the request/payload types spoken with the
//! generation endpoint.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod legacy;
mod media;
mod narrative;
mod record;
mod request;
mod subject;

pub use legacy::normalize_legacy;
pub use media::{MediaAsset, MediaSet};
pub use narrative::{Faq, Narrative};
pub use record::{ContentRecord, PublicationState, RecordId, sort_newest_first};
pub use request::{GeneratedPayload, GenerationKind, GenerationRequest, GenerationRequestBuilder};
pub use subject::Subject;
