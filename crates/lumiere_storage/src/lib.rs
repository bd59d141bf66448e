//! Persistence adapters and the in-process record catalog.
//!
//! Every adapter implements [`lumiere_interface::ContentStore`]:
//!
//! | Adapter | Kind | Backing |
//! |---------|------|---------|
//! | [`InMemoryContentStore`] | local | process memory |
//! | [`FileSystemContentStore`] | local | one JSON file per record |
//! | [`WebhookRelayStore`] | remote | automation webhook |
//! | [`DocumentStore`] | remote | PostgREST table + object storage |
//! | [`GitContentStore`] | remote | git hosting contents API |
//!
//! Local adapters hold drafts. Remote adapters confirm publication.
//! [`ContentCatalog`] keeps the in-process list of records in sync with both.

mod catalog;
mod document;
mod factory;
mod filesystem;
mod git;
mod http;
mod memory;
mod transcode;
mod webhook;

pub use catalog::ContentCatalog;
pub use document::DocumentStore;
pub use factory::{StoreSet, open_stores};
pub use filesystem::FileSystemContentStore;
pub use git::GitContentStore;
pub use memory::InMemoryContentStore;
pub use transcode::MediaTranscoder;
pub use webhook::WebhookRelayStore;
