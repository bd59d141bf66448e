//! Test utilities for storage tests.

pub mod http_stub;
pub mod stubs;

#[allow(unused_imports)]
pub use http_stub::{Route, StubRequest, StubServer};
#[allow(unused_imports)]
pub use stubs::{FailingStore, GatedStore, RecordingStore, StubDriver, sample_record};
