//! Test utilities for rate limit tests.

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockResponse, capacity, rejected};
