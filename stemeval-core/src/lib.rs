#![allow(clippy::cargo_common_metadata)]

pub mod backend;
pub mod config;
pub mod error;
pub mod metrics;
pub mod preset;
pub mod stem;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use backend::Backend;
pub use error::{Result, StemevalError};
pub use metrics::{Metric, MetricMap, MetricValues};
pub use preset::Preset;
pub use stem::Stem;
