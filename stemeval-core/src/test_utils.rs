//! Shared test utilities for the stemeval workspace
//!
//! Builders for metric maps used across the harness and binary test
//! suites. Only available when the "test-utils" feature is enabled.

use crate::metrics::{Metric, MetricMap};
use crate::stem::Stem;

/// Build a metric map holding a single value per instrument/metric
///
/// # Examples
///
/// ```
/// # use stemeval_core::test_utils::metric_map_from;
/// let map = metric_map_from(&[("vocals", "SDR", 1.5)]);
/// assert_eq!(map.get("vocals", "SDR").unwrap().median(), Some(1.5));
/// ```
pub fn metric_map_from(entries: &[(&str, &str, f64)]) -> MetricMap {
    let mut map = MetricMap::new();
    for (instrument, metric, value) in entries {
        map.push(instrument, metric, *value);
    }
    map
}

/// Build a full 4-stem metric map where every value comes from `value_of`
pub fn four_stem_map<F>(mut value_of: F) -> MetricMap
where
    F: FnMut(Stem, Metric) -> f64,
{
    let mut map = MetricMap::new();
    for stem in Stem::INSTRUMENTS {
        for metric in Metric::ALL {
            map.push(stem.as_str(), metric.as_str(), value_of(stem, metric));
        }
    }
    map
}

/// Build a metric map with several per-song values for one pair
pub fn metric_map_with_values(instrument: &str, metric: &str, values: &[f64]) -> MetricMap {
    let mut map = MetricMap::new();
    for value in values {
        map.push(instrument, metric, *value);
    }
    map
}
