use crate::error::{Result, StemevalError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Source-separation quality metric reported per instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "SDR")]
    Sdr,
    #[serde(rename = "SAR")]
    Sar,
    #[serde(rename = "SIR")]
    Sir,
    #[serde(rename = "ISR")]
    Isr,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Sdr, Metric::Sar, Metric::Sir, Metric::Isr];

    pub const fn as_str(self) -> &'static str {
        match self {
            Metric::Sdr => "SDR",
            Metric::Sar => "SAR",
            Metric::Sir => "SIR",
            Metric::Isr => "ISR",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = StemevalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SDR" => Ok(Metric::Sdr),
            "SAR" => Ok(Metric::Sar),
            "SIR" => Ok(Metric::Sir),
            "ISR" => Ok(Metric::Isr),
            _ => Err(StemevalError::Metrics(format!("Unknown metric: {s}"))),
        }
    }
}

/// Ordered sequence of values for one instrument/metric pair.
///
/// The evaluation tool reports one value per evaluated song (itself a median
/// over frames); the harness reduces the sequence with [`MetricValues::median`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricValues(Vec<f64>);

impl MetricValues {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Median across songs.
    ///
    /// A NaN entry marks a song without a usable value and poisons the
    /// whole sequence, so the result is `None` whenever one is present or
    /// the sequence is empty.
    pub fn median(&self) -> Option<f64> {
        if self.0.iter().any(|v| v.is_nan()) {
            return None;
        }
        median(&self.0)
    }
}

impl From<Vec<f64>> for MetricValues {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromIterator<f64> for MetricValues {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// NaN-skipping median of a slice, used to reduce per-frame values.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// instrument name -> metric name -> values
///
/// Keys are kept as the strings the evaluation tool reported so that
/// unexpected instruments or metrics survive until comparison, where they
/// are flagged instead of silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricMap(BTreeMap<String, BTreeMap<String, MetricValues>>);

impl MetricMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instrument: &str, metric: &str, value: f64) {
        self.0
            .entry(instrument.to_owned())
            .or_default()
            .entry(metric.to_owned())
            .or_default()
            .push(value);
    }

    pub fn insert(&mut self, instrument: &str, metric: &str, values: MetricValues) {
        self.0
            .entry(instrument.to_owned())
            .or_default()
            .insert(metric.to_owned(), values);
    }

    pub fn get(&self, instrument: &str, metric: &str) -> Option<&MetricValues> {
        self.0.get(instrument).and_then(|m| m.get(metric))
    }

    pub fn instrument(&self, instrument: &str) -> Option<&BTreeMap<String, MetricValues>> {
        self.0.get(instrument)
    }

    pub fn remove_instrument(&mut self, instrument: &str) -> Option<BTreeMap<String, MetricValues>> {
        self.0.remove(instrument)
    }

    pub fn instruments(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &MetricValues)> {
        self.0.iter().flat_map(|(instrument, metrics)| {
            metrics
                .iter()
                .map(move |(metric, values)| (instrument.as_str(), metric.as_str(), values))
        })
    }

    /// Median per instrument/metric, `None` where no finite value exists.
    pub fn medians(&self) -> BTreeMap<String, BTreeMap<String, Option<f64>>> {
        self.0
            .iter()
            .map(|(instrument, metrics)| {
                let reduced = metrics
                    .iter()
                    .map(|(metric, values)| (metric.clone(), values.median()))
                    .collect();
                (instrument.clone(), reduced)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StemevalError::Metrics(format!("Failed to serialize metrics: {e}")))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| StemevalError::Metrics(format!("Failed to parse metrics: {e}")))
    }
}
