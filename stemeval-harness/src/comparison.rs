/// Comparison of observed separation metrics against reference tables
///
/// Every instrument/metric pair on either side produces one outcome; a pair
/// present on only one side is a mismatch, never a skip.
use crate::reference::ReferenceTable;
use stemeval_core::error::{Result, StemevalError};
use stemeval_core::{Metric, MetricMap};
use std::collections::BTreeSet;
use std::fmt;

/// Differences below this are reported as exact
const EXACT_EPSILON: f64 = 1e-12;

/// Result of comparing one instrument/metric pair
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonResult {
    /// Perfect match
    Exact,
    /// Match within tolerance
    Acceptable(String),
    /// Mismatch beyond tolerance, or a key missing on one side
    Mismatch(String),
}

impl ComparisonResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ComparisonResult::Exact | ComparisonResult::Acceptable(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ComparisonResult::Exact => None,
            ComparisonResult::Acceptable(msg) | ComparisonResult::Mismatch(msg) => Some(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricOutcome {
    pub instrument: String,
    pub metric: String,
    pub observed: Option<f64>,
    pub expected: Option<f64>,
    pub result: ComparisonResult,
}

impl fmt::Display for MetricOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.result.is_ok() { "ok" } else { "FAIL" };
        write!(
            f,
            "{:<10} {:<6} {:>12} {:>12}  {}",
            self.instrument,
            self.metric,
            format_value(self.observed),
            format_value(self.expected),
            status
        )?;
        if let Some(msg) = self.result.message() {
            write!(f, " ({msg})")?;
        }
        Ok(())
    }
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.6}"))
}

/// Outcome of every comparison made for one evaluation run
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub tolerance: f64,
    pub outcomes: Vec<MetricOutcome>,
}

impl ComparisonReport {
    pub fn is_ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &MetricOutcome> {
        self.outcomes.iter().filter(|o| !o.result.is_ok())
    }

    pub fn outcome(&self, instrument: &str, metric: &str) -> Option<&MetricOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.instrument == instrument && o.metric == metric)
    }

    /// `Err(Mismatch)` naming every failing instrument/metric pair.
    pub fn into_result(self) -> Result<Self> {
        if self.is_ok() {
            return Ok(self);
        }
        let lines: Vec<String> = self
            .failures()
            .map(|o| {
                format!(
                    "  {}/{}: {}",
                    o.instrument,
                    o.metric,
                    o.result.message().unwrap_or("mismatch")
                )
            })
            .collect();
        Err(StemevalError::Mismatch(lines.join("\n")))
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:<6} {:>12} {:>12}  (tolerance {})",
            "instrument", "metric", "observed", "expected", self.tolerance
        )?;
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        let failed = self.failures().count();
        write!(
            f,
            "{} compared, {} failed",
            self.outcomes.len(),
            failed
        )
    }
}

/// Compare a median against an expected value with an absolute tolerance
pub fn compare_value(observed: Option<f64>, expected: Option<f64>, tolerance: f64) -> ComparisonResult {
    match (observed, expected) {
        (Some(a), Some(b)) => {
            let diff = (a - b).abs();
            if diff < EXACT_EPSILON {
                ComparisonResult::Exact
            } else if diff <= tolerance {
                ComparisonResult::Acceptable(format!(
                    "differs by {diff:.2e} (within ±{tolerance} tolerance)"
                ))
            } else {
                ComparisonResult::Mismatch(format!(
                    "observed {a:.6}, expected {b:.6}, differs by {diff:.2e} (exceeds ±{tolerance} tolerance)"
                ))
            }
        }
        (None, Some(b)) => {
            ComparisonResult::Mismatch(format!("no finite observed value, expected {b:.6}"))
        }
        (Some(a), None) => {
            ComparisonResult::Mismatch(format!("observed {a:.6} has no reference value"))
        }
        (None, None) => ComparisonResult::Mismatch("neither side has a value".to_owned()),
    }
}

/// Compare every observed median with the reference table, both directions.
pub fn compare_metrics(
    observed: &MetricMap,
    reference: &ReferenceTable,
    tolerance: f64,
) -> ComparisonReport {
    let mut outcomes = Vec::new();
    let mut seen = BTreeSet::new();

    for (instrument, metric, values) in observed.iter() {
        let observed_median = values.median();
        let expected = reference.expected(instrument, metric);
        let result = if expected.is_none() {
            ComparisonResult::Mismatch(format!(
                "{instrument}/{metric} is not in the {} reference table",
                reference.backend
            ))
        } else {
            compare_value(observed_median, expected, tolerance)
        };

        seen.insert((instrument.to_owned(), metric.to_owned()));
        outcomes.push(MetricOutcome {
            instrument: instrument.to_owned(),
            metric: metric.to_owned(),
            observed: observed_median,
            expected,
            result,
        });
    }

    for (stem, metric, expected) in reference.iter() {
        let key = (stem.as_str().to_owned(), metric.as_str().to_owned());
        if seen.contains(&key) {
            continue;
        }
        let result = ComparisonResult::Mismatch(if observed.instrument(stem.as_str()).is_none() {
            format!("instrument {stem} missing from evaluator output")
        } else {
            format!("metric {metric} missing for {stem} in evaluator output")
        });
        outcomes.push(MetricOutcome {
            instrument: key.0,
            metric: key.1,
            observed: None,
            expected: Some(expected),
            result,
        });
    }

    ComparisonReport {
        tolerance,
        outcomes,
    }
}

/// Known metric names, used to flag unexpected keys early in logs
pub fn is_known_metric(name: &str) -> bool {
    name.parse::<Metric>().is_ok()
}
