/// Compilation of per-track museval reports into a metric map
///
/// The evaluation tool writes one JSON report per track under
/// `{output}/test/`. Each report holds per-frame values for every target;
/// a track contributes the median of its non-NaN frames to each
/// instrument/metric sequence, or NaN when it has none.
use serde::Deserialize;
use stemeval_core::error::{Result, StemevalError};
use stemeval_core::metrics::median;
use stemeval_core::MetricMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
pub struct TrackReport {
    #[serde(default)]
    pub name: Option<String>,
    pub targets: Vec<TargetReport>,
}

#[derive(Debug, Deserialize)]
pub struct TargetReport {
    pub name: String,
    pub frames: Vec<FrameReport>,
}

#[derive(Debug, Deserialize)]
pub struct FrameReport {
    /// Missing values are written as `null` for silent frames
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl TrackReport {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            StemevalError::Metrics(format!("Failed to parse report {}: {}", path.display(), e))
        })
    }

    /// Push this track's per-metric medians into `metrics`.
    ///
    /// A metric with no finite frame contributes NaN for this track.
    pub fn accumulate(&self, metrics: &mut MetricMap) {
        for target in &self.targets {
            let mut per_metric: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
            for frame in &target.frames {
                for (metric, value) in &frame.metrics {
                    per_metric
                        .entry(metric.as_str())
                        .or_default()
                        .push(value.unwrap_or(f64::NAN));
                }
            }

            for (metric, values) in per_metric {
                let value = median(&values).unwrap_or_else(|| {
                    warn!(
                        "No finite {} frames for {} in {}",
                        metric,
                        target.name,
                        self.name.as_deref().unwrap_or("<unnamed track>")
                    );
                    f64::NAN
                });
                metrics.push(&target.name, metric, value);
            }
        }
    }
}

/// Report files under `{output}/test/`, sorted by path.
pub fn report_paths(output_path: &Path) -> Result<Vec<PathBuf>> {
    let reports_dir = output_path.join("test");
    if !reports_dir.is_dir() {
        return Err(StemevalError::Evaluation(format!(
            "No metrics directory at {}",
            reports_dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(&reports_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Build the metric map from every report the evaluation tool wrote.
pub fn compile_metrics(output_path: &Path) -> Result<MetricMap> {
    let paths = report_paths(output_path)?;
    if paths.is_empty() {
        return Err(StemevalError::Evaluation(format!(
            "No metric reports found in {}",
            output_path.join("test").display()
        )));
    }

    let mut metrics = MetricMap::new();
    for path in &paths {
        debug!("Reading metrics report {}", path.display());
        TrackReport::load(path)?.accumulate(&mut metrics);
    }
    Ok(metrics)
}
