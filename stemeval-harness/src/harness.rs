use crate::comparison::{ComparisonReport, compare_metrics, is_known_metric};
use crate::entrypoint::{EvaluateArgs, EvaluationEntrypoint};
use crate::reference::ReferenceTable;
use stemeval_core::config::Config;
use stemeval_core::error::{Result, StemevalError};
use stemeval_core::{Backend, MetricMap, Preset};
use stemeval_fixtures::{DatasetLayout, FakeDatasetGenerator, FakeDatasetSpec};
use std::path::Path;
use tempfile::TempDir;
use tracing::{info, warn};

/// Drives an evaluation entrypoint and checks its metrics against the
/// reference tables.
pub struct EvaluationHarness<E: EvaluationEntrypoint> {
    entrypoint: E,
    backend: Backend,
    mwf: bool,
    tolerance: f64,
}

impl<E: EvaluationEntrypoint> EvaluationHarness<E> {
    pub fn new(entrypoint: E) -> Self {
        Self {
            entrypoint,
            backend: Backend::default(),
            mwf: false,
            tolerance: 1e-3,
        }
    }

    /// Harness settings taken from the `[evaluator]` and `[comparison]` sections
    pub fn from_config(entrypoint: E, config: &Config) -> Self {
        Self {
            entrypoint,
            backend: config.evaluator.backend,
            mwf: config.evaluator.mwf,
            tolerance: config.comparison.tolerance,
        }
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_mwf(mut self, mwf: bool) -> Self {
        self.mwf = mwf;
        self
    }

    pub fn entrypoint(&self) -> &E {
        &self.entrypoint
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Evaluate `preset` on the dataset at `dataset_dir`, writing tool output
    /// under `output_path`.
    pub fn run(&self, output_path: &Path, preset: &str, dataset_dir: &Path) -> Result<MetricMap> {
        self.run_with_backend(output_path, preset, dataset_dir, self.backend)
    }

    fn run_with_backend(
        &self,
        output_path: &Path,
        preset: &str,
        dataset_dir: &Path,
        backend: Backend,
    ) -> Result<MetricMap> {
        let params = Preset::load(preset)?;
        let subset = DatasetLayout::new(dataset_dir).subset_dir();
        if !subset.is_dir() {
            return Err(StemevalError::NotFound(format!(
                "Dataset has no test subset: {}",
                subset.display()
            )));
        }

        let args = EvaluateArgs::new(preset, dataset_dir, output_path)
            .with_backend(backend)
            .with_mwf(self.mwf);
        let metrics = self.entrypoint.evaluate(&args, &params)?;

        for (instrument, metric, values) in metrics.iter() {
            if !is_known_metric(metric) {
                warn!("Evaluator reported unknown metric {}/{}", instrument, metric);
            }
            if values.is_empty() {
                warn!("Evaluator reported no values for {}/{}", instrument, metric);
            }
        }
        info!(
            "Evaluation returned {} instruments",
            metrics.instruments().count()
        );
        Ok(metrics)
    }

    /// Compare `metrics` with the reference table for `preset` under this
    /// harness's backend.
    pub fn check(&self, metrics: &MetricMap, preset: &str) -> Result<ComparisonReport> {
        self.check_with_backend(metrics, preset, self.backend)
    }

    fn check_with_backend(
        &self,
        metrics: &MetricMap,
        preset: &str,
        backend: Backend,
    ) -> Result<ComparisonReport> {
        let params = Preset::load(preset)?;
        let table = ReferenceTable::lookup(&params, backend)?;
        let report = compare_metrics(metrics, table, self.tolerance);
        info!(
            "Compared {} metrics against the {} reference, {} failed",
            report.outcomes.len(),
            backend,
            report.failures().count()
        );
        Ok(report)
    }

    /// Run and check with tool output kept in a throwaway directory.
    pub fn run_and_compare(&self, preset: &str, dataset_dir: &Path) -> Result<ComparisonReport> {
        let output = TempDir::new()?;
        let metrics = self.run(output.path(), preset, dataset_dir)?;
        self.check(&metrics, preset)
    }

    /// Evaluate under `backend` and fail with `Mismatch` unless every metric
    /// matches its reference.
    pub fn run_and_check(
        &self,
        dataset_dir: &Path,
        preset: &str,
        backend: Backend,
    ) -> Result<ComparisonReport> {
        let output = TempDir::new()?;
        let metrics = self.run_with_backend(output.path(), preset, dataset_dir, backend)?;
        self.check_with_backend(&metrics, preset, backend)?.into_result()
    }

    /// Generate a fake dataset in a scoped temporary directory, then run and
    /// check against it.
    pub fn run_on_fake_dataset(
        &self,
        spec: &FakeDatasetSpec,
        preset: &str,
    ) -> Result<ComparisonReport> {
        let dataset_dir = TempDir::new()?;
        FakeDatasetGenerator::new().generate(dataset_dir.path(), spec)?;
        self.run_and_compare(preset, dataset_dir.path())
    }
}
