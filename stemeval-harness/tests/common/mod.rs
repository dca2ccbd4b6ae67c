//! Shared helpers for harness integration tests
#![allow(dead_code)]

use serde_json::{Value, json};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use stemeval_core::error::{Result, StemevalError};
use stemeval_core::test_utils::four_stem_map;
use stemeval_core::{MetricMap, Preset};
use stemeval_harness::{EvaluateArgs, EvaluationEntrypoint, ReferenceTable};

/// Entrypoint returning a fixed metric map and recording each call
pub struct StaticEntrypoint {
    metrics: MetricMap,
    calls: RefCell<Vec<EvaluateArgs>>,
}

impl StaticEntrypoint {
    pub fn new(metrics: MetricMap) -> Self {
        Self {
            metrics,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<EvaluateArgs> {
        self.calls.borrow().clone()
    }
}

impl EvaluationEntrypoint for StaticEntrypoint {
    fn evaluate(&self, args: &EvaluateArgs, _preset: &Preset) -> Result<MetricMap> {
        self.calls.borrow_mut().push(args.clone());
        Ok(self.metrics.clone())
    }
}

/// Entrypoint that always fails like a crashed evaluation
pub struct FailingEntrypoint;

impl EvaluationEntrypoint for FailingEntrypoint {
    fn evaluate(&self, _args: &EvaluateArgs, _preset: &Preset) -> Result<MetricMap> {
        Err(StemevalError::Evaluation("model checkpoint not found".to_owned()))
    }
}

/// Metric map holding exactly the reference values of `table`
pub fn reference_map(table: &ReferenceTable) -> MetricMap {
    four_stem_map(|stem, metric| {
        table
            .instrument(stem.as_str())
            .map(|r| r.get(metric))
            .unwrap_or(f64::NAN)
    })
}

/// A dataset directory with an empty test subset
pub fn empty_dataset(root: &Path) -> PathBuf {
    let dir = root.join("musdb");
    std::fs::create_dir_all(dir.join("test")).unwrap();
    dir
}

/// Museval-style report where each target has two frames at the reference
/// value plus one silent frame written as `null`.
pub fn track_report(name: &str, table: &ReferenceTable) -> Value {
    let targets: Vec<Value> = table
        .entries
        .iter()
        .map(|(stem, reference)| {
            let frame = json!({
                "time": 0.0,
                "duration": 1.0,
                "metrics": {
                    "SDR": reference.sdr,
                    "SAR": reference.sar,
                    "SIR": reference.sir,
                    "ISR": reference.isr,
                }
            });
            let silent = json!({
                "time": 2.0,
                "duration": 1.0,
                "metrics": { "SDR": null, "SAR": null, "SIR": null, "ISR": null }
            });
            json!({
                "name": stem.as_str(),
                "frames": [frame.clone(), frame, silent],
            })
        })
        .collect();
    json!({ "name": name, "targets": targets })
}

/// Museval-style report where every frame of every target is silent
pub fn silent_track_report(name: &str, table: &ReferenceTable) -> Value {
    let targets: Vec<Value> = table
        .instruments()
        .map(|stem| {
            let silent = json!({
                "time": 0.0,
                "duration": 1.0,
                "metrics": { "SDR": null, "SAR": null, "SIR": null, "ISR": null }
            });
            json!({ "name": stem.as_str(), "frames": [silent.clone(), silent] })
        })
        .collect();
    json!({ "name": name, "targets": targets })
}

/// Write the given reports into `dir` as `<name>.json`
pub fn write_reports(dir: &Path, reports: &[(&str, Value)]) {
    std::fs::create_dir_all(dir).unwrap();
    for (name, report) in reports {
        let content = serde_json::to_string_pretty(report).unwrap();
        std::fs::write(dir.join(format!("{name}.json")), content).unwrap();
    }
}

/// Shell script standing in for the separation tool.
///
/// It copies every report in `reports_dir` into `<-o>/test/`.
pub fn write_copying_script(dir: &Path, reports_dir: &Path) -> PathBuf {
    let script = format!(
        r#"out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
mkdir -p "$out/test"
cp "{}"/*.json "$out/test/"
"#,
        reports_dir.display()
    );
    let path = dir.join("fake-evaluator.sh");
    std::fs::write(&path, script).unwrap();
    path
}

/// Shell script that prints to stderr and exits with status 3
pub fn write_failing_script(dir: &Path) -> PathBuf {
    let path = dir.join("failing-evaluator.sh");
    std::fs::write(
        &path,
        "echo 'loading model' >&2\necho 'Error: model not found' >&2\nexit 3\n",
    )
    .unwrap();
    path
}
