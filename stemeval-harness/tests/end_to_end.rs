//! Evaluation against the real separation tool
//!
//! Runs only when `STEMEVAL_EVALUATOR` names the tool's executable. Extra
//! leading arguments (e.g. `-m spleeter` for a python launcher) can be given
//! whitespace-separated in `STEMEVAL_EVALUATOR_ARGS`.

use approx::assert_abs_diff_eq;
use stemeval_core::Backend;
use stemeval_fixtures::generate_fake_eval_dataset;
use stemeval_harness::{CommandEntrypoint, EvaluationHarness};
use tempfile::TempDir;

const PRESET: &str = "spleeter:4stems";

fn evaluator() -> Option<CommandEntrypoint> {
    let program = std::env::var_os("STEMEVAL_EVALUATOR")?;
    let prefix_args = std::env::var("STEMEVAL_EVALUATOR_ARGS")
        .map(|args| args.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default();
    Some(CommandEntrypoint::new(program).with_prefix_args(prefix_args))
}

fn evaluate_default_dataset(backend: Backend, expected_vocals_sdr: f64) {
    let Some(entrypoint) = evaluator() else {
        eprintln!("Skipping: STEMEVAL_EVALUATOR not set");
        return;
    };

    let dataset = TempDir::new().unwrap();
    generate_fake_eval_dataset(dataset.path(), 2, 44100, 3, 2, 0).unwrap();
    let output = TempDir::new().unwrap();
    let harness = EvaluationHarness::new(entrypoint).with_backend(backend);

    let metrics = harness.run(output.path(), PRESET, dataset.path()).unwrap();

    let vocals_sdr = metrics.get("vocals", "SDR").unwrap().median().unwrap();
    assert_abs_diff_eq!(vocals_sdr, expected_vocals_sdr, epsilon = 1e-3);

    let report = harness.check(&metrics, PRESET).unwrap();
    println!("{report}");
    report.into_result().unwrap();
}

#[test]
fn test_evaluate_tensorflow() {
    evaluate_default_dataset(Backend::Tensorflow, 3.25e-05);
}

#[test]
fn test_evaluate_librosa() {
    evaluate_default_dataset(Backend::Librosa, -0.007);
}
