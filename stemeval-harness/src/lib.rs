// Evaluation entrypoint driving and metric checking
pub mod comparison;
pub mod entrypoint;
pub mod harness;
pub mod museval;
pub mod reference;

pub use comparison::{ComparisonReport, ComparisonResult, MetricOutcome, compare_metrics};
pub use entrypoint::{CommandEntrypoint, EvaluateArgs, EvaluationEntrypoint};
pub use harness::EvaluationHarness;
pub use museval::compile_metrics;
pub use reference::{LIBROSA_4STEMS, MetricReference, ReferenceTable, TENSORFLOW_4STEMS};
