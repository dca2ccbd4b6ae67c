use anyhow::{Context, Result};
use camino::Utf8Path;
use stemeval_core::config::Config;
use stemeval_core::{Backend, Metric};
use stemeval_fixtures::{FakeDatasetGenerator, FakeDatasetSpec};
use stemeval_harness::{CommandEntrypoint, EvaluationHarness, ReferenceTable};
use tempfile::TempDir;
use tracing::info;

pub fn generate(dir: &Utf8Path, config: &Config) -> Result<()> {
    let spec = FakeDatasetSpec::from(&config.fixture);
    let dataset = FakeDatasetGenerator::new()
        .generate(dir.as_std_path(), &spec)
        .with_context(|| format!("Failed to generate dataset in {dir}"))?;

    let digest = dataset.digest()?;
    info!("Wrote {} songs to {}", dataset.songs.len(), dir);
    println!("{digest}  {dir}");
    Ok(())
}

pub fn evaluate(music_dir: Option<&Utf8Path>, config: &Config) -> Result<()> {
    let evaluator = &config.evaluator;
    let entrypoint = CommandEntrypoint::new(evaluator.program.as_std_path())
        .with_prefix_args(evaluator.prefix_args.clone());
    let harness = EvaluationHarness::from_config(entrypoint, config);

    // Scratch directories live until the comparison is done
    let generated;
    let dataset_dir = match music_dir {
        Some(dir) => dir.as_std_path().to_path_buf(),
        None => {
            generated = TempDir::new()?;
            let spec = FakeDatasetSpec::from(&config.fixture);
            let dataset = FakeDatasetGenerator::new().generate(generated.path(), &spec)?;
            info!("Generated fixture with digest {}", dataset.digest()?);
            generated.path().to_path_buf()
        }
    };

    let scratch;
    let output_dir = match &evaluator.output_dir {
        Some(dir) => dir.as_std_path().to_path_buf(),
        None => {
            scratch = TempDir::new()?;
            scratch.path().to_path_buf()
        }
    };

    let metrics = harness
        .run(&output_dir, &evaluator.preset, &dataset_dir)
        .with_context(|| format!("Evaluation of preset {} failed", evaluator.preset))?;
    let report = harness.check(&metrics, &evaluator.preset)?;

    println!("{report}");
    report.into_result()?;
    info!("All metrics match the {} reference", harness.backend());
    Ok(())
}

pub fn print_reference(backend: Option<Backend>) {
    let backends: Vec<Backend> = match backend {
        Some(backend) => vec![backend],
        None => Backend::ALL.to_vec(),
    };

    for backend in backends {
        let table = ReferenceTable::for_backend(backend);
        println!("[{backend}]");
        print!("{:<10}", "instrument");
        for metric in Metric::ALL {
            print!(" {:>12}", metric.as_str());
        }
        println!();
        for (stem, reference) in &table.entries {
            print!("{:<10}", stem.as_str());
            for metric in Metric::ALL {
                print!(" {:>12.7}", reference.get(metric));
            }
            println!();
        }
    }
}
