use anyhow::Result;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use stemeval_core::Backend;
use tracing::info;

mod app;

#[derive(Parser, Debug)]
#[command(author, version, about = "stemeval - source separation evaluation harness", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a synthetic evaluation dataset and print its digest
    Generate {
        /// Dataset root; stems land in <DIR>/test/song<N>/
        dir: Utf8PathBuf,
        #[arg(long)]
        songs: Option<usize>,
        #[arg(long)]
        sample_rate: Option<u32>,
        /// Duration of each stem in seconds
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        channels: Option<u16>,
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Run the separation tool's evaluation and compare against reference metrics
    Evaluate {
        /// Existing dataset; a synthetic one is generated when omitted
        #[arg(long)]
        music_dir: Option<Utf8PathBuf>,
        #[arg(short, long)]
        preset: Option<String>,
        #[arg(short = 'B', long)]
        backend: Option<Backend>,
        /// Separation tool executable
        #[arg(long)]
        program: Option<Utf8PathBuf>,
        #[arg(long)]
        tolerance: Option<f64>,
        /// Enable multichannel Wiener filtering
        #[arg(long)]
        mwf: bool,
    },

    /// Print the reference metrics
    Reference {
        /// Only this backend's table
        #[arg(short = 'B', long)]
        backend: Option<Backend>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting stemeval v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = if let Some(config_path) = args.config {
        stemeval_core::config::Config::load_from_path(config_path)?
    } else {
        stemeval_core::config::Config::load_or_default()
    };

    match args.command {
        Command::Generate {
            dir,
            songs,
            sample_rate,
            duration,
            channels,
            seed,
        } => {
            let fixture = &mut config.fixture;
            fixture.song_count = songs.unwrap_or(fixture.song_count);
            fixture.sample_rate = sample_rate.unwrap_or(fixture.sample_rate);
            fixture.duration_secs = duration.unwrap_or(fixture.duration_secs);
            fixture.channels = channels.unwrap_or(fixture.channels);
            fixture.seed = seed.unwrap_or(fixture.seed);
            config.validate()?;

            app::generate(&dir, &config)
        }
        Command::Evaluate {
            music_dir,
            preset,
            backend,
            program,
            tolerance,
            mwf,
        } => {
            let evaluator = &mut config.evaluator;
            if let Some(preset) = preset {
                evaluator.preset = preset;
            }
            if let Some(program) = program {
                evaluator.program = program;
            }
            evaluator.backend = backend.unwrap_or(evaluator.backend);
            evaluator.mwf |= mwf;
            config.comparison.tolerance = tolerance.unwrap_or(config.comparison.tolerance);
            config.validate()?;

            app::evaluate(music_dir.as_deref(), &config)
        }
        Command::Reference { backend } => {
            app::print_reference(backend);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_overrides() {
        let args = Args::parse_from(["stemeval", "generate", "/tmp/ds", "--songs", "3", "--seed", "7"]);
        match args.command {
            Command::Generate { dir, songs, seed, sample_rate, .. } => {
                assert_eq!(dir, "/tmp/ds");
                assert_eq!(songs, Some(3));
                assert_eq!(seed, Some(7));
                assert_eq!(sample_rate, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_evaluate_backend() {
        let args = Args::parse_from(["stemeval", "-v", "evaluate", "-B", "librosa", "--mwf"]);
        assert!(args.verbose);
        match args.command {
            Command::Evaluate { backend, mwf, music_dir, .. } => {
                assert_eq!(backend, Some(Backend::Librosa));
                assert!(mwf);
                assert!(music_dir.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(Args::try_parse_from(["stemeval", "reference", "-B", "pytorch"]).is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let args = Args::try_parse_from(["stemeval", "reference", "--config", "/etc/x.toml"]).unwrap();
        assert_eq!(args.config.as_deref(), Some(camino::Utf8Path::new("/etc/x.toml")));
    }
}
