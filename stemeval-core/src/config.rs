use crate::backend::Backend;
use crate::error::{Result, StemevalError};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fixture: FixtureConfig,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub comparison: ComparisonConfig,
}

/// Shape of the synthetic evaluation dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FixtureConfig {
    #[serde(default = "default_song_count")]
    pub song_count: usize,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
    #[serde(default = "default_channels")]
    pub channels: u16,
    #[serde(default)]
    pub seed: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluatorConfig {
    /// Executable providing the `evaluate` subcommand
    #[serde(default = "default_program")]
    pub program: Utf8PathBuf,
    /// Arguments placed before `evaluate` (e.g. `-m spleeter` for a python launcher)
    #[serde(default)]
    pub prefix_args: Vec<String>,
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default)]
    pub backend: Backend,
    /// Multichannel Wiener filtering during separation
    #[serde(default)]
    pub mwf: bool,
    /// Keep evaluator output here instead of a throwaway directory
    pub output_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ComparisonConfig {
    /// Absolute tolerance between observed median and reference value
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            song_count: default_song_count(),
            sample_rate: default_sample_rate(),
            duration_secs: default_duration_secs(),
            channels: default_channels(),
            seed: 0,
        }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            prefix_args: Vec::new(),
            preset: default_preset(),
            backend: Backend::default(),
            mwf: false,
            output_dir: None,
        }
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

// Default value functions
const fn default_song_count() -> usize {
    2
}

const fn default_sample_rate() -> u32 {
    44100
}

const fn default_duration_secs() -> u32 {
    3
}

const fn default_channels() -> u16 {
    2
}

fn default_program() -> Utf8PathBuf {
    Utf8PathBuf::from("spleeter")
}

fn default_preset() -> String {
    "spleeter:4stems".to_owned()
}

const fn default_tolerance() -> f64 {
    1e-3
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StemevalError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)
            .map_err(|e| StemevalError::Config(format!("Failed to parse config: {}", e)))?;

        config.expand_paths();
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load_first_or_default(&Self::config_candidates())
    }

    /// Load the first existing candidate; an unreadable or invalid file is
    /// reported and replaced by defaults.
    fn load_first_or_default(candidates: &[PathBuf]) -> Self {
        let Some(path) = candidates.iter().find(|p| p.exists()) else {
            debug!("No config file found, using defaults");
            return Self::default();
        };

        match Self::load_from_path(path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    fn config_candidates() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("stemeval/stemeval.toml")),
            Some(PathBuf::from("/etc/stemeval/stemeval.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn find_config_file() -> Result<PathBuf> {
        Self::config_candidates()
            .into_iter()
            .find(|candidate| candidate.exists())
            .ok_or_else(|| StemevalError::Config("Config file not found".to_owned()))
    }

    fn expand_paths(&mut self) {
        fn expand_tilde(path: &Utf8PathBuf) -> Utf8PathBuf {
            let path_str = path.as_str();
            if path_str.starts_with("~/") {
                if let Some(home) = dirs::home_dir() {
                    if let Some(home_str) = home.to_str() {
                        return Utf8PathBuf::from(path_str.replacen("~", home_str, 1));
                    }
                }
            }
            path.clone()
        }

        self.evaluator.program = expand_tilde(&self.evaluator.program);
        if let Some(dir) = &self.evaluator.output_dir {
            self.evaluator.output_dir = Some(expand_tilde(dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fixture = &self.fixture;
        if fixture.song_count == 0
            || fixture.sample_rate == 0
            || fixture.duration_secs == 0
            || fixture.channels == 0
        {
            return Err(StemevalError::Config(format!(
                "Fixture dimensions must be non-zero: {:?}",
                fixture
            )));
        }

        let tolerance = self.comparison.tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(StemevalError::Config(format!(
                "Comparison tolerance must be a positive number, got {tolerance}"
            )));
        }
        Ok(())
    }
}
