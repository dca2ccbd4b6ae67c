use crate::error::{Result, StemevalError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const EMBEDDED_PREFIX: &str = "spleeter:";

/// Separation configuration the evaluation tool is run with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Preset {
    /// Name the preset was requested by (e.g. `spleeter:4stems`)
    #[serde(default)]
    pub name: String,
    pub model_dir: String,
    pub instrument_list: Vec<String>,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_frame_length")]
    pub frame_length: u32,
    #[serde(default = "default_frame_step")]
    pub frame_step: u32,
    #[serde(default = "default_n_channels")]
    pub n_channels: u16,
    #[serde(default)]
    pub mwf: bool,
}

const fn default_sample_rate() -> u32 {
    44100
}

const fn default_frame_length() -> u32 {
    4096
}

const fn default_frame_step() -> u32 {
    1024
}

const fn default_n_channels() -> u16 {
    2
}

impl Preset {
    /// Resolve a preset descriptor.
    ///
    /// `spleeter:2stems`, `spleeter:4stems`, `spleeter:5stems` (prefix
    /// optional) resolve to the bundled configurations; anything else is
    /// read as a TOML or JSON file.
    pub fn load(descriptor: &str) -> Result<Self> {
        let short = descriptor.strip_prefix(EMBEDDED_PREFIX).unwrap_or(descriptor);
        if let Some(preset) = Self::embedded(short) {
            debug!("Using bundled preset {} for '{}'", short, descriptor);
            return Ok(Self {
                name: descriptor.to_owned(),
                ..preset
            });
        }
        if descriptor.starts_with(EMBEDDED_PREFIX) {
            return Err(StemevalError::Preset(format!(
                "No bundled preset named '{short}'"
            )));
        }
        debug!("Loading preset from file {}", descriptor);
        Self::load_from_path(descriptor)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StemevalError::Preset(format!(
                "Preset file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| StemevalError::Preset(format!("Failed to read preset: {e}")))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let mut preset: Preset = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| StemevalError::Preset(format!("Failed to parse preset: {e}")))?
        } else {
            toml::from_str(&content)
                .map_err(|e| StemevalError::Preset(format!("Failed to parse preset: {e}")))?
        };

        if preset.name.is_empty() {
            preset.name = path.display().to_string();
        }
        preset.validate()?;
        Ok(preset)
    }

    fn embedded(short: &str) -> Option<Self> {
        let (model_dir, instruments): (&str, &[&str]) = match short {
            "2stems" => ("2stems", &["vocals", "accompaniment"]),
            "4stems" => ("4stems", &["vocals", "drums", "bass", "other"]),
            "5stems" => ("5stems", &["vocals", "piano", "drums", "bass", "other"]),
            _ => return None,
        };
        Some(Self {
            name: format!("{EMBEDDED_PREFIX}{short}"),
            model_dir: format!("pretrained_models/{model_dir}"),
            instrument_list: instruments.iter().map(|s| (*s).to_owned()).collect(),
            sample_rate: default_sample_rate(),
            frame_length: default_frame_length(),
            frame_step: default_frame_step(),
            n_channels: default_n_channels(),
            mwf: false,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.instrument_list.is_empty() {
            return Err(StemevalError::Preset(format!(
                "Preset '{}' declares no instruments",
                self.name
            )));
        }
        if self.sample_rate == 0 || self.n_channels == 0 {
            return Err(StemevalError::Preset(format!(
                "Preset '{}' has a zero sample rate or channel count",
                self.name
            )));
        }
        Ok(())
    }

    pub fn has_instruments(&self, instruments: &[&str]) -> bool {
        self.instrument_list.len() == instruments.len()
            && instruments
                .iter()
                .all(|i| self.instrument_list.iter().any(|own| own == i))
    }
}
