use crate::error::{Result, StemevalError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spectral backend the separation tool runs its STFT through.
///
/// The two backends are numerically independent, so each one has its own
/// reference metrics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Tensorflow,
    Librosa,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Tensorflow, Backend::Librosa];

    pub const fn as_str(self) -> &'static str {
        match self {
            Backend::Tensorflow => "tensorflow",
            Backend::Librosa => "librosa",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = StemevalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tensorflow" | "tf" => Ok(Backend::Tensorflow),
            "librosa" => Ok(Backend::Librosa),
            other => Err(StemevalError::Config(format!(
                "Unknown backend '{other}' (expected tensorflow or librosa)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("TensorFlow".parse::<Backend>().unwrap(), Backend::Tensorflow);
        assert_eq!("librosa".parse::<Backend>().unwrap(), Backend::Librosa);
        assert!("torch".parse::<Backend>().is_err());
    }

    #[test]
    fn test_display_matches_cli_value() {
        assert_eq!(Backend::Librosa.to_string(), "librosa");
        assert_eq!(Backend::default(), Backend::Tensorflow);
    }
}
