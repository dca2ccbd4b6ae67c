use crate::error::{Result, StemevalError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named track inside a song folder of the evaluation dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stem {
    Mixture,
    Vocals,
    Bass,
    Drums,
    Other,
}

impl Stem {
    /// Order in which stems are drawn from the fixture random source.
    ///
    /// Changing this order changes every generated fixture, even for the
    /// same seed.
    pub const FIXTURE_ORDER: [Stem; 5] = [
        Stem::Mixture,
        Stem::Vocals,
        Stem::Bass,
        Stem::Drums,
        Stem::Other,
    ];

    /// Separable instruments of the 4-stem model, in reporting order.
    pub const INSTRUMENTS: [Stem; 4] = [Stem::Vocals, Stem::Drums, Stem::Bass, Stem::Other];

    pub const fn as_str(self) -> &'static str {
        match self {
            Stem::Mixture => "mixture",
            Stem::Vocals => "vocals",
            Stem::Bass => "bass",
            Stem::Drums => "drums",
            Stem::Other => "other",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.wav", self.as_str())
    }

    pub const fn is_instrument(self) -> bool {
        !matches!(self, Stem::Mixture)
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stem {
    type Err = StemevalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mixture" => Ok(Stem::Mixture),
            "vocals" => Ok(Stem::Vocals),
            "bass" => Ok(Stem::Bass),
            "drums" => Ok(Stem::Drums),
            "other" => Ok(Stem::Other),
            _ => Err(StemevalError::NotFound(format!("Unknown stem: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_order_is_mixture_first() {
        let names: Vec<&str> = Stem::FIXTURE_ORDER.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["mixture", "vocals", "bass", "drums", "other"]);
    }

    #[test]
    fn test_instruments_exclude_mixture() {
        assert!(Stem::INSTRUMENTS.iter().all(|s| s.is_instrument()));
        assert!(!Stem::Mixture.is_instrument());
    }

    #[test]
    fn test_parse_round_trip() {
        for stem in Stem::FIXTURE_ORDER {
            assert_eq!(stem.as_str().parse::<Stem>().unwrap(), stem);
        }
        assert!("piano".parse::<Stem>().is_err());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(Stem::Drums.file_name(), "drums.wav");
    }
}
