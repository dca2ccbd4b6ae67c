/// Reference metrics for the 4-stem preset on the fake dataset
///
/// Values are medians obtained from the default fake dataset (2 songs,
/// 44.1 kHz, 3 s, stereo, seed 0). Each backend has its own table because
/// the two spectral backends drift apart numerically.
use stemeval_core::error::{Result, StemevalError};
use stemeval_core::{Backend, Metric, Preset, Stem};

/// Expected value per metric for one instrument
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricReference {
    pub sdr: f64,
    pub sar: f64,
    pub sir: f64,
    pub isr: f64,
}

impl MetricReference {
    pub const fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sdr => self.sdr,
            Metric::Sar => self.sar,
            Metric::Sir => self.sir,
            Metric::Isr => self.isr,
        }
    }
}

/// Reference values for every separated instrument under one backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTable {
    pub backend: Backend,
    pub entries: [(Stem, MetricReference); 4],
}

pub const TENSORFLOW_4STEMS: ReferenceTable = ReferenceTable {
    backend: Backend::Tensorflow,
    entries: [
        (Stem::Vocals, MetricReference { sdr: 3.25e-05, sar: -11.153575, sir: -1.3849, isr: 2.75e-05 }),
        (Stem::Drums, MetricReference { sdr: -0.079505, sar: -15.7073575, sir: -4.972755, isr: 0.0013575 }),
        (Stem::Bass, MetricReference { sdr: 2.5e-06, sar: -10.3520575, sir: -4.272325, isr: 2.5e-06 }),
        (Stem::Other, MetricReference { sdr: -1.359175, sar: -14.7076775, sir: -4.761505, isr: -0.01528 }),
    ],
};

pub const LIBROSA_4STEMS: ReferenceTable = ReferenceTable {
    backend: Backend::Librosa,
    entries: [
        (Stem::Vocals, MetricReference { sdr: -0.007, sar: -19.231, sir: -4.528, isr: 0.000 }),
        (Stem::Drums, MetricReference { sdr: -0.071, sar: -14.496, sir: -4.987, isr: 0.001 }),
        (Stem::Bass, MetricReference { sdr: -0.001, sar: -12.426, sir: -7.198, isr: -0.001 }),
        (Stem::Other, MetricReference { sdr: -1.453, sar: -14.899, sir: -4.678, isr: -0.015 }),
    ],
};

impl ReferenceTable {
    pub const fn for_backend(backend: Backend) -> &'static ReferenceTable {
        match backend {
            Backend::Tensorflow => &TENSORFLOW_4STEMS,
            Backend::Librosa => &LIBROSA_4STEMS,
        }
    }

    /// Table for `preset` under `backend`.
    ///
    /// Only presets separating exactly vocals/drums/bass/other have
    /// reference values.
    pub fn lookup(preset: &Preset, backend: Backend) -> Result<&'static ReferenceTable> {
        let table = Self::for_backend(backend);
        let instruments: Vec<&str> = table.instruments().map(Stem::as_str).collect();
        if !preset.has_instruments(&instruments) {
            return Err(StemevalError::NotFound(format!(
                "No reference metrics for preset '{}' (instruments: {})",
                preset.name,
                preset.instrument_list.join(", ")
            )));
        }
        Ok(table)
    }

    pub fn instruments(&self) -> impl Iterator<Item = Stem> + '_ {
        self.entries.iter().map(|(stem, _)| *stem)
    }

    pub fn instrument(&self, name: &str) -> Option<&MetricReference> {
        self.entries
            .iter()
            .find(|(stem, _)| stem.as_str() == name)
            .map(|(_, reference)| reference)
    }

    /// Expected value for an instrument/metric given by name.
    pub fn expected(&self, instrument: &str, metric: &str) -> Option<f64> {
        let metric: Metric = metric.parse().ok()?;
        self.instrument(instrument).map(|r| r.get(metric))
    }

    /// Every (instrument, metric, expected) triple in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Stem, Metric, f64)> + '_ {
        self.entries.iter().flat_map(|(stem, reference)| {
            Metric::ALL
                .into_iter()
                .map(move |metric| (*stem, metric, reference.get(metric)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocals_sdr_per_backend() {
        assert_eq!(TENSORFLOW_4STEMS.expected("vocals", "SDR"), Some(3.25e-05));
        assert_eq!(LIBROSA_4STEMS.expected("vocals", "SDR"), Some(-0.007));
    }

    #[test]
    fn test_missing_keys_are_none() {
        assert_eq!(TENSORFLOW_4STEMS.expected("piano", "SDR"), None);
        assert_eq!(TENSORFLOW_4STEMS.expected("vocals", "PES"), None);
        assert_eq!(TENSORFLOW_4STEMS.expected("mixture", "SDR"), None);
    }

    #[test]
    fn test_tables_cover_every_pair() {
        for backend in Backend::ALL {
            let table = ReferenceTable::for_backend(backend);
            assert_eq!(table.backend, backend);
            assert_eq!(table.iter().count(), 16);
            assert!(table.instruments().all(|s| s.is_instrument()));
        }
    }

    #[test]
    fn test_lookup_checks_preset_instruments() {
        let four = Preset::load("spleeter:4stems").unwrap();
        let two = Preset::load("spleeter:2stems").unwrap();

        assert!(ReferenceTable::lookup(&four, Backend::Librosa).is_ok());
        assert!(matches!(
            ReferenceTable::lookup(&two, Backend::Tensorflow),
            Err(StemevalError::NotFound(_))
        ));
    }
}
