use stemeval_core::error::{Result, StemevalError};

/// Interleaved PCM samples with their stream format.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Wrap interleaved samples; the sample count must be a whole number of frames.
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(StemevalError::Audio("Channel count must be non-zero".into()));
        }
        if sample_rate == 0 {
            return Err(StemevalError::Audio("Sample rate must be non-zero".into()));
        }
        if samples.len() % channels as usize != 0 {
            return Err(StemevalError::Audio(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// Samples of one channel, de-interleaved.
    pub fn channel(&self, index: u16) -> impl Iterator<Item = f32> + '_ {
        self.samples
            .iter()
            .skip(index as usize)
            .step_by(self.channels as usize)
            .copied()
    }

    /// (min, max) over all samples, `None` for an empty buffer.
    pub fn peak_range(&self) -> Option<(f32, f32)> {
        self.samples.iter().fold(None, |acc, &s| match acc {
            None => Some((s, s)),
            Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_partial_frames() {
        assert!(AudioBuffer::new(vec![0.0; 3], 2, 44100).is_err());
        assert!(AudioBuffer::new(vec![0.0; 4], 0, 44100).is_err());
    }

    #[test]
    fn test_frames_and_duration() {
        let buffer = AudioBuffer::new(vec![0.0; 88200], 2, 44100).unwrap();
        assert_eq!(buffer.frames(), 44100);
        assert_eq!(buffer.duration_secs(), 1.0);
    }

    #[test]
    fn test_channel_deinterleave() {
        let buffer = AudioBuffer::new(vec![0.1, -0.1, 0.2, -0.2], 2, 8000).unwrap();
        let right: Vec<f32> = buffer.channel(1).collect();
        assert_eq!(right, vec![-0.1, -0.2]);
        assert_eq!(buffer.peak_range(), Some((-0.2, 0.2)));
    }
}
