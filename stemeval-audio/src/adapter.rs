use crate::buffer::AudioBuffer;
use crate::decoder::decode_file;
use hound::{SampleFormat, WavSpec, WavWriter};
use stemeval_core::error::{Result, StemevalError};
use std::path::Path;
use tracing::debug;

/// Persistence of audio buffers to and from disk.
pub trait AudioAdapter {
    fn load(&self, path: &Path) -> Result<AudioBuffer>;

    fn save(&self, path: &Path, buffer: &AudioBuffer) -> Result<()>;
}

/// Sample encoding used when writing WAV files
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
    /// Signed 16-bit PCM, what an ffmpeg-backed `.wav` export produces by default
    #[default]
    Pcm16,
    /// IEEE 32-bit float, lossless for `f32` buffers
    Float32,
}

impl SampleDepth {
    pub fn bits_per_sample(self) -> u16 {
        match self {
            SampleDepth::Pcm16 => 16,
            SampleDepth::Float32 => 32,
        }
    }

    fn sample_format(self) -> SampleFormat {
        match self {
            SampleDepth::Pcm16 => SampleFormat::Int,
            SampleDepth::Float32 => SampleFormat::Float,
        }
    }
}

/// Quantize a float sample to 16-bit PCM.
///
/// Scales by 2^15 and rounds half to even, then saturates, matching the
/// float-to-s16 conversion of common resamplers.
pub fn quantize_pcm16(sample: f32) -> i16 {
    (sample * 32768.0)
        .round_ties_even()
        .clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

/// RIFF/WAVE adapter: hound for writing, symphonia for reading.
#[derive(Debug, Default, Clone, Copy)]
pub struct WavAdapter {
    depth: SampleDepth,
}

impl WavAdapter {
    pub fn new(depth: SampleDepth) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> SampleDepth {
        self.depth
    }
}

/// Adapter used by the fixture generator unless told otherwise.
pub fn default_audio_adapter() -> WavAdapter {
    WavAdapter::default()
}

impl AudioAdapter for WavAdapter {
    fn load(&self, path: &Path) -> Result<AudioBuffer> {
        decode_file(path)
    }

    fn save(&self, path: &Path, buffer: &AudioBuffer) -> Result<()> {
        let is_wav = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("wav"));
        if !is_wav {
            return Err(StemevalError::Audio(format!(
                "WAV adapter cannot write {}",
                path.display()
            )));
        }

        let spec = WavSpec {
            channels: buffer.channels(),
            sample_rate: buffer.sample_rate(),
            bits_per_sample: self.depth.bits_per_sample(),
            sample_format: self.depth.sample_format(),
        };

        let mut writer = WavWriter::create(path, spec).map_err(|e| {
            StemevalError::Audio(format!("Failed to create {}: {}", path.display(), e))
        })?;

        let written = match self.depth {
            SampleDepth::Pcm16 => buffer
                .samples()
                .iter()
                .try_for_each(|&s| writer.write_sample(quantize_pcm16(s))),
            SampleDepth::Float32 => buffer
                .samples()
                .iter()
                .try_for_each(|&s| writer.write_sample(s)),
        };
        written.map_err(|e| {
            StemevalError::Audio(format!("Failed to write {}: {}", path.display(), e))
        })?;

        writer.finalize().map_err(|e| {
            StemevalError::Audio(format!("Failed to finalize {}: {}", path.display(), e))
        })?;

        debug!(
            "Saved {} ({} frames, {} ch, {} Hz, {:?})",
            path.display(),
            buffer.frames(),
            buffer.channels(),
            buffer.sample_rate(),
            self.depth
        );
        Ok(())
    }
}
