/// Deterministic fake evaluation dataset generation
///
/// Writes a `{root}/test/song{N}/{stem}.wav` tree of uniform noise stems.
/// A single seeded generator is drawn from song-major, stem-minor, so the
/// same parameters always yield the same bytes.
use crate::layout::DatasetLayout;
use crate::rng::MersenneTwister;
use sha2::{Digest, Sha256};
use stemeval_audio::{AudioAdapter, AudioBuffer, WavAdapter};
use stemeval_core::config::FixtureConfig;
use stemeval_core::error::{Result, StemevalError};
use stemeval_core::Stem;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Shape and seed of a fake dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeDatasetSpec {
    pub song_count: usize,
    pub sample_rate: u32,
    pub duration_secs: u32,
    pub channels: u16,
    pub seed: u32,
}

impl Default for FakeDatasetSpec {
    fn default() -> Self {
        Self {
            song_count: 2,
            sample_rate: 44100,
            duration_secs: 3,
            channels: 2,
            seed: 0,
        }
    }
}

impl From<&FixtureConfig> for FakeDatasetSpec {
    fn from(config: &FixtureConfig) -> Self {
        Self {
            song_count: config.song_count,
            sample_rate: config.sample_rate,
            duration_secs: config.duration_secs,
            channels: config.channels,
            seed: config.seed,
        }
    }
}

impl FakeDatasetSpec {
    pub fn frames_per_stem(&self) -> usize {
        self.duration_secs as usize * self.sample_rate as usize
    }

    pub fn samples_per_stem(&self) -> usize {
        self.frames_per_stem() * self.channels as usize
    }

    fn validate(&self) -> Result<()> {
        if self.song_count == 0 || self.sample_rate == 0 || self.duration_secs == 0 || self.channels == 0 {
            return Err(StemevalError::Fixture(format!(
                "Dataset dimensions must be non-zero: {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// One generated song folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongFixture {
    pub index: usize,
    pub dir: PathBuf,
    pub stems: Vec<(Stem, PathBuf)>,
}

/// A generated dataset on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeDataset {
    pub layout: DatasetLayout,
    pub spec: FakeDatasetSpec,
    pub songs: Vec<SongFixture>,
}

impl FakeDataset {
    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn stem_files(&self) -> impl Iterator<Item = &Path> {
        self.songs
            .iter()
            .flat_map(|song| song.stems.iter().map(|(_, path)| path.as_path()))
    }

    /// SHA-256 over every stem file (relative path and bytes) in layout order.
    pub fn digest(&self) -> Result<String> {
        let mut hasher = Sha256::new();
        for path in self.stem_files() {
            let relative = path.strip_prefix(self.root()).unwrap_or(path);
            hasher.update(relative.to_string_lossy().as_bytes());
            hasher.update(std::fs::read(path)?);
        }
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Draw one stem's worth of interleaved samples in [-0.5, 0.5).
///
/// Frame-major: all channels of frame 0, then frame 1, and so on.
pub fn draw_stem(rng: &mut MersenneTwister, spec: &FakeDatasetSpec) -> Vec<f64> {
    rng.uniform(spec.samples_per_stem())
        .into_iter()
        .map(|x| x - 0.5)
        .collect()
}

pub struct FakeDatasetGenerator<A: AudioAdapter = WavAdapter> {
    adapter: A,
}

impl FakeDatasetGenerator<WavAdapter> {
    pub fn new() -> Self {
        Self {
            adapter: WavAdapter::default(),
        }
    }
}

impl Default for FakeDatasetGenerator<WavAdapter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AudioAdapter> FakeDatasetGenerator<A> {
    pub fn with_adapter(adapter: A) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Write the dataset under `root`, overwriting stems that already exist.
    pub fn generate(&self, root: &Path, spec: &FakeDatasetSpec) -> Result<FakeDataset> {
        spec.validate()?;
        info!(
            "Generating fake dataset in {}: {} songs, {} Hz, {}s, {} ch, seed {}",
            root.display(),
            spec.song_count,
            spec.sample_rate,
            spec.duration_secs,
            spec.channels,
            spec.seed
        );

        let layout = DatasetLayout::new(root);
        let mut rng = MersenneTwister::new(spec.seed);
        let mut songs = Vec::with_capacity(spec.song_count);

        for index in 0..spec.song_count {
            let dir = layout.song_dir(index);
            std::fs::create_dir_all(&dir).map_err(|e| {
                StemevalError::Fixture(format!("Failed to create {}: {}", dir.display(), e))
            })?;

            let mut stems = Vec::with_capacity(Stem::FIXTURE_ORDER.len());
            for stem in Stem::FIXTURE_ORDER {
                let path = layout.stem_path(index, stem);
                let samples = draw_stem(&mut rng, spec).into_iter().map(|s| s as f32).collect();
                let buffer = AudioBuffer::new(samples, spec.channels, spec.sample_rate)?;
                self.adapter.save(&path, &buffer)?;
                debug!("Wrote {}", path.display());
                stems.push((stem, path));
            }

            songs.push(SongFixture { index, dir, stems });
        }

        info!("Fake dataset ready: {} stem files", songs.len() * Stem::FIXTURE_ORDER.len());

        Ok(FakeDataset {
            layout,
            spec: *spec,
            songs,
        })
    }
}

/// Generate a fake dataset with the default WAV adapter.
pub fn generate_fake_eval_dataset(
    path: &Path,
    song_count: usize,
    sample_rate: u32,
    duration_secs: u32,
    channels: u16,
    seed: u32,
) -> Result<FakeDataset> {
    let spec = FakeDatasetSpec {
        song_count,
        sample_rate,
        duration_secs,
        channels,
        seed,
    };
    FakeDatasetGenerator::new().generate(path, &spec)
}
