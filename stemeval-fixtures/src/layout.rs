use stemeval_core::Stem;
use std::path::{Path, PathBuf};

/// Subset folder the evaluation tool reads songs from.
pub const SUBSET_DIR: &str = "test";

/// Paths of a `{root}/test/song{N}/{stem}.wav` dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn subset_dir(&self) -> PathBuf {
        self.root.join(SUBSET_DIR)
    }

    pub fn song_dir(&self, index: usize) -> PathBuf {
        self.subset_dir().join(format!("song{index}"))
    }

    pub fn stem_path(&self, index: usize, stem: Stem) -> PathBuf {
        self.song_dir(index).join(stem.file_name())
    }

    /// Song folders currently present under the subset directory, sorted.
    pub fn existing_songs(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut songs = Vec::new();
        for entry in std::fs::read_dir(self.subset_dir())? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                songs.push(entry.path());
            }
        }
        songs.sort();
        Ok(songs)
    }
}
