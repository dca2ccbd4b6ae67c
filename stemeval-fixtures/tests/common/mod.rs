/// Shared helpers for fixture generation tests
use stemeval_fixtures::FakeDatasetSpec;
use std::path::{Path, PathBuf};

/// Small dataset so tests write kilobytes instead of megabytes
pub fn small_spec(seed: u32) -> FakeDatasetSpec {
    FakeDatasetSpec {
        song_count: 2,
        sample_rate: 8000,
        duration_secs: 1,
        channels: 2,
        seed,
    }
}

/// Sorted file names directly inside `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Sorted subdirectories directly inside `dir`
pub fn subdirs(dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}
