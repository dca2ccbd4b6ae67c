/// WAV adapter persistence tests
///
/// Writes buffers with hound and reads them back through symphonia to check
/// that format, length, and sample values survive the trip.
use approx::assert_abs_diff_eq;
use stemeval_audio::{AudioAdapter, AudioBuffer, SampleDepth, WavAdapter, default_audio_adapter};
use tempfile::TempDir;

fn ramp(frames: usize, channels: u16) -> Vec<f32> {
    (0..frames * channels as usize)
        .map(|i| (i % 1000) as f32 / 1000.0 - 0.5)
        .collect()
}

#[test]
fn test_pcm16_preserves_format_and_length() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stereo.wav");
    let buffer = AudioBuffer::new(ramp(4410, 2), 2, 44100).unwrap();

    let adapter = default_audio_adapter();
    adapter.save(&path, &buffer).unwrap();
    let loaded = adapter.load(&path).unwrap();

    assert_eq!(loaded.channels(), 2);
    assert_eq!(loaded.sample_rate(), 44100);
    assert_eq!(loaded.frames(), 4410);
}

#[test]
fn test_pcm16_values_within_one_quantization_step() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mono.wav");
    let samples = ramp(2000, 1);
    let buffer = AudioBuffer::new(samples.clone(), 1, 22050).unwrap();

    let adapter = WavAdapter::new(SampleDepth::Pcm16);
    adapter.save(&path, &buffer).unwrap();
    let loaded = adapter.load(&path).unwrap();

    for (original, decoded) in samples.iter().zip(loaded.samples()) {
        assert_abs_diff_eq!(*original, *decoded, epsilon = 1.0 / 32768.0);
    }
}

#[test]
fn test_float32_is_lossless() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("float.wav");
    let samples = ramp(1024, 2);
    let buffer = AudioBuffer::new(samples.clone(), 2, 48000).unwrap();

    let adapter = WavAdapter::new(SampleDepth::Float32);
    adapter.save(&path, &buffer).unwrap();
    let loaded = adapter.load(&path).unwrap();

    assert_eq!(loaded.samples(), samples.as_slice());
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twice.wav");
    let adapter = default_audio_adapter();

    let long = AudioBuffer::new(ramp(3000, 2), 2, 44100).unwrap();
    let short = AudioBuffer::new(ramp(100, 2), 2, 44100).unwrap();
    adapter.save(&path, &long).unwrap();
    adapter.save(&path, &short).unwrap();

    assert_eq!(adapter.load(&path).unwrap().frames(), 100);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let result = default_audio_adapter().load(&dir.path().join("absent.wav"));
    assert!(result.is_err());
}
