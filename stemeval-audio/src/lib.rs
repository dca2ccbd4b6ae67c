// Audio adapter: stem persistence for fixtures and evaluation
pub mod adapter;
pub mod buffer;
pub mod decoder;

pub use adapter::{AudioAdapter, SampleDepth, WavAdapter, default_audio_adapter};
pub use buffer::AudioBuffer;
pub use decoder::decode_file;
