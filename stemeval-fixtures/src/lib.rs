// Synthetic evaluation datasets
pub mod generator;
pub mod layout;
pub mod rng;

pub use generator::{
    FakeDataset, FakeDatasetGenerator, FakeDatasetSpec, SongFixture, generate_fake_eval_dataset,
};
pub use layout::DatasetLayout;
pub use rng::MersenneTwister;
