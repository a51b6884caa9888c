mod error;
mod park_miller;
mod permutation;
mod remap;
mod seed;
mod shuffle;

pub use error::RemapError;
pub use park_miller::ParkMiller;
pub use permutation::{deterministic_shuffle, shuffle_with_mapping, Permutation, ShuffleMapping};
pub use remap::{to_original_order, to_shuffled_order};
pub use seed::{derive_question_seed, derive_seed, Seed};
pub use shuffle::Shuffle;
