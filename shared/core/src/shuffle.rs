use serde::{Deserialize, Serialize};

use crate::{Permutation, Seed};

#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Shuffle {
    DontShuffle,
    #[default]
    PerStudent,
}

impl Shuffle {
    pub fn permutation(self, len: usize, seed: Seed) -> Permutation {
        match self {
            Shuffle::DontShuffle => Permutation::identity(len),
            Shuffle::PerStudent => Permutation::from_seed(len, seed),
        }
    }
}
