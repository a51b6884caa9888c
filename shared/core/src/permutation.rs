use serde::{Deserialize, Serialize};

use crate::{ParkMiller, RemapError, Seed};

// Fisher-Yates shuffle, per Knuth, run over indices so both directions of the
// mapping fall out of a single pass
// https://en.wikipedia.org/wiki/Fisher%E2%80%93Yates_shuffle

/// A bijection between canonical positions and shuffled positions.
///
/// `original_index_of[s]` is the canonical position of the element shown at
/// shuffled position `s`; `shuffled_index_of` is its inverse. Serialized as
/// `original_index_of` alone and checked again on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation {
    original_index_of: Vec<usize>,
    shuffled_index_of: Vec<usize>,
}

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self {
            original_index_of: (0..len).collect(),
            shuffled_index_of: (0..len).collect(),
        }
    }

    pub fn from_seed(len: usize, seed: Seed) -> Self {
        let mut rng = ParkMiller::new(seed);
        let mut indices: Vec<usize> = (0..len).collect();

        for i in (1..len).rev() {
            let j = rng.next_range(i + 1);
            indices.swap(i, j);
        }

        Self::from_indices_unchecked(indices)
    }

    /// Validates that `original_index_of` is a permutation of `0..len`.
    pub fn from_original_indices(original_index_of: Vec<usize>) -> Result<Self, RemapError> {
        let len = original_index_of.len();
        let mut seen = vec![false; len];
        for (position, &index) in original_index_of.iter().enumerate() {
            if index >= len || std::mem::replace(&mut seen[index], true) {
                return Err(RemapError::NotAPermutation { position, index });
            }
        }
        Ok(Self::from_indices_unchecked(original_index_of))
    }

    fn from_indices_unchecked(original_index_of: Vec<usize>) -> Self {
        let mut shuffled_index_of = vec![0; original_index_of.len()];
        for (shuffled, &original) in original_index_of.iter().enumerate() {
            shuffled_index_of[original] = shuffled;
        }
        Self {
            original_index_of,
            shuffled_index_of,
        }
    }

    pub fn len(&self) -> usize {
        self.original_index_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original_index_of.is_empty()
    }

    pub fn original_index_of(&self) -> &[usize] {
        &self.original_index_of
    }

    pub fn shuffled_index_of(&self) -> &[usize] {
        &self.shuffled_index_of
    }

    pub fn original_index(&self, shuffled: usize) -> Option<usize> {
        self.original_index_of.get(shuffled).copied()
    }

    pub fn shuffled_index(&self, original: usize) -> Option<usize> {
        self.shuffled_index_of.get(original).copied()
    }

    pub fn is_identity(&self) -> bool {
        self.original_index_of
            .iter()
            .enumerate()
            .all(|(i, &original)| i == original)
    }

    /// Reorders canonically ordered `items` into shuffled order.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, RemapError> {
        if items.len() != self.len() {
            return Err(RemapError::InputMismatch {
                expected: self.len(),
                actual: items.len(),
            });
        }
        Ok(self
            .original_index_of
            .iter()
            .map(|&original| items[original].clone())
            .collect())
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = RemapError;

    fn try_from(original_index_of: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_original_indices(original_index_of)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.original_index_of
    }
}

/// The shuffled sequence together with the permutation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShuffleMapping<T> {
    pub shuffled: Vec<T>,
    pub permutation: Permutation,
}

impl<T> ShuffleMapping<T> {
    pub fn original_index_of(&self) -> &[usize] {
        self.permutation.original_index_of()
    }

    pub fn shuffled_index_of(&self) -> &[usize] {
        self.permutation.shuffled_index_of()
    }
}

pub fn shuffle_with_mapping<T: Clone>(items: &[T], seed: Seed) -> ShuffleMapping<T> {
    let permutation = Permutation::from_seed(items.len(), seed);
    let shuffled = permutation
        .original_index_of()
        .iter()
        .map(|&original| items[original].clone())
        .collect();
    ShuffleMapping {
        shuffled,
        permutation,
    }
}

/// In-place variant of [`shuffle_with_mapping`]; yields the same order.
pub fn deterministic_shuffle<T>(items: &mut [T], seed: Seed) {
    let mut rng = ParkMiller::new(seed);

    for i in (1..items.len()).rev() {
        let j = rng.next_range(i + 1);
        items.swap(i, j);
    }
}
