use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemapError {
    #[error("answer list has {actual} entries but the permutation covers {expected}")]
    InputMismatch { expected: usize, actual: usize },

    #[error("index {index} at position {position} is out of range or repeated")]
    NotAPermutation { position: usize, index: usize },
}
