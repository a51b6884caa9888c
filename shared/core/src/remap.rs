use crate::{Permutation, RemapError};

/// Restores answers given by shuffled position to canonical position.
///
/// Every slot starts unanswered and is written exactly once, so `None`
/// entries survive the round trip unchanged.
pub fn to_original_order<A: Clone>(
    shuffled_answers: &[Option<A>],
    permutation: &Permutation,
) -> Result<Vec<Option<A>>, RemapError> {
    if shuffled_answers.len() != permutation.len() {
        return Err(RemapError::InputMismatch {
            expected: permutation.len(),
            actual: shuffled_answers.len(),
        });
    }
    let mut original = vec![None; shuffled_answers.len()];
    for (answer, &original_index) in shuffled_answers
        .iter()
        .zip(permutation.original_index_of())
    {
        original[original_index] = answer.clone();
    }
    Ok(original)
}

/// Inverse of [`to_original_order`]: lays canonical answers out in shuffled order.
pub fn to_shuffled_order<A: Clone>(
    original_answers: &[Option<A>],
    permutation: &Permutation,
) -> Result<Vec<Option<A>>, RemapError> {
    permutation.apply(original_answers)
}
