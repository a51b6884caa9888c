use std::fmt;

use serde::{Deserialize, Serialize};

/// Seed for a per-student shuffle. Always in `1..=2^31`, including when
/// deserialized.
///
/// Seeds are recomputed from stable identifiers on every request and are
/// never stored, so the derivation below must stay bit-compatible with the
/// orderings students have already been served.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32")]
pub struct Seed(u32);

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Seed> for u32 {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl From<u32> for Seed {
    fn from(s: u32) -> Self {
        Self::from_u32(s)
    }
}

impl Seed {
    pub const MAX: u32 = 1 << 31;

    /// Clamps an arbitrary value into the seed domain: zero becomes 1,
    /// anything above 2^31 becomes 2^31.
    pub fn from_u32(s: u32) -> Self {
        Self(s.clamp(1, Self::MAX))
    }

    fn from_hash(hash: i32) -> Self {
        // |i32::MIN| is 2^31, which is why the seed is carried unsigned
        Self::from_u32(hash.unsigned_abs())
    }
}

// 31 * acc + c over UTF-16 code units, wrapping at 32 bits every step
fn rolling_hash<'a>(parts: impl IntoIterator<Item = &'a str>) -> i32 {
    parts
        .into_iter()
        .flat_map(str::encode_utf16)
        .fold(0i32, |acc, c| acc.wrapping_mul(31).wrapping_add(i32::from(c)))
}

/// Seed for the exam-level question order of one student.
pub fn derive_seed(exam_id: &str, student_id: &str) -> Seed {
    Seed::from_hash(rolling_hash([exam_id, student_id]))
}

/// Seed for the option order of a single question.
///
/// The question id goes first so that neighbouring ids ("1", "2", ...)
/// land far apart instead of on consecutive seeds.
pub fn derive_question_seed(exam_id: &str, student_id: &str, question_id: &str) -> Seed {
    Seed::from_hash(rolling_hash([question_id, ":", exam_id, student_id]))
}
