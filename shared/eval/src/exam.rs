use crate::{traits::Numbered, ASCII_UPPERCASE};
use proctor_core::Shuffle;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};
use thiserror::Error;

pub const DEFAULT_OPTION_COUNT: usize = 4;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleConfig {
    #[serde(default)]
    pub questions: Shuffle,
    #[serde(default = "dont_shuffle")]
    pub options: Shuffle,
}

fn dont_shuffle() -> Shuffle {
    Shuffle::DontShuffle
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            questions: Shuffle::PerStudent,
            options: Shuffle::DontShuffle,
        }
    }
}

/// Answer key of one multiple-choice question. `answer` is a letter.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct McKey {
    pub question: u32,
    pub answer: String,
    /// Option texts, when the exam comes from a question bank rather than a PDF.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl McKey {
    pub fn option_count(&self) -> usize {
        match self.options.is_empty() {
            true => DEFAULT_OPTION_COUNT,
            false => self.options.len(),
        }
    }

    pub fn answer_index(&self) -> Option<usize> {
        option_index(&self.answer).filter(|&i| i < self.option_count())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TfKey {
    pub question: u32,
    pub a: bool,
    pub b: bool,
    pub c: bool,
    pub d: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum NumericAnswer {
    Number(f64),
    Text(String),
}

impl NumericAnswer {
    pub fn value(&self) -> Option<f64> {
        match self {
            NumericAnswer::Number(x) => Some(*x),
            NumericAnswer::Text(text) => parse_decimal(text),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SaKey {
    pub question: u32,
    pub answer: NumericAnswer,
}

impl Numbered for TfKey {
    fn question(&self) -> u32 {
        self.question
    }
}

impl Numbered for SaKey {
    fn question(&self) -> u32 {
        self.question
    }
}

impl Numbered for McKey {
    fn question(&self) -> u32 {
        self.question
    }
}

/// Server-side view of an exam: identifiers, answer keys and shuffle policy.
/// Never sent to students as is.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExamKey {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub shuffle: ShuffleConfig,
    #[serde(default)]
    pub mc: Vec<McKey>,
    #[serde(default)]
    pub tf: Vec<TfKey>,
    #[serde(default)]
    pub sa: Vec<SaKey>,
}

#[derive(Debug, Error)]
pub enum LoadExamError {
    #[error("failed to read exam file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse exam: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("exam id is empty")]
    MissingId,

    #[error("question {question} appears more than once in the {section} section")]
    DuplicateQuestion { section: &'static str, question: u32 },

    #[error("question {question} has answer {answer:?}, which is not one of its {options} options")]
    InvalidAnswer {
        question: u32,
        answer: String,
        options: usize,
    },

    #[error("short answer {question} has answer {answer:?}, which is not a number")]
    InvalidNumericAnswer { question: u32, answer: String },

    #[error("question {question} has {options} options, at most {max} are supported")]
    TooManyOptions {
        question: u32,
        options: usize,
        max: usize,
    },
}

impl ExamKey {
    pub fn from_json_str(json: &str) -> Result<Self, LoadExamError> {
        let exam: ExamKey = serde_json::from_str(json)?;
        exam.validate()?;
        Ok(exam)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadExamError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), LoadExamError> {
        if self.id.is_empty() {
            return Err(LoadExamError::MissingId);
        }
        check_unique("mc", &self.mc)?;
        check_unique("tf", &self.tf)?;
        check_unique("sa", &self.sa)?;
        for key in &self.mc {
            if key.option_count() > ASCII_UPPERCASE.len() {
                return Err(LoadExamError::TooManyOptions {
                    question: key.question,
                    options: key.option_count(),
                    max: ASCII_UPPERCASE.len(),
                });
            }
            if key.answer_index().is_none() {
                return Err(LoadExamError::InvalidAnswer {
                    question: key.question,
                    answer: key.answer.clone(),
                    options: key.option_count(),
                });
            }
        }
        for key in &self.sa {
            if let (NumericAnswer::Text(answer), None) = (&key.answer, key.answer.value()) {
                return Err(LoadExamError::InvalidNumericAnswer {
                    question: key.question,
                    answer: answer.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn total_questions(&self) -> usize {
        self.mc.len() + self.tf.len() + self.sa.len()
    }
}

fn check_unique<T: Numbered>(section: &'static str, keys: &[T]) -> Result<(), LoadExamError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key.question()) {
            return Err(LoadExamError::DuplicateQuestion {
                section,
                question: key.question(),
            });
        }
    }
    Ok(())
}

pub fn option_letter(index: usize) -> Option<&'static str> {
    ASCII_UPPERCASE.get(index).copied()
}

pub fn option_index(letter: &str) -> Option<usize> {
    let letter = letter.trim();
    ASCII_UPPERCASE
        .iter()
        .position(|x| x.eq_ignore_ascii_case(letter))
}

/// Accepts both `.` and `,` as the decimal separator.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_letters() {
        assert_eq!(option_letter(0), Some("A"));
        assert_eq!(option_letter(3), Some("D"));
        assert_eq!(option_letter(26), None);
        assert_eq!(option_index("c"), Some(2));
        assert_eq!(option_index(" B "), Some(1));
        assert_eq!(option_index("AB"), None);
        assert_eq!(option_index(""), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("3,5"), Some(3.5));
        assert_eq!(parse_decimal(" -0.25 "), Some(-0.25));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_defaults() {
        let exam = ExamKey::from_json_str(r#"{"id": "e1"}"#).unwrap();
        assert_eq!(exam.shuffle, ShuffleConfig::default());
        assert_eq!(exam.total_questions(), 0);
    }

    #[test]
    fn test_partial_shuffle_config() {
        let exam =
            ExamKey::from_json_str(r#"{"id": "e1", "shuffle": {"options": "per_student"}}"#)
                .unwrap();
        assert_eq!(exam.shuffle.questions, Shuffle::PerStudent);
        assert_eq!(exam.shuffle.options, Shuffle::PerStudent);
    }

    #[test]
    fn test_numeric_answer_forms() {
        let exam = ExamKey::from_json_str(
            r#"{"id": "e1", "sa": [{"question": 1, "answer": 2.5}, {"question": 2, "answer": "1,5"}]}"#,
        )
        .unwrap();
        assert_eq!(exam.sa[0].answer.value(), Some(2.5));
        assert_eq!(exam.sa[1].answer.value(), Some(1.5));
    }

    #[test]
    fn test_rejects_duplicate_question() {
        let err = ExamKey::from_json_str(
            r#"{"id": "e1", "mc": [{"question": 1, "answer": "A"}, {"question": 1, "answer": "B"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadExamError::DuplicateQuestion {
                section: "mc",
                question: 1
            }
        ));
    }

    #[test]
    fn test_rejects_answer_outside_options() {
        let err = ExamKey::from_json_str(
            r#"{"id": "e1", "mc": [{"question": 1, "answer": "C", "options": ["A. x", "B. y"]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadExamError::InvalidAnswer { question: 1, .. }));
    }

    #[test]
    fn test_rejects_missing_id() {
        assert!(matches!(
            ExamKey::from_json_str(r#"{"id": ""}"#),
            Err(LoadExamError::MissingId)
        ));
    }

    #[test]
    fn test_rejects_unparseable_short_answer() {
        let err = ExamKey::from_json_str(
            r#"{"id": "e1", "sa": [{"question": 1, "answer": 3}, {"question": 2, "answer": "abc"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadExamError::InvalidNumericAnswer { question: 2, ref answer } if answer == "abc"
        ));
    }
}
