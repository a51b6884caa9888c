use crate::{
    exam::{option_index, parse_decimal, ExamKey, McKey, SaKey, TfKey},
    paper::Paper,
    traits::{find_by_question, Numbered},
};
use proctor_core::RemapError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Relative tolerance for short numeric answers.
pub const SA_TOLERANCE: f64 = 0.05;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TfAnswer {
    pub question: u32,
    pub a: Option<bool>,
    pub b: Option<bool>,
    pub c: Option<bool>,
    pub d: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SaAnswer {
    pub question: u32,
    pub answer: String,
}

impl Numbered for TfAnswer {
    fn question(&self) -> u32 {
        self.question
    }
}

impl Numbered for SaAnswer {
    fn question(&self) -> u32 {
        self.question
    }
}

/// Integrity signals the client reports alongside a submission. Carried
/// into the report untouched; grading never looks at them.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheatFlags {
    #[serde(default)]
    pub tab_switches: u32,
    #[serde(default)]
    pub multi_browser: bool,
}

/// What a student sends in. Multiple-choice answers are addressed by their
/// position on the student's paper, true/false and short answers by
/// question number.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Submission {
    pub exam_id: String,
    /// `None` when the client sent no multiple-choice answers at all.
    #[serde(default)]
    pub mc_answers: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub tf_answers: Vec<TfAnswer>,
    #[serde(default)]
    pub sa_answers: Vec<SaAnswer>,
    /// Seconds, as measured by the client.
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub cheat_flags: CheatFlags,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GradeReport {
    pub exam_id: String,
    /// Multiple-choice answers in canonical order with canonical letters.
    pub mc_answers: Vec<Option<String>>,
    pub mc_correct: usize,
    pub mc_total: usize,
    pub tf_correct: f64,
    pub tf_total: usize,
    pub sa_correct: usize,
    pub sa_total: usize,
    pub correct_count: usize,
    /// Out of 10, rounded to two decimals.
    pub score: f64,
    pub time_spent: u64,
    pub cheat_flags: CheatFlags,
}

#[derive(Debug, Error, PartialEq)]
pub enum GradeError {
    #[error("submission is for exam {submitted}, not {expected}")]
    WrongExam { expected: String, submitted: String },

    #[error("multiple-choice answers don't match this student's paper: {0}")]
    Remap(#[from] RemapError),
}

pub fn grade(
    exam: &ExamKey,
    student_id: &str,
    submission: &Submission,
) -> Result<GradeReport, GradeError> {
    if submission.exam_id != exam.id {
        return Err(GradeError::WrongExam {
            expected: exam.id.clone(),
            submitted: submission.exam_id.clone(),
        });
    }

    let paper = Paper::for_student(exam, student_id);
    let mc_answers = match &submission.mc_answers {
        Some(shown) => paper.canonical_mc_answers(shown)?,
        None => vec![None; exam.mc.len()],
    };

    let mc_correct = exam
        .mc
        .iter()
        .zip(&mc_answers)
        .filter(|(key, answer)| mc_is_correct(key, answer.as_deref()))
        .count();
    let tf_correct: f64 = exam
        .tf
        .iter()
        .filter_map(|key| {
            find_by_question(&submission.tf_answers, key.question()).map(|x| tf_credit(key, x))
        })
        .sum();
    let sa_correct = exam
        .sa
        .iter()
        .filter(|key| {
            find_by_question(&submission.sa_answers, key.question())
                .is_some_and(|x| sa_is_correct(key, &x.answer))
        })
        .count();

    let total_questions = exam.total_questions();
    let total_correct = mc_correct as f64 + tf_correct + sa_correct as f64;
    let score = match total_questions {
        0 => 0.0,
        n => total_correct / n as f64 * 10.0,
    };
    let score = (score * 100.0).round() / 100.0;

    info!(
        exam = %exam.id,
        student = student_id,
        score,
        mc_correct,
        tf_correct,
        sa_correct,
        "Graded submission"
    );

    Ok(GradeReport {
        exam_id: exam.id.clone(),
        mc_answers,
        mc_correct,
        mc_total: exam.mc.len(),
        tf_correct,
        tf_total: exam.tf.len(),
        sa_correct,
        sa_total: exam.sa.len(),
        correct_count: total_correct.round() as usize,
        score,
        time_spent: submission.time_spent,
        cheat_flags: submission.cheat_flags,
    })
}

fn mc_is_correct(key: &McKey, answer: Option<&str>) -> bool {
    match (answer.and_then(option_index), key.answer_index()) {
        (Some(given), Some(expected)) => given == expected,
        _ => false,
    }
}

/// A quarter point per statement judged the same way as the key.
fn tf_credit(key: &TfKey, answer: &TfAnswer) -> f64 {
    let statements = [
        (key.a, answer.a),
        (key.b, answer.b),
        (key.c, answer.c),
        (key.d, answer.d),
    ];
    let matching = statements
        .into_iter()
        .filter(|(expected, given)| *given == Some(*expected))
        .count();
    matching as f64 / statements.len() as f64
}

fn sa_is_correct(key: &SaKey, answer: &str) -> bool {
    match (key.answer.value(), parse_decimal(answer)) {
        (Some(expected), Some(given)) => (expected - given).abs() <= expected.abs() * SA_TOLERANCE,
        _ => false,
    }
}
