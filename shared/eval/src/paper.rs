use crate::exam::{option_index, option_letter, ExamKey};
use proctor_core::{
    derive_question_seed, derive_seed, to_original_order, Permutation, RemapError, Seed,
};
use serde::Serialize;
use tracing::{debug, warn};

/// One student's copy of an exam: the order multiple-choice questions are
/// shown in, and the order of each question's options.
///
/// Built from the exam and student ids alone. Serving and grading both
/// rebuild it; nothing here is meant to be stored.
#[derive(Debug)]
pub struct Paper<'a> {
    exam: &'a ExamKey,
    seed: Seed,
    question_order: Permutation,
    // indexed by canonical question position
    option_orders: Vec<Permutation>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaperOption {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaperQuestion {
    /// 1-based position on the student's paper.
    pub position: usize,
    pub question: u32,
    pub options: Vec<PaperOption>,
}

impl<'a> Paper<'a> {
    pub fn for_student(exam: &'a ExamKey, student_id: &str) -> Self {
        let seed = derive_seed(&exam.id, student_id);
        let question_order = exam.shuffle.questions.permutation(exam.mc.len(), seed);
        let option_orders = exam
            .mc
            .iter()
            .map(|key| {
                let seed = derive_question_seed(&exam.id, student_id, &key.question.to_string());
                exam.shuffle.options.permutation(key.option_count(), seed)
            })
            .collect();
        debug!(
            exam = %exam.id,
            student = student_id,
            %seed,
            questions = exam.mc.len(),
            "Built paper"
        );
        Self {
            exam,
            seed,
            question_order,
            option_orders,
        }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn question_order(&self) -> &Permutation {
        &self.question_order
    }

    pub fn option_order(&self, canonical: usize) -> Option<&Permutation> {
        self.option_orders.get(canonical)
    }

    /// The paper as the student sees it. Carries no answer key.
    pub fn questions(&self) -> Vec<PaperQuestion> {
        self.question_order
            .original_index_of()
            .iter()
            .enumerate()
            .map(|(position, &canonical)| {
                let key = &self.exam.mc[canonical];
                let options = self.option_orders[canonical]
                    .original_index_of()
                    .iter()
                    .enumerate()
                    .filter_map(|(shown, &original)| {
                        let label = option_letter(shown)?;
                        Some(PaperOption {
                            label,
                            text: key.options.get(original).map(|text| relabel(text, label)),
                        })
                    })
                    .collect();
                PaperQuestion {
                    position: position + 1,
                    question: key.question,
                    options,
                }
            })
            .collect()
    }

    /// Maps multiple-choice answers, given by paper position and shown
    /// letter, back to canonical question order and canonical letters.
    pub fn canonical_mc_answers(
        &self,
        shown: &[Option<String>],
    ) -> Result<Vec<Option<String>>, RemapError> {
        let by_question = to_original_order(shown, &self.question_order)?;
        Ok(by_question
            .into_iter()
            .enumerate()
            .map(|(canonical, answer)| {
                answer.map(|letter| self.canonical_letter(canonical, letter))
            })
            .collect())
    }

    fn canonical_letter(&self, canonical: usize, letter: String) -> String {
        let original = option_index(&letter)
            .and_then(|shown| self.option_orders[canonical].original_index(shown))
            .and_then(option_letter);
        match original {
            Some(original) => original.to_owned(),
            None => {
                warn!(
                    exam = %self.exam.id,
                    question = self.exam.mc[canonical].question,
                    letter = %letter,
                    "Answer is not one of the options shown"
                );
                letter
            }
        }
    }
}

// "B. text" shown in slot C becomes "C. text"
fn relabel(text: &str, label: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some('.')) if first.is_ascii_uppercase() => {
            format!("{label}.{}", &text[2..])
        }
        _ => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::{McKey, ShuffleConfig};
    use proctor_core::Shuffle;

    fn mc(question: u32, answer: &str) -> McKey {
        McKey {
            question,
            answer: answer.to_owned(),
            options: Vec::new(),
        }
    }

    fn exam(shuffle: ShuffleConfig, mc: Vec<McKey>) -> ExamKey {
        ExamKey {
            id: "exam-1".to_owned(),
            title: String::new(),
            shuffle,
            mc,
            tf: Vec::new(),
            sa: Vec::new(),
        }
    }

    #[test]
    fn test_relabel() {
        assert_eq!(relabel("B. Paris", "C"), "C. Paris");
        assert_eq!(relabel("Paris", "C"), "Paris");
        assert_eq!(relabel("b. Paris", "C"), "b. Paris");
        assert_eq!(relabel("", "C"), "");
    }

    #[test]
    fn test_question_order_matches_deployed_seed() {
        let exam = exam(
            ShuffleConfig::default(),
            (1..=10).map(|q| mc(q, "A")).collect(),
        );
        let paper = Paper::for_student(&exam, "student-1");
        assert_eq!(u32::from(paper.seed()), 1920550524);
        let shown: Vec<u32> = paper.questions().iter().map(|q| q.question).collect();
        assert_eq!(shown, vec![8, 5, 3, 7, 1, 6, 2, 4, 9, 10]);
    }

    #[test]
    fn test_dont_shuffle_keeps_order() {
        let exam = exam(
            ShuffleConfig {
                questions: Shuffle::DontShuffle,
                options: Shuffle::DontShuffle,
            },
            (1..=5).map(|q| mc(q, "B")).collect(),
        );
        let paper = Paper::for_student(&exam, "student-1");
        assert!(paper.question_order().is_identity());
        let labels: Vec<&str> = paper.questions()[0].options.iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_option_shuffle_relabels_texts() {
        let mut key = mc(4, "C");
        key.options = vec!["A. 1".into(), "B. 2".into(), "C. 3".into(), "D. 4".into()];
        let exam = exam(
            ShuffleConfig {
                questions: Shuffle::DontShuffle,
                options: Shuffle::PerStudent,
            },
            vec![key],
        );
        let paper = Paper::for_student(&exam, "student-1");
        let order = paper.option_order(0).unwrap();
        let questions = paper.questions();
        for (shown, option) in questions[0].options.iter().enumerate() {
            let original = order.original_index_of()[shown];
            let value = ["1", "2", "3", "4"][original];
            assert_eq!(
                option.text.as_deref(),
                Some(format!("{}. {value}", option.label).as_str())
            );
        }
    }

    #[test]
    fn test_canonical_letters_follow_option_order() {
        let exam = exam(
            ShuffleConfig {
                questions: Shuffle::DontShuffle,
                options: Shuffle::PerStudent,
            },
            vec![mc(1, "A"), mc(2, "A")],
        );
        let paper = Paper::for_student(&exam, "student-7");
        let order = paper.option_order(1).unwrap();
        // the student picks whatever sits in shown slot B for question 2
        let expected = option_letter(order.original_index_of()[1]).unwrap();
        let answers = paper
            .canonical_mc_answers(&[None, Some("b".to_owned())])
            .unwrap();
        assert_eq!(answers, vec![None, Some(expected.to_owned())]);
    }

    #[test]
    fn test_unknown_letter_is_kept() {
        let exam = exam(ShuffleConfig::default(), vec![mc(1, "A")]);
        let paper = Paper::for_student(&exam, "student-1");
        let answers = paper.canonical_mc_answers(&[Some("Z".to_owned())]).unwrap();
        assert_eq!(answers, vec![Some("Z".to_owned())]);
    }

    #[test]
    fn test_wrong_answer_count() {
        let exam = exam(ShuffleConfig::default(), vec![mc(1, "A"), mc(2, "B")]);
        let paper = Paper::for_student(&exam, "student-1");
        assert_eq!(
            paper.canonical_mc_answers(&[None]),
            Err(RemapError::InputMismatch {
                expected: 2,
                actual: 1
            })
        );
    }
}
