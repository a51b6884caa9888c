mod exam;
mod grading;
mod paper;
mod traits;

pub use exam::{
    option_index, option_letter, parse_decimal, ExamKey, LoadExamError, McKey, NumericAnswer,
    SaKey, ShuffleConfig, TfKey, DEFAULT_OPTION_COUNT,
};
pub use grading::{
    grade, CheatFlags, GradeError, GradeReport, SaAnswer, Submission, TfAnswer, SA_TOLERANCE,
};
pub use paper::{Paper, PaperOption, PaperQuestion};
pub use traits::{find_by_question, Numbered};

pub const ASCII_UPPERCASE: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];
