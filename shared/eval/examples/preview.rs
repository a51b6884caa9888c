use anyhow::{bail, Context, Result};
use clap::Parser;
use proctor_eval::{grade, ExamKey, Paper, Submission};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
struct Args {
    /// Exam answer key (JSON)
    #[arg(long)]
    exam: PathBuf,

    /// Student id the paper is built for
    #[arg(long)]
    student: String,

    /// Optional submission (JSON) to grade against the student's paper
    #[arg(long)]
    answers: Option<PathBuf>,

    /// Print the paper as JSON instead of a listing
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.student.is_empty() {
        bail!("--student must not be empty");
    }
    let exam = ExamKey::from_path(&args.exam)
        .with_context(|| format!("loading exam from {}", args.exam.display()))?;

    let paper = Paper::for_student(&exam, &args.student);
    let questions = paper.questions();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&questions)?);
    } else {
        println!("{} for {} (seed {})", exam.id, args.student, paper.seed());
        for question in &questions {
            let labels = question
                .options
                .iter()
                .map(|o| match &o.text {
                    Some(text) => text.clone(),
                    None => o.label.to_owned(),
                })
                .collect::<Vec<_>>();
            println!(
                "{:>3}. question {} [{}]",
                question.position,
                question.question,
                labels.join(", ")
            );
        }
    }

    if let Some(path) = args.answers {
        let submission: Submission = serde_json::from_str(
            &std::fs::read_to_string(&path)
                .with_context(|| format!("reading answers from {}", path.display()))?,
        )?;
        let report = grade(&exam, &args.student, &submission)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
