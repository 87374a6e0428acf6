//! The `quizmaker validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmaker_core::parser::{load_quiz_directory, parse_quiz, validate_quiz};

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quizzes = if quiz_path.is_dir() {
        load_quiz_directory(&quiz_path)?
    } else {
        vec![parse_quiz(&quiz_path)?]
    };

    let mut total_warnings = 0;

    for loaded in &quizzes {
        println!(
            "Quiz: {} ({} questions)",
            loaded.quiz.title(),
            loaded.quiz.len()
        );

        let warnings = validate_quiz(loaded);
        for w in &warnings {
            let prefix = w
                .question
                .map(|i| format!("  [#{i}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
