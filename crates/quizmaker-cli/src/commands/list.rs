//! The `quizmaker list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizmaker_core::parser::load_quiz_directory;

pub fn execute(content_dir: PathBuf) -> Result<()> {
    let quizzes = load_quiz_directory(&content_dir)?;

    if quizzes.is_empty() {
        println!("No quizzes found in {}.", content_dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Title", "Questions"]);

    for listing in quizzes.iter().map(|q| q.listing()) {
        table.add_row(vec![
            Cell::new(&listing.name),
            Cell::new(&listing.title),
            Cell::new(listing.question_count),
        ]);
    }

    println!("{table}");
    Ok(())
}
