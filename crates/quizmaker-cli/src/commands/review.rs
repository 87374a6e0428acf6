//! The `quizmaker review` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmaker_core::report::AttemptReport;

pub fn execute(report_path: PathBuf) -> Result<()> {
    let report = AttemptReport::load_json(&report_path)?;

    print!("{}", report.to_markdown());
    if report.mistakes().next().is_none() {
        println!("\nNo mistakes.");
    }
    println!(
        "\nAttempt {} finished {}",
        report.attempt,
        report.completed_at.format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}
