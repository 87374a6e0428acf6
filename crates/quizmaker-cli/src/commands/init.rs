//! The `quizmaker init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizmaker.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("content").context("failed to create content/")?;
    write_if_missing(Path::new("content/example.json"), EXAMPLE_QUIZ)?;

    println!("\nNext steps:");
    println!("  1. Put the photos referenced by content/example.json next to it");
    println!("  2. Run: quizmaker validate --quiz content");
    println!("  3. Run: quizmaker play --quiz content/example.json");

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmaker configuration

# Milliseconds feedback stays up before the next question
feedback_delay_ms = 1500

# Wrong answers offered next to the right one
max_distractors = 3

# Ring the terminal bell for sound cues
sound = true

# Fix the question order (omit for a fresh shuffle every run)
# seed = 42

offline_cache_version = "v1"
"#;

const EXAMPLE_QUIZ: &str = r#"{
  "title": "Which animal is this?",
  "questions": [
    { "photo": "images/cat.jpg", "answer": "cat" },
    { "photo": "images/dog.jpg", "answer": "dog" },
    { "photo": "images/owl.jpg", "answer": "owl" },
    { "photo": "images/fox.jpg", "answer": "fox" },
    { "photo": "images/cow.jpg", "answer": "cow" }
  ]
}
"#;
