//! JSON quiz record loader.
//!
//! Loads quiz records from JSON files and directories, derives the answer
//! pool, and validates them.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AnswerPool, Question, Quiz, QuizListing};
use crate::sampler::DEFAULT_MAX_DISTRACTORS;

/// Intermediate structure for parsing quiz files.
///
/// Fields are optional so that missing data is reported as a `QuizError`
/// naming the question, rather than a generic deserialisation failure.
#[derive(Debug, Deserialize)]
struct JsonQuizFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    questions: Vec<JsonQuestion>,
    #[serde(default)]
    all_answers: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct JsonQuestion {
    #[serde(default)]
    photo: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

/// A quiz together with its answer pool and the name it was loaded under.
#[derive(Debug, Clone)]
pub struct LoadedQuiz {
    /// File stem of the source file.
    pub name: String,
    pub quiz: Quiz,
    pub pool: AnswerPool,
}

impl LoadedQuiz {
    pub fn listing(&self) -> QuizListing {
        QuizListing {
            name: self.name.clone(),
            title: self.quiz.title().to_string(),
            question_count: self.quiz.len(),
        }
    }
}

/// Parse a single JSON file into a `LoadedQuiz`.
pub fn parse_quiz(path: &Path) -> Result<LoadedQuiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a JSON string into a `LoadedQuiz` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<LoadedQuiz> {
    let parsed: JsonQuizFile = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            media: q.photo.unwrap_or_default(),
            answer: q.answer.unwrap_or_default(),
        })
        .collect();

    let quiz = Quiz::new(parsed.title.unwrap_or_default(), questions)
        .with_context(|| format!("invalid quiz: {}", source_path.display()))?;

    let pool = match parsed.all_answers {
        Some(answers) => AnswerPool::new(answers),
        None => quiz.answer_pool(),
    };

    let name = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(LoadedQuiz { name, quiz, pool })
}

/// Load all `.json` quiz files in a directory, sorted by name.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<LoadedQuiz>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut quizzes = Vec::new();

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    quizzes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(quizzes)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Positional index of the question (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a loaded quiz for issues that do not stop a session.
pub fn validate_quiz(loaded: &LoadedQuiz) -> Vec<ValidationWarning> {
    validate_quiz_with(loaded, DEFAULT_MAX_DISTRACTORS)
}

/// Like `validate_quiz`, against a specific distractor count.
pub fn validate_quiz_with(loaded: &LoadedQuiz, max_distractors: usize) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let questions = loaded.quiz.questions();

    let mut seen_media = HashSet::new();
    for (i, q) in questions.iter().enumerate() {
        if !seen_media.insert(q.media.as_str()) {
            warnings.push(ValidationWarning {
                question: Some(i),
                message: format!("duplicate photo: {}", q.media),
            });
        }
    }

    let mut answer_uses: HashMap<&str, usize> = HashMap::new();
    for q in questions {
        *answer_uses.entry(q.answer.as_str()).or_default() += 1;
    }
    for (i, q) in questions.iter().enumerate() {
        if q.answer != q.answer.trim() {
            warnings.push(ValidationWarning {
                question: Some(i),
                message: format!("answer has surrounding whitespace: {:?}", q.answer),
            });
        }
    }
    let mut repeated: Vec<_> = answer_uses.iter().filter(|(_, n)| **n > 1).collect();
    repeated.sort();
    for (answer, n) in repeated {
        warnings.push(ValidationWarning {
            question: None,
            message: format!("answer {answer:?} is used by {n} questions"),
        });
    }

    for (i, q) in questions.iter().enumerate() {
        if !loaded.pool.contains(&q.answer) {
            warnings.push(ValidationWarning {
                question: Some(i),
                message: format!("answer {:?} is missing from all_answers", q.answer),
            });
        }
    }

    let wanted = max_distractors + 1;
    if loaded.pool.len() < wanted {
        warnings.push(ValidationWarning {
            question: None,
            message: format!(
                "answer pool has {} entries; questions will show fewer than {wanted} choices",
                loaded.pool.len()
            ),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_JSON: &str = r#"{
  "title": "Animals",
  "questions": [
    { "photo": "img/cat.jpg", "answer": "cat" },
    { "photo": "img/dog.jpg", "answer": "dog" },
    { "photo": "img/cow.jpg", "answer": "cow" },
    { "photo": "img/owl.jpg", "answer": "owl" },
    { "photo": "img/fox.jpg", "answer": "fox" }
  ]
}"#;

    #[test]
    fn parse_valid_json() {
        let loaded = parse_quiz_str(VALID_JSON, &PathBuf::from("animals.json")).unwrap();
        assert_eq!(loaded.name, "animals");
        assert_eq!(loaded.quiz.title(), "Animals");
        assert_eq!(loaded.quiz.len(), 5);
        assert_eq!(loaded.pool.len(), 5);
        assert_eq!(loaded.quiz.questions()[1].media, "img/dog.jpg");
        assert!(validate_quiz(&loaded).is_empty());
    }

    #[test]
    fn explicit_pool_is_used_and_deduplicated() {
        let json = r#"{
  "title": "Pairs",
  "questions": [{ "photo": "a.jpg", "answer": "cat" }],
  "all_answers": ["cat", "dog", "cat", "cow", "owl"]
}"#;
        let loaded = parse_quiz_str(json, &PathBuf::from("pairs.json")).unwrap();
        assert_eq!(loaded.pool.iter().collect::<Vec<_>>(), vec!["cat", "dog", "cow", "owl"]);
    }

    #[test]
    fn missing_answer_is_fatal() {
        let json = r#"{ "title": "T", "questions": [{ "photo": "a.jpg" }] }"#;
        let err = parse_quiz_str(json, &PathBuf::from("t.json")).unwrap_err();
        assert!(format!("{err:#}").contains("question 0 has no answer"));
    }

    #[test]
    fn missing_title_and_empty_questions_are_fatal() {
        let err = parse_quiz_str(r#"{ "questions": [] }"#, &PathBuf::from("t.json")).unwrap_err();
        assert!(format!("{err:#}").contains("title"));

        let err =
            parse_quiz_str(r#"{ "title": "T", "questions": [] }"#, &PathBuf::from("t.json"))
                .unwrap_err();
        assert!(format!("{err:#}").contains("no questions"));
    }

    #[test]
    fn parse_malformed_json() {
        let result = parse_quiz_str("{ not json", &PathBuf::from("bad.json"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_small_pool_and_repeats() {
        let json = r#"{
  "title": "Tiny",
  "questions": [
    { "photo": "a.jpg", "answer": "cat" },
    { "photo": "a.jpg", "answer": "cat" }
  ]
}"#;
        let loaded = parse_quiz_str(json, &PathBuf::from("tiny.json")).unwrap();
        let warnings = validate_quiz(&loaded);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate photo")));
        assert!(warnings.iter().any(|w| w.message.contains("used by 2 questions")));
        assert!(warnings.iter().any(|w| w.message.contains("fewer than 4 choices")));
    }

    #[test]
    fn validate_answer_missing_from_explicit_pool() {
        let json = r#"{
  "title": "T",
  "questions": [{ "photo": "a.jpg", "answer": " cat" }],
  "all_answers": ["dog"]
}"#;
        let loaded = parse_quiz_str(json, &PathBuf::from("t.json")).unwrap();
        let warnings = validate_quiz_with(&loaded, 0);
        assert!(warnings.iter().any(|w| w.message.contains("missing from all_answers")));
        assert!(warnings.iter().any(|w| w.message.contains("whitespace")));
    }

    #[test]
    fn load_directory_skips_bad_files_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zoo.json"), VALID_JSON).unwrap();
        std::fs::write(dir.path().join("animals.json"), VALID_JSON).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let quizzes = load_quiz_directory(dir.path()).unwrap();
        let names: Vec<_> = quizzes.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["animals", "zoo"]);

        let listing = quizzes[0].listing();
        assert_eq!(listing.title, "Animals");
        assert_eq!(listing.question_count, 5);
    }

    #[test]
    fn load_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.json");
        std::fs::write(&file, VALID_JSON).unwrap();
        assert!(load_quiz_directory(&file).is_err());
    }
}
