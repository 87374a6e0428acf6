//! The `quizmaker play` command.
//!
//! Drives a session from stdin. The only timer is the feedback delay; at most
//! one deadline is pending, and restarting drops it.

use std::io::Stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use quizmaker_core::config::load_config_from;
use quizmaker_core::parser::{parse_quiz, validate_quiz_with};
use quizmaker_core::{AdvanceTicket, ScheduledAdvance, Session};

use crate::terminal::TerminalPresenter;

type TerminalSession = Session<TerminalPresenter<Stdout>>;

/// What a line of input asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Restart,
    Choice(usize),
    Text(String),
    Empty,
}

fn parse_command(line: &str, choice_count: usize) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Empty,
        ":q" | ":quit" => Command::Quit,
        ":r" | ":restart" => Command::Restart,
        _ => match line.parse::<usize>() {
            Ok(n) if (1..=choice_count).contains(&n) => Command::Choice(n - 1),
            _ => Command::Text(line.to_string()),
        },
    }
}

pub async fn execute(
    quiz_path: PathBuf,
    seed: Option<u64>,
    delay_ms: Option<u64>,
    report_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(ms) = delay_ms {
        config.feedback_delay_ms = ms;
    }

    let loaded = parse_quiz(&quiz_path)?;
    for w in validate_quiz_with(&loaded, config.max_distractors) {
        match w.question {
            Some(i) => tracing::warn!("question {i}: {}", w.message),
            None => tracing::warn!("{}", w.message),
        }
    }

    let mut presenter = TerminalPresenter::new(std::io::stdout()).with_bell(config.sound);
    presenter.note(&format!(
        "{} ({} questions). Answer by number or text, :r restarts, :q quits.",
        loaded.quiz.title(),
        loaded.quiz.len()
    ));

    let mut session = Session::new(loaded.quiz, loaded.pool, config, presenter);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<(Instant, AdvanceTicket)> = None;

    prompt(&mut session, report_path.as_deref())?;

    loop {
        let timer = async move {
            match pending {
                Some((deadline, _)) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;

            _ = tokio::signal::ctrl_c() => {
                session.presenter_mut().note("\nInterrupted.");
                break;
            }

            () = timer => {
                if let Some((_, ticket)) = pending.take() {
                    session.advance(ticket);
                    prompt(&mut session, report_path.as_deref())?;
                }
            }

            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    // input is over, but feedback still on screen gets its advance
                    if let Some((deadline, ticket)) = pending.take() {
                        tokio::time::sleep_until(deadline).await;
                        session.advance(ticket);
                        prompt(&mut session, report_path.as_deref())?;
                    }
                    break;
                };
                if !handle_line(&mut session, &line, &mut pending, report_path.as_deref())? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one input line. Returns `false` when the user is done.
fn handle_line(
    session: &mut TerminalSession,
    line: &str,
    pending: &mut Option<(Instant, AdvanceTicket)>,
    report_path: Option<&std::path::Path>,
) -> Result<bool> {
    if session.is_complete() {
        if matches!(line.trim().to_lowercase().as_str(), "y" | "yes" | ":r") {
            *pending = None;
            session.restart();
            prompt(session, report_path)?;
            return Ok(true);
        }
        return Ok(false);
    }

    let choice_count = session.current_choices().map_or(0, <[String]>::len);
    let scheduled = match parse_command(line, choice_count) {
        Command::Quit => return Ok(false),
        Command::Restart => {
            *pending = None;
            session.restart();
            prompt(session, report_path)?;
            return Ok(true);
        }
        Command::Empty => {
            if session.accepting_input() {
                prompt(session, report_path)?;
            }
            return Ok(true);
        }
        Command::Choice(n) => session.select_choice(n),
        Command::Text(text) => {
            let offered = session
                .current_choices()
                .is_some_and(|choices| choices.iter().any(|c| *c == text));
            if session.accepting_input() && !offered {
                session
                    .presenter_mut()
                    .note(&format!("Pick a number from 1 to {choice_count}."));
                prompt(session, report_path)?;
                return Ok(true);
            }
            session.select(&text)
        }
    };

    if let Some(scheduled) = scheduled {
        schedule(session, scheduled, pending, report_path)?;
    }
    Ok(true)
}

fn schedule(
    session: &mut TerminalSession,
    scheduled: ScheduledAdvance,
    pending: &mut Option<(Instant, AdvanceTicket)>,
    report_path: Option<&std::path::Path>,
) -> Result<()> {
    if scheduled.delay.is_zero() {
        session.advance(scheduled.ticket);
        prompt(session, report_path)
    } else {
        *pending = Some((Instant::now() + scheduled.delay, scheduled.ticket));
        Ok(())
    }
}

/// Prompt for whatever the session is waiting on.
fn prompt(session: &mut TerminalSession, report_path: Option<&std::path::Path>) -> Result<()> {
    if session.accepting_input() {
        let n = session.current_choices().map_or(0, <[String]>::len);
        session.presenter_mut().prompt(&format!("Your answer (1-{n}): "));
    } else if let Some(report) = session.report() {
        if report.mistakes().next().is_some() {
            session.presenter_mut().note(&format!("\n{}", report.to_markdown()));
        }
        if let Some(path) = report_path {
            report.save_json(path)?;
            tracing::info!("report saved to {}", path.display());
        }
        session.presenter_mut().prompt("Play again? [y/N]: ");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_in_range_pick_choices() {
        assert_eq!(parse_command("1", 4), Command::Choice(0));
        assert_eq!(parse_command(" 4 ", 4), Command::Choice(3));
    }

    #[test]
    fn out_of_range_numbers_are_text() {
        assert_eq!(parse_command("5", 4), Command::Text("5".into()));
        assert_eq!(parse_command("0", 4), Command::Text("0".into()));
    }

    #[test]
    fn commands_and_text() {
        assert_eq!(parse_command(":q", 4), Command::Quit);
        assert_eq!(parse_command(":restart", 4), Command::Restart);
        assert_eq!(parse_command("   ", 4), Command::Empty);
        assert_eq!(parse_command("cat", 4), Command::Text("cat".into()));
    }
}
