//! Text-mode practice of a unit's exercises.

use langleague_core::{Exercise, ExerciseType, GradeResult, Progress, QuizSession, QuizSummary, UserAnswer};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::repository::ContentRepository;

/// How a practice run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeOutcome {
    pub summary: QuizSummary,
    /// Set when every exercise was answered and the unit was marked complete.
    pub progress: Option<Progress>,
}

/// Parse one typed answer for an exercise.
///
/// Choice exercises take 1-based option numbers, comma or space separated
/// for multi choice. Anything else is taken as text.
pub fn parse_answer(exercise: &Exercise, line: &str) -> Option<UserAnswer> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let option_id = |token: &str| -> Option<i64> {
        let position: usize = token.parse().ok()?;
        exercise.options.get(position.checked_sub(1)?)?.id
    };

    match exercise.exercise_type {
        ExerciseType::SingleChoice => option_id(line).map(UserAnswer::Single),
        ExerciseType::MultiChoice => {
            let ids = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(option_id)
                .collect::<Option<BTreeSet<i64>>>()?;
            Some(UserAnswer::Multi(ids))
        }
        ExerciseType::FillInBlank => Some(UserAnswer::Text(line.to_string())),
    }
}

fn write_exercise<W: Write>(out: &mut W, number: usize, total: usize, exercise: &Exercise) -> Result<()> {
    writeln!(out, "\n[{}/{}] {}", number, total, exercise.exercise_text)?;
    for (i, option) in exercise.options.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, option.option_text)?;
    }
    let hint = match exercise.exercise_type {
        ExerciseType::SingleChoice => "option number",
        ExerciseType::MultiChoice => "option numbers, e.g. 1,3",
        ExerciseType::FillInBlank => "your answer",
    };
    write!(out, "({})> ", hint)?;
    out.flush()?;
    Ok(())
}

fn write_result<W: Write>(out: &mut W, exercise: &Exercise, result: &GradeResult) -> Result<()> {
    if result.is_correct {
        writeln!(out, "Correct!")?;
        return Ok(());
    }
    match &result.expected_text {
        Some(expected) => writeln!(out, "Incorrect. Expected: {}", expected)?,
        None => {
            let correct: Vec<&str> = result
                .correct_option_ids
                .iter()
                .filter_map(|id| exercise.option(*id))
                .map(|o| o.option_text.as_str())
                .collect();
            writeln!(out, "Incorrect. Correct: {}", correct.join(", "))?;
        }
    }
    Ok(())
}

/// Runs a unit's exercises over line-based input.
pub struct PracticeRunner {
    repository: Arc<ContentRepository>,
}

impl PracticeRunner {
    pub fn new(repository: Arc<ContentRepository>) -> Self {
        Self { repository }
    }

    /// Session over the unit's exercises in display order.
    pub async fn session(&self, unit_id: i64) -> Result<QuizSession> {
        let content = self.repository.unit_content(unit_id).await?;
        Ok(QuizSession::new(content.exercises.clone()))
    }

    /// Ask every exercise once, then mark the unit complete if all were
    /// answered. Stops early at end of input.
    pub async fn run<R, W>(&self, unit_id: i64, mut input: R, mut out: W) -> Result<PracticeOutcome>
    where
        R: BufRead,
        W: Write,
    {
        let mut session = self.session(unit_id).await?;
        if session.is_empty() {
            writeln!(out, "Unit {} has no exercises.", unit_id)?;
            return Ok(PracticeOutcome {
                summary: session.summary(),
                progress: None,
            });
        }

        let total = session.len();
        'exercises: loop {
            let Some(exercise) = session.current().cloned() else {
                break;
            };
            write_exercise(&mut out, session.current_index() + 1, total, &exercise)?;

            loop {
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    writeln!(out)?;
                    break 'exercises;
                }
                let Some(answer) = parse_answer(&exercise, &line) else {
                    write!(out, "Please enter a valid answer> ")?;
                    out.flush()?;
                    continue;
                };
                session.select(answer);
                match session.check() {
                    Ok(result) => write_result(&mut out, &exercise, result)?,
                    Err(e) => {
                        warn!("Skipping exercise {:?}: {}", exercise.id, e);
                        writeln!(out, "Skipped: {}", e)?;
                    }
                }
                break;
            }

            if !session.next() {
                break;
            }
        }

        let summary = session.summary();
        writeln!(
            out,
            "\nScore: {}/{} ({}%)",
            summary.correct,
            summary.total,
            summary.score_percent()
        )?;

        let progress = if session.is_finished() {
            let progress = self.repository.api().complete_unit(unit_id).await?;
            writeln!(out, "Unit {} marked complete.", unit_id)?;
            Some(progress)
        } else {
            info!(
                "Unit {} not completed: {}/{} answered",
                unit_id, summary.answered, summary.total
            );
            None
        };

        Ok(PracticeOutcome { summary, progress })
    }
}
