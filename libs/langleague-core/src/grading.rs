//! Answer grading for exercise sessions.

use crate::error::{EvaluationError, ValidationError};
use crate::types::{Exercise, ExerciseType, UserAnswer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of grading one answer against its exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// The exercise type that decided the rule.
    pub exercise_type: ExerciseType,
    /// Options flagged correct (empty for fill in the blank), for highlighting.
    pub correct_option_ids: Vec<i64>,
    /// Expected text for fill in the blank, for feedback display.
    pub expected_text: Option<String>,
}

/// Check that an exercise can be graded at all.
pub fn validate_exercise(exercise: &Exercise) -> Result<(), ValidationError> {
    match exercise.exercise_type {
        ExerciseType::SingleChoice | ExerciseType::MultiChoice => {
            if exercise.options.is_empty() {
                return Err(ValidationError::NoOptions);
            }
            let correct = exercise.options.iter().filter(|o| o.is_correct).count();
            if correct == 0 {
                return Err(ValidationError::NoCorrectOption);
            }
            if exercise.exercise_type == ExerciseType::SingleChoice && correct > 1 {
                return Err(ValidationError::MultipleCorrectOptions(correct));
            }
            Ok(())
        }
        ExerciseType::FillInBlank => match exercise.correct_answer_raw.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::MissingCorrectAnswer),
        },
    }
}

/// Trim and case-fold a typed answer.
pub fn normalize_text_answer(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Decide whether an answer is correct.
pub fn evaluate(exercise: &Exercise, answer: &UserAnswer) -> Result<bool, EvaluationError> {
    grade(exercise, answer).map(|r| r.is_correct)
}

/// Grade an answer, returning the details needed for feedback.
///
/// An empty answer is `NotAnswered`, never an incorrect grade.
pub fn grade(exercise: &Exercise, answer: &UserAnswer) -> Result<GradeResult, EvaluationError> {
    if answer.is_empty() {
        return Err(EvaluationError::NotAnswered);
    }
    validate_exercise(exercise)?;

    let exercise_type = exercise.exercise_type;
    let correct_ids = exercise.correct_option_ids();

    let is_correct = match (exercise_type, answer) {
        (ExerciseType::SingleChoice, UserAnswer::Single(id)) => {
            let option = exercise
                .option(*id)
                .ok_or(EvaluationError::UnknownOption(*id))?;
            option.is_correct
        }
        (ExerciseType::MultiChoice, UserAnswer::Multi(selected)) => {
            if let Some(unknown) = selected.iter().find(|id| exercise.option(**id).is_none()) {
                return Err(EvaluationError::UnknownOption(*unknown));
            }
            *selected == correct_ids
        }
        (ExerciseType::FillInBlank, UserAnswer::Text(typed)) => {
            let expected = exercise.correct_answer_raw.as_deref().unwrap_or_default();
            normalize_text_answer(typed) == normalize_text_answer(expected)
        }
        _ => {
            return Err(EvaluationError::ShapeMismatch {
                expected: exercise_type,
            })
        }
    };

    Ok(GradeResult {
        is_correct,
        exercise_type,
        correct_option_ids: correct_ids.into_iter().collect(),
        expected_text: match exercise_type {
            ExerciseType::FillInBlank => exercise.correct_answer_raw.clone(),
            _ => None,
        },
    })
}

/// Answer state of one exercise on screen.
///
/// Checking locks the answer. Any new selection unlocks it and drops the
/// previous result, so the next check grades the new answer.
#[derive(Debug, Clone, Default)]
pub struct ExerciseAttempt {
    answer: Option<UserAnswer>,
    result: Option<GradeResult>,
}

impl ExerciseAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current answer.
    pub fn select(&mut self, answer: UserAnswer) {
        self.answer = Some(answer);
        self.result = None;
    }

    /// Toggle one option of a multi choice selection.
    pub fn toggle_option(&mut self, option_id: i64) {
        let mut selected = match self.answer.take() {
            Some(UserAnswer::Multi(ids)) => ids,
            _ => BTreeSet::new(),
        };
        if !selected.remove(&option_id) {
            selected.insert(option_id);
        }
        self.select(UserAnswer::Multi(selected));
    }

    /// Forget the answer and any result.
    pub fn clear(&mut self) {
        self.answer = None;
        self.result = None;
    }

    /// Grade the current answer and lock it.
    pub fn check(&mut self, exercise: &Exercise) -> Result<&GradeResult, EvaluationError> {
        if self.result.is_some() {
            return Err(EvaluationError::AlreadyChecked);
        }
        let answer = self.answer.as_ref().ok_or(EvaluationError::NotAnswered)?;
        let result = grade(exercise, answer)?;
        Ok(self.result.insert(result))
    }

    pub fn answer(&self) -> Option<&UserAnswer> {
        self.answer.as_ref()
    }

    pub fn result(&self) -> Option<&GradeResult> {
        self.result.as_ref()
    }

    /// Whether the answer has been checked and not changed since.
    pub fn is_locked(&self) -> bool {
        self.result.is_some()
    }
}
