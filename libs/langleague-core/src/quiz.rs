//! Quiz session over the exercises of one unit.

use crate::error::EvaluationError;
use crate::grading::{ExerciseAttempt, GradeResult};
use crate::types::{Exercise, UserAnswer};
use serde::{Deserialize, Serialize};

/// Score of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
}

impl QuizSummary {
    /// Percentage of all exercises answered correctly, rounded down.
    pub fn score_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 100 / self.total) as u32
    }
}

/// Walks a unit's exercises in order and keeps one attempt per exercise.
#[derive(Debug, Clone)]
pub struct QuizSession {
    exercises: Vec<Exercise>,
    attempts: Vec<ExerciseAttempt>,
    current: usize,
}

impl QuizSession {
    pub fn new(mut exercises: Vec<Exercise>) -> Self {
        exercises.sort_by_key(|e| e.order_index);
        let attempts = vec![ExerciseAttempt::new(); exercises.len()];
        Self {
            exercises,
            attempts,
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Exercise> {
        self.exercises.get(self.current)
    }

    pub fn current_attempt(&self) -> Option<&ExerciseAttempt> {
        self.attempts.get(self.current)
    }

    /// Replace the answer to the current exercise.
    pub fn select(&mut self, answer: UserAnswer) {
        if let Some(attempt) = self.attempts.get_mut(self.current) {
            attempt.select(answer);
        }
    }

    /// Toggle an option of the current multi choice exercise.
    pub fn toggle_option(&mut self, option_id: i64) {
        if let Some(attempt) = self.attempts.get_mut(self.current) {
            attempt.toggle_option(option_id);
        }
    }

    /// Grade the current exercise.
    pub fn check(&mut self) -> Result<&GradeResult, EvaluationError> {
        let exercise = self
            .exercises
            .get(self.current)
            .ok_or(EvaluationError::NotAnswered)?;
        self.attempts[self.current].check(exercise)
    }

    /// Move to the next exercise. Returns false at the end.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.exercises.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous exercise. Returns false at the start.
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.exercises.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Every exercise has been checked.
    pub fn is_finished(&self) -> bool {
        !self.attempts.is_empty() && self.attempts.iter().all(ExerciseAttempt::is_locked)
    }

    pub fn summary(&self) -> QuizSummary {
        let answered = self.attempts.iter().filter(|a| a.is_locked()).count();
        let correct = self
            .attempts
            .iter()
            .filter_map(ExerciseAttempt::result)
            .filter(|r| r.is_correct)
            .count();
        QuizSummary {
            total: self.exercises.len(),
            answered,
            correct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExerciseOption, ExerciseType};
    use pretty_assertions::assert_eq;

    fn exercises() -> Vec<Exercise> {
        vec![
            Exercise {
                id: Some(2),
                exercise_text: "Type 'cat'".to_string(),
                exercise_type: ExerciseType::FillInBlank,
                correct_answer_raw: Some("cat".to_string()),
                order_index: 2,
                ..Default::default()
            },
            Exercise {
                id: Some(1),
                exercise_text: "Pick yes".to_string(),
                exercise_type: ExerciseType::SingleChoice,
                order_index: 1,
                options: vec![
                    ExerciseOption {
                        id: Some(11),
                        option_text: "yes".to_string(),
                        is_correct: true,
                        ..Default::default()
                    },
                    ExerciseOption {
                        id: Some(12),
                        option_text: "no".to_string(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_session_orders_by_order_index() {
        let session = QuizSession::new(exercises());
        assert_eq!(session.current().and_then(|e| e.id), Some(1));
    }

    #[test]
    fn test_walk_and_score() {
        let mut session = QuizSession::new(exercises());
        assert!(!session.previous());

        session.select(UserAnswer::Single(12));
        assert!(!session.check().unwrap().is_correct);
        assert!(!session.is_finished());

        assert!(session.next());
        session.select(UserAnswer::Text(" Cat ".to_string()));
        assert!(session.check().unwrap().is_correct);
        assert!(!session.next());

        assert!(session.is_finished());
        let summary = session.summary();
        assert_eq!(
            summary,
            QuizSummary {
                total: 2,
                answered: 2,
                correct: 1
            }
        );
        assert_eq!(summary.score_percent(), 50);
    }

    #[test]
    fn test_changing_answer_unfinishes() {
        let mut session = QuizSession::new(exercises());
        session.select(UserAnswer::Single(11));
        session.check().unwrap();
        session.go_to(1);
        session.select(UserAnswer::Text("cat".to_string()));
        session.check().unwrap();
        assert!(session.is_finished());

        session.go_to(0);
        session.select(UserAnswer::Single(12));
        assert!(!session.is_finished());
        assert_eq!(session.summary().answered, 1);
    }

    #[test]
    fn test_empty_session() {
        let mut session = QuizSession::new(vec![]);
        assert!(session.is_empty());
        assert!(!session.is_finished());
        assert_eq!(session.check().unwrap_err(), EvaluationError::NotAnswered);
        assert_eq!(session.summary().score_percent(), 0);
    }
}
