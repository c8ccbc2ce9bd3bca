//! Error types for langleague-core.

use crate::types::ExerciseType;
use thiserror::Error;

/// Result type alias using ImportError.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors raised while grading an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("exercise has not been answered yet")]
    NotAnswered,

    #[error("answer does not fit a {expected:?} exercise")]
    ShapeMismatch { expected: ExerciseType },

    #[error("option {0} does not belong to this exercise")]
    UnknownOption(i64),

    #[error("answer already checked; change the selection to check again")]
    AlreadyChecked,

    #[error("invalid exercise: {0}")]
    InvalidExercise(#[from] ValidationError),
}

/// Structural problems with an exercise definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("choice exercise has no options")]
    NoOptions,

    #[error("choice exercise has no correct option")]
    NoCorrectOption,

    #[error("single choice exercise has {0} correct options")]
    MultipleCorrectOptions(usize),

    #[error("fill in the blank exercise has no correct answer")]
    MissingCorrectAnswer,
}

/// Errors raised by list reordering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("index {index} out of bounds for list of {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("no drag in progress")]
    NoDragInProgress,
}

/// Errors raised while turning AI output into drafts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("no content generated from AI")]
    EmptyResponse,

    #[error("AI response is not a JSON array")]
    NoArray,

    #[error("AI response is an empty array")]
    EmptyArray,

    #[error("failed to parse AI response as JSON: {0}")]
    Parse(String),

    #[error("source text is empty")]
    EmptyInput,

    #[error("nothing to import")]
    NothingToImport,

    #[error("import wizard is not in the {0} step")]
    WrongStep(&'static str),

    #[error("no {kind} at index {index}")]
    NoSuchItem { kind: &'static str, index: usize },
}
