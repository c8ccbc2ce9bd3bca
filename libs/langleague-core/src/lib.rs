//! Core library for the LangLeague language-learning client.
//!
//! Provides:
//! - Entity types mirroring the backend DTOs (books, units, vocabulary, grammar, exercises)
//! - Exercise answer grading (single choice, multi choice, fill in the blank)
//! - Ordered list reordering with order index assignment and revert
//! - AI content import: prompt construction, response parsing, review wizard
//! - Quiz sessions over a unit's exercises
//! - Flashcard decks over a unit's vocabulary and personal unit notes

pub mod error;
pub mod flashcards;
pub mod grading;
pub mod import;
pub mod notes;
pub mod ordering;
pub mod quiz;
pub mod types;

pub use error::{EvaluationError, ImportError, ReorderError, Result, ValidationError};
pub use flashcards::{CardSide, FlashcardDeck};
pub use grading::{evaluate, grade, normalize_text_answer, validate_exercise, ExerciseAttempt, GradeResult};
pub use import::{
    build_prompt, build_single_prompt, friendly_failure_message, parse_drafts,
    parse_single_draft, strip_code_fences, ContentType, ExerciseDraft, GrammarDraft, ImportStep, ImportWizard, ImportedDrafts,
    LanguagePair, OptionDraft, VocabularyDraft,
};
pub use notes::{plan_note_save, NoteChange};
pub use ordering::{assign_order_indices, reorder, OrderedList, ReorderCommit};
pub use quiz::{QuizSession, QuizSummary};
pub use types::{
    Book, Enrollment, Exercise, ExerciseOption, ExerciseType, Grammar, Note,
    OrderedItem, Progress, Unit, UserAnswer, Vocabulary,
};
