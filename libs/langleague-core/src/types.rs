//! Core types shared by the client and the domain logic.
//!
//! Field names follow the backend's JSON (camelCase). Identity and timestamps
//! are assigned by the server, so they are optional until an entity is saved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of exercise and therefore the shape of its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseType {
    SingleChoice,
    MultiChoice,
    FillInBlank,
}

impl Default for ExerciseType {
    fn default() -> Self {
        Self::SingleChoice
    }
}

impl ExerciseType {
    /// Get the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleChoice => "SINGLE_CHOICE",
            Self::MultiChoice => "MULTI_CHOICE",
            Self::FillInBlank => "FILL_IN_BLANK",
        }
    }

    /// Whether answers are picked from options.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice)
    }
}

/// Course book owned by a teacher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Unit (chapter) within a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Vocabulary entry of a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Grammar point of a unit. The explanation is Markdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_usage: Option<String>,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Answer option of a choice exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub option_text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<i64>,
}

/// Exercise of a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub exercise_text: String,
    pub exercise_type: ExerciseType,
    /// Expected text for fill-in-the-blank exercises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer_raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
    #[serde(default)]
    pub options: Vec<ExerciseOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl Exercise {
    /// Ids of the options flagged correct.
    pub fn correct_option_ids(&self) -> BTreeSet<i64> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .filter_map(|o| o.id)
            .collect()
    }

    /// Look up an option by id.
    pub fn option(&self, id: i64) -> Option<&ExerciseOption> {
        self.options.iter().find(|o| o.id == Some(id))
    }
}

/// Completion record of a unit for the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bookmarked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
}

/// Enrollment of the current user in a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
}

/// Personal note of the current user on a unit. The content is Markdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile_id: Option<i64>,
}

/// Answer given by the user to one exercise. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAnswer {
    /// Selected option of a single choice exercise.
    Single(i64),
    /// Selected options of a multi choice exercise.
    Multi(BTreeSet<i64>),
    /// Typed answer of a fill in the blank exercise.
    Text(String),
}

impl UserAnswer {
    /// True when nothing has actually been answered.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::Multi(ids) => ids.is_empty(),
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

/// Item with a display position inside its parent.
pub trait OrderedItem {
    /// Server identity, absent for unsaved items.
    fn id(&self) -> Option<i64>;

    fn order_index(&self) -> i32;

    fn set_order_index(&mut self, index: i32);
}

macro_rules! impl_ordered_item {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OrderedItem for $ty {
                fn id(&self) -> Option<i64> {
                    self.id
                }

                fn order_index(&self) -> i32 {
                    self.order_index
                }

                fn set_order_index(&mut self, index: i32) {
                    self.order_index = index;
                }
            }
        )*
    };
}

impl_ordered_item!(Unit, Vocabulary, Grammar, Exercise, ExerciseOption);
