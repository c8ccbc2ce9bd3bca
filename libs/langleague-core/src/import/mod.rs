//! AI-assisted content import.
//!
//! Source text is wrapped in a type-specific prompt, sent to the backend AI
//! proxy by the caller, and the reply is parsed into editable drafts. Drafts
//! only become entities when the user saves the unit they were imported into.

mod prompt;
mod response;
mod wizard;

pub use prompt::{build_prompt, build_single_prompt};
pub use response::{parse_drafts, parse_single_draft, strip_code_fences};
pub use wizard::{ImportStep, ImportWizard};

use crate::error::Result;
use crate::types::{Exercise, ExerciseOption, ExerciseType, Grammar, Vocabulary};
use serde::{Deserialize, Serialize};

/// Kind of content to extract from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Exercise,
    Vocabulary,
    Grammar,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exercise => "EXERCISE",
            Self::Vocabulary => "VOCABULARY",
            Self::Grammar => "GRAMMAR",
        }
    }

    /// Parse from the wire name, case-insensitively.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "EXERCISE" => Some(Self::Exercise),
            "VOCABULARY" => Some(Self::Vocabulary),
            "GRAMMAR" => Some(Self::Grammar),
            _ => None,
        }
    }

    /// Plural noun for messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exercise => "exercises",
            Self::Vocabulary => "vocabulary items",
            Self::Grammar => "grammar topics",
        }
    }
}

/// Language being learned and the learner's own language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub target: String,
    pub native: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            target: "English".to_string(),
            native: "Vietnamese".to_string(),
        }
    }
}

/// Vocabulary entry proposed by the AI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyDraft {
    pub word: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
}

impl VocabularyDraft {
    pub fn into_vocabulary(self, unit_id: i64, order_index: i32) -> Vocabulary {
        Vocabulary {
            word: self.word,
            phonetic: self.phonetic.filter(|p| !p.trim().is_empty()),
            meaning: self.definition,
            example: Some(self.example).filter(|e| !e.trim().is_empty()),
            order_index,
            unit_id: Some(unit_id),
            ..Default::default()
        }
    }
}

/// Grammar point proposed by the AI. `description` is Markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub example: String,
}

impl GrammarDraft {
    pub fn into_grammar(self, unit_id: i64, order_index: i32) -> Grammar {
        Grammar {
            title: self.title,
            content_markdown: Some(self.description),
            example_usage: Some(self.example).filter(|e| !e.trim().is_empty()),
            order_index,
            unit_id: Some(unit_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDraft {
    pub option_text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Multiple choice question proposed by the AI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    pub exercise_text: String,
    #[serde(default)]
    pub options: Vec<OptionDraft>,
}

impl ExerciseDraft {
    /// Build an unsaved exercise; more than one correct option makes it multi choice.
    pub fn into_exercise(self, unit_id: i64, order_index: i32) -> Exercise {
        let correct = self.options.iter().filter(|o| o.is_correct).count();
        let exercise_type = if correct > 1 {
            ExerciseType::MultiChoice
        } else {
            ExerciseType::SingleChoice
        };
        let options = self
            .options
            .into_iter()
            .enumerate()
            .map(|(i, o)| ExerciseOption {
                option_text: o.option_text,
                is_correct: o.is_correct,
                order_index: i as i32 + 1,
                ..Default::default()
            })
            .collect();

        Exercise {
            exercise_text: self.exercise_text,
            exercise_type,
            order_index,
            unit_id: Some(unit_id),
            options,
            ..Default::default()
        }
    }
}

/// Parsed AI output for one content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "items", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportedDrafts {
    Exercise(Vec<ExerciseDraft>),
    Vocabulary(Vec<VocabularyDraft>),
    Grammar(Vec<GrammarDraft>),
}

impl ImportedDrafts {
    /// Parse AI response text for the given content type.
    pub fn parse(content_type: ContentType, text: &str) -> Result<Self> {
        Ok(match content_type {
            ContentType::Exercise => Self::Exercise(parse_drafts(text)?),
            ContentType::Vocabulary => Self::Vocabulary(parse_drafts(text)?),
            ContentType::Grammar => Self::Grammar(parse_drafts(text)?),
        })
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Exercise(_) => ContentType::Exercise,
            Self::Vocabulary(_) => ContentType::Vocabulary,
            Self::Grammar(_) => ContentType::Grammar,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Exercise(items) => items.len(),
            Self::Vocabulary(items) => items.len(),
            Self::Grammar(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turn a raw failure description into text fit for the user.
///
/// This matches on substrings of the underlying message; the backend does
/// not send structured error codes.
pub fn friendly_failure_message(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("json") || lower.contains("parse") {
        "Failed to parse AI response. The AI may have returned invalid data. Please try again."
            .to_string()
    } else if lower.contains("empty array") {
        "No items were generated. Please try again with different text.".to_string()
    } else if lower.contains("rate limit") || lower.contains("429") {
        "Rate limit exceeded. Please wait a moment and try again.".to_string()
    } else if lower.contains("api key") || lower.contains("unauthorized") || lower.contains("authentication") {
        "API authentication failed. Please contact administrator.".to_string()
    } else if lower.contains("network") || lower.contains("connect") {
        "Network error. Please check your connection and try again.".to_string()
    } else {
        raw.to_string()
    }
}
