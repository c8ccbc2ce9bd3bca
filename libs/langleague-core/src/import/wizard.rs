//! Three-step import wizard: Input, Processing, Review.

use super::{
    build_prompt, friendly_failure_message, ContentType, ExerciseDraft, GrammarDraft,
    ImportedDrafts, LanguagePair, OptionDraft, VocabularyDraft,
};
use crate::error::{ImportError, Result};

/// Current wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStep {
    Input,
    Processing,
    Review,
}

impl ImportStep {
    fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Processing => "processing",
            Self::Review => "review",
        }
    }
}

/// State of one import dialog.
///
/// Never talks to the backend: the caller sends the prompt from [`start`]
/// and feeds the reply to [`receive`] (or the failure to [`fail`]).
///
/// [`start`]: ImportWizard::start
/// [`receive`]: ImportWizard::receive
/// [`fail`]: ImportWizard::fail
#[derive(Debug, Clone)]
pub struct ImportWizard {
    content_type: ContentType,
    languages: LanguagePair,
    input_text: String,
    step: ImportStep,
    drafts: Option<ImportedDrafts>,
    last_error: Option<String>,
}

impl ImportWizard {
    pub fn new(content_type: ContentType, languages: LanguagePair) -> Self {
        Self {
            content_type,
            languages,
            input_text: String::new(),
            step: ImportStep::Input,
            drafts: None,
            last_error: None,
        }
    }

    pub fn step(&self) -> ImportStep {
        self.step
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// User-readable description of the last failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn drafts(&self) -> Option<&ImportedDrafts> {
        self.drafts.as_ref()
    }

    fn expect_step(&self, step: ImportStep) -> Result<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(ImportError::WrongStep(step.name()))
        }
    }

    pub fn set_content_type(&mut self, content_type: ContentType) -> Result<()> {
        self.expect_step(ImportStep::Input)?;
        self.content_type = content_type;
        Ok(())
    }

    pub fn set_languages(&mut self, languages: LanguagePair) -> Result<()> {
        self.expect_step(ImportStep::Input)?;
        self.languages = languages;
        Ok(())
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.expect_step(ImportStep::Input)?;
        self.input_text = text.into();
        Ok(())
    }

    /// Move to Processing and return the prompt to send.
    pub fn start(&mut self) -> Result<String> {
        self.expect_step(ImportStep::Input)?;
        if self.input_text.trim().is_empty() {
            return Err(ImportError::EmptyInput);
        }
        self.last_error = None;
        self.step = ImportStep::Processing;
        Ok(build_prompt(self.content_type, &self.input_text, &self.languages))
    }

    /// Feed the AI response text. On success the wizard moves to Review and
    /// returns the number of drafts; on failure it goes back to Input.
    pub fn receive(&mut self, response_text: &str) -> Result<usize> {
        self.expect_step(ImportStep::Processing)?;
        match ImportedDrafts::parse(self.content_type, response_text) {
            Ok(drafts) => {
                let count = drafts.len();
                self.drafts = Some(drafts);
                self.step = ImportStep::Review;
                Ok(count)
            }
            Err(e) => {
                self.fail(&e.to_string());
                Err(e)
            }
        }
    }

    /// The request failed before a response arrived; return to Input.
    pub fn fail(&mut self, message: &str) {
        self.last_error = Some(friendly_failure_message(message));
        self.drafts = None;
        self.step = ImportStep::Input;
    }

    /// Leave Processing or Review and keep the input text for editing.
    pub fn back_to_input(&mut self) {
        self.drafts = None;
        self.step = ImportStep::Input;
    }

    fn review_drafts(&mut self) -> Result<&mut ImportedDrafts> {
        self.expect_step(ImportStep::Review)?;
        self.drafts.as_mut().ok_or(ImportError::NothingToImport)
    }

    /// Remove the draft at `index`.
    pub fn remove_item(&mut self, index: usize) -> Result<()> {
        let drafts = self.review_drafts()?;
        let len = drafts.len();
        if index >= len {
            return Err(ImportError::NoSuchItem { kind: "item", index });
        }
        match drafts {
            ImportedDrafts::Exercise(items) => {
                items.remove(index);
            }
            ImportedDrafts::Vocabulary(items) => {
                items.remove(index);
            }
            ImportedDrafts::Grammar(items) => {
                items.remove(index);
            }
        }
        Ok(())
    }

    pub fn vocabulary_mut(&mut self, index: usize) -> Result<&mut VocabularyDraft> {
        match self.review_drafts()? {
            ImportedDrafts::Vocabulary(items) => items
                .get_mut(index)
                .ok_or(ImportError::NoSuchItem { kind: "vocabulary", index }),
            _ => Err(ImportError::NoSuchItem { kind: "vocabulary", index }),
        }
    }

    pub fn grammar_mut(&mut self, index: usize) -> Result<&mut GrammarDraft> {
        match self.review_drafts()? {
            ImportedDrafts::Grammar(items) => items
                .get_mut(index)
                .ok_or(ImportError::NoSuchItem { kind: "grammar", index }),
            _ => Err(ImportError::NoSuchItem { kind: "grammar", index }),
        }
    }

    pub fn exercise_mut(&mut self, index: usize) -> Result<&mut ExerciseDraft> {
        match self.review_drafts()? {
            ImportedDrafts::Exercise(items) => items
                .get_mut(index)
                .ok_or(ImportError::NoSuchItem { kind: "exercise", index }),
            _ => Err(ImportError::NoSuchItem { kind: "exercise", index }),
        }
    }

    /// Append a placeholder option to an exercise draft.
    pub fn add_option(&mut self, exercise_index: usize) -> Result<()> {
        self.exercise_mut(exercise_index)?.options.push(OptionDraft {
            option_text: "New Option".to_string(),
            is_correct: false,
        });
        Ok(())
    }

    pub fn remove_option(&mut self, exercise_index: usize, option_index: usize) -> Result<()> {
        let exercise = self.exercise_mut(exercise_index)?;
        if option_index >= exercise.options.len() {
            return Err(ImportError::NoSuchItem {
                kind: "option",
                index: option_index,
            });
        }
        exercise.options.remove(option_index);
        Ok(())
    }

    /// Mark one option correct and every other option of the exercise incorrect.
    pub fn mark_correct(&mut self, exercise_index: usize, option_index: usize) -> Result<()> {
        let exercise = self.exercise_mut(exercise_index)?;
        if option_index >= exercise.options.len() {
            return Err(ImportError::NoSuchItem {
                kind: "option",
                index: option_index,
            });
        }
        for (i, option) in exercise.options.iter_mut().enumerate() {
            option.is_correct = i == option_index;
        }
        Ok(())
    }

    /// Hand the reviewed drafts over and reset the wizard for the next import.
    pub fn finish(&mut self) -> Result<ImportedDrafts> {
        let drafts = self.review_drafts()?;
        if drafts.is_empty() {
            return Err(ImportError::NothingToImport);
        }
        let drafts = self.drafts.take().ok_or(ImportError::NothingToImport)?;
        self.step = ImportStep::Input;
        self.input_text.clear();
        self.last_error = None;
        Ok(drafts)
    }
}
