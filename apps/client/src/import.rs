//! AI import assistant: runs the wizard against the backend's AI proxy.

use langleague_core::{
    build_single_prompt, parse_single_draft, ContentType, ImportStep, ImportWizard,
    ImportedDrafts, LanguagePair,
};
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::error::Result;
use crate::repository::{ContentRepository, SaveSummary};

/// Import wizard wired to the AI generation endpoint.
pub struct ImportAssistant {
    api: ApiClient,
    wizard: ImportWizard,
}

impl ImportAssistant {
    pub fn new(api: ApiClient, content_type: ContentType, languages: LanguagePair) -> Self {
        Self {
            api,
            wizard: ImportWizard::new(content_type, languages),
        }
    }

    pub fn wizard(&self) -> &ImportWizard {
        &self.wizard
    }

    /// Edit drafts during review.
    pub fn wizard_mut(&mut self) -> &mut ImportWizard {
        &mut self.wizard
    }

    pub fn step(&self) -> ImportStep {
        self.wizard.step()
    }

    /// Message of the last failed attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.wizard.last_error()
    }

    /// Send the pasted text to the AI and parse the reply.
    ///
    /// Returns the number of drafts ready for review. On failure the wizard
    /// is back at Input with a message for the user.
    pub async fn generate(&mut self) -> Result<usize> {
        let prompt = self.wizard.start()?;
        let content_type = self.wizard.content_type();
        info!(
            "Generating {} drafts from {} chars of text",
            content_type.label(),
            self.wizard.input_text().len()
        );

        let text = match self.api.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("AI generation failed: {}", e);
                self.wizard.fail(&e.user_message());
                return Err(e);
            }
        };

        match self.wizard.receive(&text) {
            Ok(count) => {
                info!("AI proposed {} {} items", count, content_type.label());
                Ok(count)
            }
            Err(e) => {
                error!("Could not use AI response: {}", e);
                Err(e.into())
            }
        }
    }

    /// Set the input text and generate in one go.
    pub async fn generate_from(&mut self, text: impl Into<String>) -> Result<usize> {
        if self.wizard.step() != ImportStep::Input {
            self.wizard.back_to_input();
        }
        self.wizard.set_input_text(text)?;
        self.generate().await
    }

    /// Generate a single draft for one word or topic, bypassing the wizard.
    ///
    /// `T` is the draft type matching the assistant's content type.
    pub async fn generate_single<T: DeserializeOwned>(&self, subject: &str) -> Result<T> {
        let prompt = build_single_prompt(
            self.wizard.content_type(),
            subject,
            self.wizard.languages(),
        );
        let text = self.api.generate(&prompt).await?;
        Ok(parse_single_draft(&text)?)
    }

    /// Take the reviewed drafts, resetting the wizard.
    pub fn finish(&mut self) -> Result<ImportedDrafts> {
        Ok(self.wizard.finish()?)
    }

    /// Take the reviewed drafts and create them at the end of a unit.
    pub async fn save_into(
        &mut self,
        repository: &ContentRepository,
        unit_id: i64,
    ) -> Result<SaveSummary> {
        let drafts = self.finish()?;
        repository.save_drafts(unit_id, drafts).await
    }
}
