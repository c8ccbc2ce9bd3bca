//! Vocabulary and grammar endpoints.

use langleague_core::{Grammar, Vocabulary};
use reqwest::Method;
use tracing::info;

use super::{require_id, ApiClient};
use crate::error::Result;

impl ApiClient {
    pub async fn create_vocabulary(&self, vocabulary: &Vocabulary) -> Result<Vocabulary> {
        self.send_json(Method::POST, "/api/vocabularies", vocabulary)
            .await
    }

    pub async fn update_vocabulary(&self, vocabulary: &Vocabulary) -> Result<Vocabulary> {
        let id = require_id(vocabulary.id, "vocabulary")?;
        self.send_json(Method::PUT, &format!("/api/vocabularies/{}", id), vocabulary)
            .await
    }

    pub async fn delete_vocabulary(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/vocabularies/{}", id)).await
    }

    /// Create many vocabulary entries in one request.
    pub async fn bulk_create_vocabularies(&self, items: &[Vocabulary]) -> Result<Vec<Vocabulary>> {
        let created: Vec<Vocabulary> = self
            .send_json(Method::POST, "/api/vocabularies/bulk", items)
            .await?;
        info!("Bulk created {} vocabularies", created.len());
        Ok(created)
    }

    /// Update many vocabulary entries in one request.
    pub async fn bulk_update_vocabularies(&self, items: &[Vocabulary]) -> Result<Vec<Vocabulary>> {
        self.send_json(Method::PUT, "/api/vocabularies/bulk", items)
            .await
    }

    pub async fn create_grammar(&self, grammar: &Grammar) -> Result<Grammar> {
        self.send_json(Method::POST, "/api/grammars", grammar).await
    }

    pub async fn update_grammar(&self, grammar: &Grammar) -> Result<Grammar> {
        let id = require_id(grammar.id, "grammar")?;
        self.send_json(Method::PUT, &format!("/api/grammars/{}", id), grammar)
            .await
    }

    pub async fn delete_grammar(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/grammars/{}", id)).await
    }

    pub async fn bulk_create_grammars(&self, items: &[Grammar]) -> Result<Vec<Grammar>> {
        let created: Vec<Grammar> = self
            .send_json(Method::POST, "/api/grammars/bulk", items)
            .await?;
        info!("Bulk created {} grammars", created.len());
        Ok(created)
    }

    pub async fn bulk_update_grammars(&self, items: &[Grammar]) -> Result<Vec<Grammar>> {
        self.send_json(Method::PUT, "/api/grammars/bulk", items)
            .await
    }
}
