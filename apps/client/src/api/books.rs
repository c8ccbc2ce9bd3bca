//! Books and units.

use langleague_core::{Book, Exercise, Grammar, Unit, Vocabulary};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiClient;
use crate::error::Result;

/// Body of `PUT /api/books/{id}/units/reorder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderUnitsRequest {
    pub unit_ids: Vec<i64>,
}

impl ApiClient {
    /// Books owned by the current user.
    pub async fn my_books(&self) -> Result<Vec<Book>> {
        self.get_json("/api/books/my-books").await
    }

    /// Units of a book in display order.
    pub async fn book_units(&self, book_id: i64) -> Result<Vec<Unit>> {
        let mut units: Vec<Unit> = self.get_json(&format!("/api/books/{}/units", book_id)).await?;
        units.sort_by_key(|u| u.order_index);
        Ok(units)
    }

    /// Persist a new unit order. Ids are given in display order.
    pub async fn reorder_units(&self, book_id: i64, unit_ids: &[i64]) -> Result<()> {
        let body = ReorderUnitsRequest {
            unit_ids: unit_ids.to_vec(),
        };
        self.send_unit(
            Method::PUT,
            &format!("/api/books/{}/units/reorder", book_id),
            &body,
        )
        .await?;
        info!("Reordered {} units of book {}", unit_ids.len(), book_id);
        Ok(())
    }

    /// A single unit, used for its title.
    pub async fn get_unit(&self, unit_id: i64) -> Result<Unit> {
        self.get_json(&format!("/api/units/{}", unit_id)).await
    }

    pub async fn unit_vocabularies(&self, unit_id: i64) -> Result<Vec<Vocabulary>> {
        self.get_json(&format!("/api/units/{}/vocabularies", unit_id))
            .await
    }

    pub async fn unit_grammars(&self, unit_id: i64) -> Result<Vec<Grammar>> {
        self.get_json(&format!("/api/units/{}/grammars", unit_id))
            .await
    }

    /// Exercises of a unit, options included.
    pub async fn unit_exercises(&self, unit_id: i64) -> Result<Vec<Exercise>> {
        self.get_json(&format!("/api/units/{}/exercises", unit_id))
            .await
    }
}
