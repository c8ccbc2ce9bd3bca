//! Exercise and exercise option endpoints.

use langleague_core::{Exercise, ExerciseOption};
use reqwest::Method;
use tracing::info;

use super::{require_id, ApiClient};
use crate::error::Result;

impl ApiClient {
    pub async fn create_exercise(&self, exercise: &Exercise) -> Result<Exercise> {
        self.send_json(Method::POST, "/api/exercises", exercise).await
    }

    pub async fn update_exercise(&self, exercise: &Exercise) -> Result<Exercise> {
        let id = require_id(exercise.id, "exercise")?;
        self.send_json(Method::PUT, &format!("/api/exercises/{}", id), exercise)
            .await
    }

    pub async fn delete_exercise(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/exercises/{}", id)).await
    }

    /// Create many exercises in one request. Options are not part of the
    /// bulk payload and must be created afterwards.
    pub async fn bulk_create_exercises(&self, items: &[Exercise]) -> Result<Vec<Exercise>> {
        let created: Vec<Exercise> = self
            .send_json(Method::POST, "/api/exercises/bulk", items)
            .await?;
        info!("Bulk created {} exercises", created.len());
        Ok(created)
    }

    pub async fn bulk_update_exercises(&self, items: &[Exercise]) -> Result<Vec<Exercise>> {
        self.send_json(Method::PUT, "/api/exercises/bulk", items)
            .await
    }

    pub async fn exercise_options(&self, exercise_id: i64) -> Result<Vec<ExerciseOption>> {
        let mut options: Vec<ExerciseOption> = self
            .get_json(&format!("/api/exercises/{}/options", exercise_id))
            .await?;
        options.sort_by_key(|o| o.order_index);
        Ok(options)
    }

    pub async fn create_exercise_option(&self, option: &ExerciseOption) -> Result<ExerciseOption> {
        self.send_json(Method::POST, "/api/exercise-options", option)
            .await
    }
}
