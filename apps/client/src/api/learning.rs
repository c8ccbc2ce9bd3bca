//! Student progress and enrollment.

use langleague_core::{Enrollment, Progress};
use tracing::info;

use super::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Mark a unit completed for the current user.
    pub async fn complete_unit(&self, unit_id: i64) -> Result<Progress> {
        let progress: Progress = self
            .post_empty(&format!("/api/progresses/complete-unit/{}", unit_id))
            .await?;
        info!("Completed unit {}", unit_id);
        Ok(progress)
    }

    pub async fn my_progresses(&self) -> Result<Vec<Progress>> {
        self.get_json("/api/progresses/my-progresses").await
    }

    pub async fn enroll(&self, book_id: i64) -> Result<Enrollment> {
        let enrollment: Enrollment = self
            .post_empty(&format!("/api/enrollments/enroll/{}", book_id))
            .await?;
        info!("Enrolled in book {}", book_id);
        Ok(enrollment)
    }
}
