//! Per-unit content cache over the API client.

use langleague_core::{Exercise, ExerciseOption, Grammar, ImportedDrafts, OrderedItem, Vocabulary};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::{require_id, ApiClient};
use crate::error::{ClientError, Result};

/// Everything shown on a unit's content page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitContent {
    pub vocabularies: Vec<Vocabulary>,
    pub grammars: Vec<Grammar>,
    /// Exercises with their options attached.
    pub exercises: Vec<Exercise>,
}

/// Counts from saving imported drafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSummary {
    pub created: usize,
    pub options_created: usize,
}

/// Order index that places a new item after every existing one.
fn next_order_index<T: OrderedItem>(items: &[T]) -> i32 {
    items.iter().map(OrderedItem::order_index).max().unwrap_or(0) + 1
}

/// Owns the cached content of each unit.
///
/// Reads are served from the cache; every write through the repository drops
/// the affected unit so the next read refetches it.
pub struct ContentRepository {
    api: ApiClient,
    cache: Mutex<HashMap<i64, Arc<UnitContent>>>,
}

impl ContentRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Content of a unit, fetched on first use.
    pub async fn unit_content(&self, unit_id: i64) -> Result<Arc<UnitContent>> {
        if let Some(content) = self.cache.lock().await.get(&unit_id) {
            debug!("Unit {} served from cache", unit_id);
            return Ok(Arc::clone(content));
        }

        let content = Arc::new(self.fetch_unit_content(unit_id).await?);
        self.cache
            .lock()
            .await
            .insert(unit_id, Arc::clone(&content));
        Ok(content)
    }

    /// Fetch a unit's content. Fails as a whole when any part, including
    /// the options of a choice exercise, cannot be loaded.
    async fn fetch_unit_content(&self, unit_id: i64) -> Result<UnitContent> {
        let (mut vocabularies, mut grammars, mut exercises) = tokio::try_join!(
            self.api.unit_vocabularies(unit_id),
            self.api.unit_grammars(unit_id),
            self.api.unit_exercises(unit_id),
        )?;

        for exercise in exercises.iter_mut() {
            if !exercise.options.is_empty() || !exercise.exercise_type.is_choice() {
                continue;
            }
            let Some(id) = exercise.id else { continue };
            exercise.options = self.api.exercise_options(id).await.map_err(|e| {
                warn!("Failed to fetch options for exercise {} of unit {}: {}", id, unit_id, e);
                e
            })?;
        }

        vocabularies.sort_by_key(|v| v.order_index);
        grammars.sort_by_key(|g| g.order_index);
        exercises.sort_by_key(|e| e.order_index);
        for exercise in exercises.iter_mut() {
            exercise.options.sort_by_key(|o| o.order_index);
        }

        info!(
            "Loaded unit {}: {} vocabularies, {} grammars, {} exercises",
            unit_id,
            vocabularies.len(),
            grammars.len(),
            exercises.len()
        );
        Ok(UnitContent {
            vocabularies,
            grammars,
            exercises,
        })
    }

    /// Drop the cached content of a unit.
    pub async fn invalidate(&self, unit_id: i64) {
        if self.cache.lock().await.remove(&unit_id).is_some() {
            debug!("Invalidated unit {}", unit_id);
        }
    }

    pub async fn is_cached(&self, unit_id: i64) -> bool {
        self.cache.lock().await.contains_key(&unit_id)
    }

    pub async fn create_vocabulary(&self, vocabulary: &Vocabulary) -> Result<Vocabulary> {
        let unit_id = require_id(vocabulary.unit_id, "vocabulary unit")?;
        let created = self.api.create_vocabulary(vocabulary).await?;
        self.invalidate(unit_id).await;
        Ok(created)
    }

    pub async fn update_vocabulary(&self, vocabulary: &Vocabulary) -> Result<Vocabulary> {
        let unit_id = require_id(vocabulary.unit_id, "vocabulary unit")?;
        let updated = self.api.update_vocabulary(vocabulary).await?;
        self.invalidate(unit_id).await;
        Ok(updated)
    }

    pub async fn delete_vocabulary(&self, unit_id: i64, id: i64) -> Result<()> {
        self.api.delete_vocabulary(id).await?;
        self.invalidate(unit_id).await;
        Ok(())
    }

    pub async fn create_grammar(&self, grammar: &Grammar) -> Result<Grammar> {
        let unit_id = require_id(grammar.unit_id, "grammar unit")?;
        let created = self.api.create_grammar(grammar).await?;
        self.invalidate(unit_id).await;
        Ok(created)
    }

    pub async fn update_grammar(&self, grammar: &Grammar) -> Result<Grammar> {
        let unit_id = require_id(grammar.unit_id, "grammar unit")?;
        let updated = self.api.update_grammar(grammar).await?;
        self.invalidate(unit_id).await;
        Ok(updated)
    }

    pub async fn delete_grammar(&self, unit_id: i64, id: i64) -> Result<()> {
        self.api.delete_grammar(id).await?;
        self.invalidate(unit_id).await;
        Ok(())
    }

    /// Create an exercise and then each of its options.
    pub async fn create_exercise(&self, exercise: &Exercise) -> Result<Exercise> {
        let unit_id = require_id(exercise.unit_id, "exercise unit")?;
        let mut created = self.api.create_exercise(exercise).await?;
        if created.options.is_empty() && !exercise.options.is_empty() {
            let options = async {
                let exercise_id = require_id(created.id, "exercise")?;
                self.create_options(exercise_id, &exercise.options).await
            }
            .await;
            // The exercise exists from here on, whatever happens to its options.
            self.invalidate(unit_id).await;
            created.options = options?;
        } else {
            self.invalidate(unit_id).await;
        }
        Ok(created)
    }

    pub async fn update_exercise(&self, exercise: &Exercise) -> Result<Exercise> {
        let unit_id = require_id(exercise.unit_id, "exercise unit")?;
        let updated = self.api.update_exercise(exercise).await?;
        self.invalidate(unit_id).await;
        Ok(updated)
    }

    pub async fn delete_exercise(&self, unit_id: i64, id: i64) -> Result<()> {
        self.api.delete_exercise(id).await?;
        self.invalidate(unit_id).await;
        Ok(())
    }

    /// Save reviewed import drafts at the end of a unit.
    ///
    /// Items are appended after the highest existing order index and created
    /// with one bulk request. Exercise options follow, one request each.
    pub async fn save_drafts(&self, unit_id: i64, drafts: ImportedDrafts) -> Result<SaveSummary> {
        let content = self.unit_content(unit_id).await?;
        let mut summary = SaveSummary::default();

        match drafts {
            ImportedDrafts::Vocabulary(items) => {
                let start = next_order_index(&content.vocabularies);
                let payload: Vec<Vocabulary> = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, draft)| draft.into_vocabulary(unit_id, start + i as i32))
                    .collect();
                summary.created = self.api.bulk_create_vocabularies(&payload).await?.len();
            }
            ImportedDrafts::Grammar(items) => {
                let start = next_order_index(&content.grammars);
                let payload: Vec<Grammar> = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, draft)| draft.into_grammar(unit_id, start + i as i32))
                    .collect();
                summary.created = self.api.bulk_create_grammars(&payload).await?.len();
            }
            ImportedDrafts::Exercise(items) => {
                let start = next_order_index(&content.exercises);
                let mut options = Vec::with_capacity(items.len());
                let payload: Vec<Exercise> = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, draft)| {
                        let mut exercise = draft.into_exercise(unit_id, start + i as i32);
                        options.push(std::mem::take(&mut exercise.options));
                        exercise
                    })
                    .collect();

                let created = self.api.bulk_create_exercises(&payload).await?;
                summary.created = created.len();
                let options_created = async {
                    let mut count = 0;
                    for (exercise, exercise_options) in created.iter().zip(options) {
                        let exercise_id = require_id(exercise.id, "exercise")?;
                        count += self.create_options(exercise_id, &exercise_options).await?.len();
                    }
                    Ok::<_, ClientError>(count)
                }
                .await;
                if let Err(e) = &options_created {
                    warn!(
                        "Created {} exercises in unit {} but their options failed: {}",
                        summary.created, unit_id, e
                    );
                    self.invalidate(unit_id).await;
                }
                summary.options_created = options_created?;
            }
        }

        self.invalidate(unit_id).await;
        info!("Saved {} imported items into unit {}", summary.created, unit_id);
        Ok(summary)
    }

    async fn create_options(
        &self,
        exercise_id: i64,
        options: &[ExerciseOption],
    ) -> Result<Vec<ExerciseOption>> {
        let mut created = Vec::with_capacity(options.len());
        for option in options {
            let option = ExerciseOption {
                id: None,
                exercise_id: Some(exercise_id),
                ..option.clone()
            };
            created.push(self.api.create_exercise_option(&option).await?);
        }
        Ok(created)
    }
}
