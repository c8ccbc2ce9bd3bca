//! LangLeague client.
//!
//! Talks to the LangLeague backend and drives the content workflows on top of
//! `langleague-core`: AI import, drag-and-drop reordering, unit practice,
//! flashcards and unit notes.

pub mod api;
pub mod config;
pub mod error;
pub mod flashcards;
pub mod import;
pub mod logging;
pub mod practice;
pub mod reorder;
pub mod repository;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use flashcards::{FlashcardOutcome, FlashcardRunner};
pub use import::ImportAssistant;
pub use practice::{PracticeOutcome, PracticeRunner};
pub use reorder::{ReorderController, ReorderOutcome, ReorderScope, ScopedItem};
pub use repository::{ContentRepository, SaveSummary, UnitContent};
