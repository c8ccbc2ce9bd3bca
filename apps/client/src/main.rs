//! LangLeague command line client.
//!
//! - `import`: turn pasted text into vocabulary, grammar or exercises with AI
//! - `move`: reorder units or unit content
//! - `practice`: answer a unit's exercises in the terminal
//! - `flashcards`: flip through a unit's vocabulary
//! - `note`: show or edit your note on a unit

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use langleague_client::reorder::ScopedItem;
use langleague_client::{
    logging, ApiClient, ClientConfig, ContentRepository, FlashcardRunner, ImportAssistant,
    PracticeRunner, ReorderController, ReorderOutcome, ReorderScope,
};
use langleague_core::{ContentType, LanguagePair};

/// Command-line arguments for langleague
#[derive(Parser, Debug)]
#[command(name = "langleague")]
#[command(about = "Command line client for LangLeague")]
#[command(version)]
struct Args {
    /// Backend base URL
    #[arg(long, global = true, env = "LANGLEAGUE_API_URL")]
    api_url: Option<String>,

    /// Bearer token
    #[arg(long, global = true, env = "LANGLEAGUE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// AI model used for imports
    #[arg(long, global = true, env = "LANGLEAGUE_AI_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate content drafts from a text file
    Import {
        /// vocabulary, grammar or exercise
        #[arg(long = "type", value_parser = parse_content_type)]
        content_type: ContentType,

        /// File with the source text
        #[arg(long)]
        input: PathBuf,

        /// Language being learned
        #[arg(long, default_value = "English")]
        target: String,

        /// Learner's language
        #[arg(long, default_value = "Vietnamese")]
        native: String,

        /// Unit to save into
        #[arg(long)]
        unit: Option<i64>,

        /// Create the drafts in the unit
        #[arg(long, requires = "unit")]
        save: bool,
    },

    /// Move one item to a new position
    Move {
        /// units, vocabulary, grammar or exercises
        #[arg(long, value_parser = parse_scope)]
        scope: ReorderScope,

        /// Book id for units, unit id otherwise
        #[arg(long)]
        parent: i64,

        /// Current position, starting at 1
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        from: u32,

        /// New position, starting at 1
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        to: u32,
    },

    /// Practice a unit's exercises
    Practice {
        #[arg(long)]
        unit: i64,
    },

    /// Study a unit's vocabulary as flashcards
    Flashcards {
        #[arg(long)]
        unit: i64,

        /// Start with the deck shuffled
        #[arg(long)]
        shuffle: bool,
    },

    /// Show your note on a unit, or replace it
    Note {
        #[arg(long)]
        unit: i64,

        /// New note text in Markdown; an empty string deletes the note
        #[arg(long)]
        set: Option<String>,
    },
}

fn parse_content_type(s: &str) -> std::result::Result<ContentType, String> {
    ContentType::from_name(s).ok_or_else(|| format!("unknown content type '{}'", s))
}

fn parse_scope(s: &str) -> std::result::Result<ReorderScope, String> {
    ReorderScope::from_name(s).ok_or_else(|| format!("unknown scope '{}'", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init();

    let mut config = ClientConfig::from_env().context("Invalid configuration")?;
    if let Some(url) = args.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(token) = args.token {
        config = config.with_token(token);
    }
    if let Some(model) = args.model {
        config = config.with_ai_model(model);
    }
    info!("Using backend {}", config.api_url);

    let api = ApiClient::new(&config).context("Failed to create HTTP client")?;
    let repository = Arc::new(ContentRepository::new(api.clone()));

    match args.command {
        Command::Import {
            content_type,
            input,
            target,
            native,
            unit,
            save,
        } => run_import(&repository, content_type, input, LanguagePair { target, native }, unit, save).await,
        Command::Move {
            scope,
            parent,
            from,
            to,
        } => run_move(repository, scope, parent, from as usize - 1, to as usize - 1).await,
        Command::Practice { unit } => {
            let runner = PracticeRunner::new(repository);
            let stdin = std::io::stdin();
            let outcome = runner
                .run(unit, stdin.lock(), std::io::stdout())
                .await
                .with_context(|| format!("Practice of unit {} failed", unit))?;
            info!("Practice finished: {:?}", outcome.summary);
            Ok(())
        }
        Command::Flashcards { unit, shuffle } => {
            let runner = FlashcardRunner::new(repository);
            let stdin = std::io::stdin();
            runner
                .run(unit, shuffle, stdin.lock(), std::io::stdout())
                .await
                .with_context(|| format!("Flashcards of unit {} failed", unit))?;
            Ok(())
        }
        Command::Note { unit, set } => run_note(&api, unit, set).await,
    }
}

async fn run_note(api: &ApiClient, unit: i64, set: Option<String>) -> Result<()> {
    let note = match set {
        Some(content) => api
            .save_unit_note(unit, &content)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))?,
        None => api.unit_note(unit).await?,
    };
    match note {
        Some(note) => println!("{}", note.content),
        None => println!("No note on unit {}", unit),
    }
    Ok(())
}

async fn run_import(
    repository: &ContentRepository,
    content_type: ContentType,
    input: PathBuf,
    languages: LanguagePair,
    unit: Option<i64>,
    save: bool,
) -> Result<()> {
    let text = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let mut assistant = ImportAssistant::new(repository.api().clone(), content_type, languages);
    if let Err(e) = assistant.generate_from(text).await {
        let message = assistant
            .last_error()
            .map(str::to_string)
            .unwrap_or_else(|| e.user_message());
        bail!(message);
    }

    if let Some(drafts) = assistant.wizard().drafts() {
        println!("{}", serde_json::to_string_pretty(drafts)?);
    }

    if let (true, Some(unit_id)) = (save, unit) {
        let summary = assistant
            .save_into(repository, unit_id)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        println!(
            "Saved {} {} into unit {}",
            summary.created,
            content_type.label(),
            unit_id
        );
    }
    Ok(())
}

async fn run_move(
    repository: Arc<ContentRepository>,
    scope: ReorderScope,
    parent: i64,
    from: usize,
    to: usize,
) -> Result<()> {
    match scope {
        ReorderScope::Units => {
            let units = repository.api().book_units(parent).await?;
            move_in(ReorderController::new(repository, parent, units), from, to).await
        }
        ReorderScope::Vocabulary => {
            let items = repository.unit_content(parent).await?.vocabularies.clone();
            move_in(ReorderController::new(repository, parent, items), from, to).await
        }
        ReorderScope::Grammar => {
            let items = repository.unit_content(parent).await?.grammars.clone();
            move_in(ReorderController::new(repository, parent, items), from, to).await
        }
        ReorderScope::Exercises => {
            let items = repository.unit_content(parent).await?.exercises.clone();
            move_in(ReorderController::new(repository, parent, items), from, to).await
        }
    }
}

async fn move_in<T: ScopedItem>(
    mut controller: ReorderController<T>,
    from: usize,
    to: usize,
) -> Result<()> {
    match controller.move_item(from, to).await? {
        ReorderOutcome::Unchanged => println!("Order unchanged"),
        ReorderOutcome::Saved(ids) => println!("New order: {:?}", ids),
        ReorderOutcome::Reverted(e) => {
            bail!("Could not save the new order, reverted: {}", e.user_message())
        }
    }
    Ok(())
}
