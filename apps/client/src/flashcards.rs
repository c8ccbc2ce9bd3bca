//! Text-mode flashcards over a unit's vocabulary.

use langleague_core::{CardSide, FlashcardDeck, Vocabulary};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::repository::ContentRepository;

/// One keystroke-style command typed at the card prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckCommand {
    Flip,
    Next,
    Previous,
    Shuffle,
    /// Jump to a card, 0-based.
    GoTo(usize),
    Quit,
}

/// Parse a command line. An empty line flips; numbers are 1-based.
pub fn parse_command(line: &str) -> Option<DeckCommand> {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "" | "f" | "flip" => Some(DeckCommand::Flip),
        "n" | "next" => Some(DeckCommand::Next),
        "p" | "prev" | "previous" => Some(DeckCommand::Previous),
        "s" | "shuffle" => Some(DeckCommand::Shuffle),
        "q" | "quit" => Some(DeckCommand::Quit),
        other => {
            let number: usize = other.parse().ok()?;
            number.checked_sub(1).map(DeckCommand::GoTo)
        }
    }
}

fn write_card<W: Write>(out: &mut W, deck: &FlashcardDeck) -> Result<()> {
    let Some(card) = deck.current() else {
        return Ok(());
    };
    let (number, total) = deck.position();
    writeln!(out, "\nCard {} of {}", number, total)?;
    match deck.side() {
        CardSide::Front => {
            writeln!(out, "  {}", card.meaning)?;
            if let Some(example) = &card.example {
                writeln!(out, "  \"{}\"", example)?;
            }
        }
        CardSide::Back => write_answer(out, card)?,
    }
    write!(out, "[enter] flip  [n]ext  [p]revious  [s]huffle  [q]uit> ")?;
    out.flush()?;
    Ok(())
}

fn write_answer<W: Write>(out: &mut W, card: &Vocabulary) -> Result<()> {
    match &card.phonetic {
        Some(phonetic) => writeln!(out, "  {} /{}/", card.word, phonetic.trim_matches('/'))?,
        None => writeln!(out, "  {}", card.word)?,
    }
    Ok(())
}

/// How a flashcard run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashcardOutcome {
    pub total: usize,
    /// Distinct cards whose answer side was shown.
    pub revealed: usize,
}

/// Shows a unit's vocabulary as flashcards over line-based input.
pub struct FlashcardRunner {
    repository: Arc<ContentRepository>,
}

impl FlashcardRunner {
    pub fn new(repository: Arc<ContentRepository>) -> Self {
        Self { repository }
    }

    /// Deck over the unit's vocabulary in display order.
    pub async fn deck(&self, unit_id: i64) -> Result<FlashcardDeck> {
        let content = self.repository.unit_content(unit_id).await?;
        Ok(FlashcardDeck::new(content.vocabularies.clone()))
    }

    /// Run the deck until `q` or end of input.
    pub async fn run<R, W>(
        &self,
        unit_id: i64,
        shuffle: bool,
        mut input: R,
        mut out: W,
    ) -> Result<FlashcardOutcome>
    where
        R: BufRead,
        W: Write,
    {
        let unit = self.repository.api().get_unit(unit_id).await?;
        let mut deck = self.deck(unit_id).await?;
        writeln!(out, "Flashcards: {}", unit.title)?;
        if deck.is_empty() {
            writeln!(out, "No flashcards available.")?;
            return Ok(FlashcardOutcome {
                total: 0,
                revealed: 0,
            });
        }
        if shuffle {
            deck.shuffle();
        }

        let mut revealed = BTreeSet::new();
        loop {
            write_card(&mut out, &deck)?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            match parse_command(&line) {
                Some(DeckCommand::Flip) => {
                    deck.flip();
                    if deck.side() == CardSide::Back {
                        if let Some(id) = deck.current().and_then(|c| c.id) {
                            revealed.insert(id);
                        }
                    }
                }
                Some(DeckCommand::Next) => deck.next(),
                Some(DeckCommand::Previous) => deck.previous(),
                Some(DeckCommand::Shuffle) => deck.shuffle(),
                Some(DeckCommand::GoTo(index)) => {
                    if !deck.go_to(index) {
                        writeln!(out, "No card {}.", index + 1)?;
                    }
                }
                Some(DeckCommand::Quit) => break,
                None => writeln!(out, "Unknown command.")?,
            }
        }

        let outcome = FlashcardOutcome {
            total: deck.len(),
            revealed: revealed.len(),
        };
        info!(
            "Flashcards of unit {}: {}/{} revealed",
            unit_id, outcome.revealed, outcome.total
        );
        Ok(outcome)
    }
}
