//! Flashcard deck over a unit's vocabulary.
//!
//! The front of a card shows the meaning (and example sentence), the back
//! shows the word itself. Navigation wraps around in both directions and
//! always turns the new card face down.

use crate::types::Vocabulary;
use rand::seq::SliceRandom;
use rand::Rng;

/// Which side of the current card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    /// Meaning and example.
    Front,
    /// Word, phonetic and image.
    Back,
}

#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    cards: Vec<Vocabulary>,
    current: usize,
    side: CardSide,
}

impl FlashcardDeck {
    /// Build a deck in the unit's display order.
    pub fn new(mut cards: Vec<Vocabulary>) -> Self {
        cards.sort_by_key(|v| v.order_index);
        Self {
            cards,
            current: 0,
            side: CardSide::Front,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Vocabulary] {
        &self.cards
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Vocabulary> {
        self.cards.get(self.current)
    }

    pub fn side(&self) -> CardSide {
        self.side
    }

    /// Turn the current card over.
    pub fn flip(&mut self) {
        self.side = match self.side {
            CardSide::Front => CardSide::Back,
            CardSide::Back => CardSide::Front,
        };
    }

    /// Advance to the next card, wrapping to the first.
    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.cards.len();
        self.side = CardSide::Front;
    }

    /// Go back one card, wrapping to the last.
    pub fn previous(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current = (self.current + self.cards.len() - 1) % self.cards.len();
        self.side = CardSide::Front;
    }

    /// Jump to a card. Returns false when `index` is out of range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.cards.len() {
            return false;
        }
        self.current = index;
        self.side = CardSide::Front;
        true
    }

    /// Shuffle with the thread-local generator and restart at the first card.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.current = 0;
        self.side = CardSide::Front;
    }

    /// "Card 3 of 10" style position, 1-based.
    pub fn position(&self) -> (usize, usize) {
        if self.cards.is_empty() {
            (0, 0)
        } else {
            (self.current + 1, self.cards.len())
        }
    }
}
