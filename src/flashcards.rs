//! Flashcard deck: wrap-around navigation, flip state and self-rating.

use crate::confidence::{Confidence, ConfidenceStore};
use crate::content::Flashcard;
use crate::error::GenerationError;

pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    index: usize,
    flipped: bool,
    ratings: ConfidenceStore,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>, ratings: ConfidenceStore) -> Result<Self, GenerationError> {
        if cards.is_empty() {
            return Err(GenerationError::InsufficientInput { required: 1, found: 0 });
        }
        Ok(Self {
            cards,
            index: 0,
            flipped: false,
            ratings,
        })
    }

    pub fn current(&self) -> &Flashcard {
        &self.cards[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Move by `delta` cards, wrapping at both ends. Always shows the front.
    pub fn go(&mut self, delta: isize) {
        let len = self.cards.len() as isize;
        self.index = (self.index as isize + delta).rem_euclid(len) as usize;
        self.flipped = false;
    }

    pub fn next(&mut self) {
        self.go(1);
    }

    pub fn previous(&mut self) {
        self.go(-1);
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.flipped = false;
    }

    pub fn rating(&self) -> Option<Confidence> {
        self.ratings.get(&self.current().word)
    }

    /// Rate the current card. The caller persists `ratings()` afterwards.
    pub fn rate(&mut self, rating: Option<Confidence>) {
        let word = self.current().word.clone();
        self.ratings.set(&word, rating);
    }

    pub fn ratings(&self) -> &ConfidenceStore {
        &self.ratings
    }
}
