//! Play state for a connections board: up to four selected tiles, a
//! mistake budget and win/loss detection.
//!
//! Invalid moves (a fifth selection, touching a solved tile, submitting
//! fewer than four, anything after the game ended) are no-ops.

use log::info;
use serde::Serialize;

use crate::config::ConnectionsConfig;
use crate::connections::{deal_cards, partition, Category, ConnectionsCard, GROUP_COUNT, GROUP_SIZE};
use crate::error::GenerationError;
use crate::rng::WasmRng;
use crate::types::VocabularyItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionsPhase {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SubmitOutcome {
    /// Not exactly four tiles selected, or the game is over.
    Ignored,
    Correct { category: String },
    /// The selection is kept so the player can adjust it.
    Mistake { mistakes_remaining: u32 },
}

pub struct ConnectionsSession {
    categories: Vec<Category>,
    /// Solved groups first, in solve order, then the unsolved tiles.
    cards: Vec<ConnectionsCard>,
    solved: Vec<String>,
    mistakes_remaining: u32,
    phase: ConnectionsPhase,
    config: ConnectionsConfig,
}

impl ConnectionsSession {
    pub fn new(
        vocabulary: &[VocabularyItem],
        config: ConnectionsConfig,
        rng: &mut WasmRng,
    ) -> Result<Self, GenerationError> {
        config.validate()?;
        let categories = partition(vocabulary)?;
        Ok(Self::from_categories(categories, config, rng))
    }

    pub fn from_categories(
        categories: Vec<Category>,
        config: ConnectionsConfig,
        rng: &mut WasmRng,
    ) -> Self {
        let cards = deal_cards(&categories, rng);
        Self {
            categories,
            cards,
            solved: Vec::new(),
            mistakes_remaining: config.mistakes,
            phase: ConnectionsPhase::Playing,
            config,
        }
    }

    /// Regenerate the board and reset all play state. On failure the
    /// current game is left untouched.
    pub fn new_game(
        &mut self,
        vocabulary: &[VocabularyItem],
        rng: &mut WasmRng,
    ) -> Result<(), GenerationError> {
        let categories = partition(vocabulary)?;
        *self = Self::from_categories(categories, self.config.clone(), rng);
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn cards(&self) -> &[ConnectionsCard] {
        &self.cards
    }

    /// Names of solved groups in the order they were found.
    pub fn solved(&self) -> &[String] {
        &self.solved
    }

    pub fn mistakes_remaining(&self) -> u32 {
        self.mistakes_remaining
    }

    pub fn phase(&self) -> ConnectionsPhase {
        self.phase
    }

    pub fn selected_ids(&self) -> Vec<&str> {
        self.cards
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.id.as_str())
            .collect()
    }

    fn selected_count(&self) -> usize {
        self.cards.iter().filter(|c| c.selected).count()
    }

    /// Toggle a tile's selection.
    pub fn select(&mut self, id: &str) {
        if self.phase != ConnectionsPhase::Playing {
            return;
        }
        let count = self.selected_count();
        let Some(card) = self.cards.iter_mut().find(|c| c.id == id) else {
            return;
        };
        if card.solved || (!card.selected && count >= GROUP_SIZE) {
            return;
        }
        card.selected = !card.selected;
    }

    pub fn deselect_all(&mut self) {
        if self.phase != ConnectionsPhase::Playing {
            return;
        }
        for card in self.cards.iter_mut().filter(|c| !c.solved) {
            card.selected = false;
        }
    }

    /// Check the current four tiles.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.phase != ConnectionsPhase::Playing || self.selected_count() != GROUP_SIZE {
            return SubmitOutcome::Ignored;
        }

        let mut picked = self.cards.iter().filter(|c| c.selected);
        let Some(first) = picked.next().map(|c| c.category_name.clone()) else {
            return SubmitOutcome::Ignored;
        };

        if !picked.all(|c| c.category_name == first) {
            self.mistakes_remaining = self.mistakes_remaining.saturating_sub(1);
            if self.mistakes_remaining == 0 {
                info!("connections lost");
                self.phase = ConnectionsPhase::Lost;
            }
            return SubmitOutcome::Mistake {
                mistakes_remaining: self.mistakes_remaining,
            };
        }

        for card in self.cards.iter_mut().filter(|c| c.selected) {
            card.selected = false;
            card.solved = true;
        }
        self.solved.push(first.clone());
        self.regroup();

        if self.solved.len() == GROUP_COUNT {
            info!("connections won with {} mistake(s) left", self.mistakes_remaining);
            self.phase = ConnectionsPhase::Won;
        }

        SubmitOutcome::Correct { category: first }
    }

    /// Shuffle the unsolved tiles; solved groups keep their place in front.
    pub fn shuffle(&mut self, rng: &mut WasmRng) {
        let split = self.cards.iter().take_while(|c| c.solved).count();
        rng.shuffle(&mut self.cards[split..]);
    }

    /// Move solved groups to the front in solve order, keeping the relative
    /// order of everything else.
    fn regroup(&mut self) {
        let rank = |card: &ConnectionsCard| {
            if card.solved {
                self.solved
                    .iter()
                    .position(|name| *name == card.category_name)
                    .unwrap_or(GROUP_COUNT)
            } else {
                GROUP_COUNT
            }
        };
        let mut cards = std::mem::take(&mut self.cards);
        cards.sort_by_key(|c| rank(c));
        self.cards = cards;
    }
}
