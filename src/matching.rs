//! Word/definition matching: every pair yields two face-up cards; picking
//! a word and its own definition removes the pair.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::GenerationError;
use crate::rng::WasmRng;
use crate::types::VocabularyItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Word,
    Definition,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCard {
    pub id: String,
    pub content: String,
    pub kind: CardKind,
    pub pair_id: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchOutcome {
    Ignored,
    /// First card of a pair attempt.
    Selected,
    Matched,
    Mismatched,
}

pub struct MatchingGame {
    cards: Vec<MatchCard>,
    pair_count: usize,
    selected: Option<usize>,
    matched: BTreeSet<usize>,
    attempts: u32,
}

impl MatchingGame {
    pub fn new(pairs: &[VocabularyItem], rng: &mut WasmRng) -> Result<Self, GenerationError> {
        if pairs.is_empty() {
            return Err(GenerationError::InsufficientInput { required: 1, found: 0 });
        }

        let mut cards: Vec<MatchCard> = pairs
            .iter()
            .enumerate()
            .flat_map(|(i, pair)| {
                [
                    MatchCard {
                        id: format!("word-{}", i),
                        content: pair.word.clone(),
                        kind: CardKind::Word,
                        pair_id: i,
                    },
                    MatchCard {
                        id: format!("definition-{}", i),
                        content: pair.definition.clone(),
                        kind: CardKind::Definition,
                        pair_id: i,
                    },
                ]
            })
            .collect();
        rng.shuffle(&mut cards);

        Ok(Self {
            cards,
            pair_count: pairs.len(),
            selected: None,
            matched: BTreeSet::new(),
            attempts: 0,
        })
    }

    pub fn cards(&self) -> &[MatchCard] {
        &self.cards
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn selected(&self) -> Option<&MatchCard> {
        self.selected.map(|i| &self.cards[i])
    }

    pub fn is_matched(&self, pair_id: usize) -> bool {
        self.matched.contains(&pair_id)
    }

    pub fn is_complete(&self) -> bool {
        self.matched.len() == self.pair_count
    }

    /// Pick a card. The second pick of an attempt always clears the
    /// selection, whether or not it matched.
    pub fn select(&mut self, id: &str) -> MatchOutcome {
        let Some(index) = self.cards.iter().position(|c| c.id == id) else {
            return MatchOutcome::Ignored;
        };
        if self.selected == Some(index) || self.matched.contains(&self.cards[index].pair_id) {
            return MatchOutcome::Ignored;
        }

        let Some(first) = self.selected.take() else {
            self.selected = Some(index);
            return MatchOutcome::Selected;
        };

        self.attempts += 1;
        let (a, b) = (&self.cards[first], &self.cards[index]);
        if a.pair_id == b.pair_id && a.kind != b.kind {
            self.matched.insert(a.pair_id);
            MatchOutcome::Matched
        } else {
            MatchOutcome::Mismatched
        }
    }

    pub fn reset(&mut self, rng: &mut WasmRng) {
        rng.shuffle(&mut self.cards);
        self.selected = None;
        self.matched.clear();
        self.attempts = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> MatchingGame {
        let pairs = vec![
            VocabularyItem::new("lucid", "clear"),
            VocabularyItem::new("aloof", "distant"),
        ];
        MatchingGame::new(&pairs, &mut WasmRng::from_seed(4)).unwrap()
    }

    #[test]
    fn test_cards_cover_both_sides() {
        let g = game();
        assert_eq!(g.cards().len(), 4);
        let mut ids: Vec<&str> = g.cards().iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["definition-0", "definition-1", "word-0", "word-1"]);
    }

    #[test]
    fn test_match_and_complete() {
        let mut g = game();
        assert_eq!(g.select("word-0"), MatchOutcome::Selected);
        assert_eq!(g.select("word-0"), MatchOutcome::Ignored);
        assert_eq!(g.select("definition-0"), MatchOutcome::Matched);
        assert!(g.is_matched(0));
        assert_eq!(g.select("word-0"), MatchOutcome::Ignored);

        assert_eq!(g.select("definition-1"), MatchOutcome::Selected);
        assert_eq!(g.select("word-1"), MatchOutcome::Matched);
        assert!(g.is_complete());
        assert_eq!(g.attempts(), 2);
    }

    #[test]
    fn test_mismatch_counts_attempt_and_clears() {
        let mut g = game();
        g.select("word-0");
        assert_eq!(g.select("word-1"), MatchOutcome::Mismatched);
        assert_eq!(g.attempts(), 1);
        assert!(g.selected().is_none());
        assert!(!g.is_complete());

        g.reset(&mut WasmRng::from_seed(5));
        assert_eq!(g.attempts(), 0);
    }

    #[test]
    fn test_empty_pairs() {
        assert!(MatchingGame::new(&[], &mut WasmRng::from_seed(1)).is_err());
    }
}
