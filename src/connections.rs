//! Connections puzzle generation: partition sixteen study words into four
//! groups that share a visible structural property.
//!
//! Rules are tried in a fixed priority order and each accepted group takes
//! the first four unused matches in input order:
//! - exact length, 4 up to 10 letters
//! - starting letter, A to Z
//! - ending letter, A to Z
//! - containing a vowel, A E I O U
//! - any four remaining words
//!
//! The cascade stops as soon as four groups exist.

use std::collections::HashSet;

use log::{debug, warn};
use serde::Serialize;

use crate::error::GenerationError;
use crate::rng::WasmRng;
use crate::types::VocabularyItem;

pub const GROUP_SIZE: usize = 4;
pub const GROUP_COUNT: usize = 4;
pub const BOARD_SIZE: usize = GROUP_SIZE * GROUP_COUNT;

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Display tag for a group, assigned in generation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Amber,
    Emerald,
    Blue,
    Purple,
}

impl CategoryColor {
    const ALL: [CategoryColor; GROUP_COUNT] = [
        CategoryColor::Amber,
        CategoryColor::Emerald,
        CategoryColor::Blue,
        CategoryColor::Purple,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
    pub color: CategoryColor,
}

/// One tile on the board. `id` is the word itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsCard {
    pub id: String,
    pub word: String,
    pub category_name: String,
    pub selected: bool,
    pub solved: bool,
}

struct Partitioner<'a> {
    pool: Vec<&'a str>,
    used: HashSet<&'a str>,
    categories: Vec<Category>,
}

impl<'a> Partitioner<'a> {
    fn is_full(&self) -> bool {
        self.categories.len() >= GROUP_COUNT
    }

    /// Accept a group if at least four unused words match.
    fn try_group<F>(&mut self, name: String, predicate: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        if self.is_full() {
            return false;
        }

        let matches: Vec<&'a str> = self
            .pool
            .iter()
            .copied()
            .filter(|w| !self.used.contains(w) && predicate(w))
            .take(GROUP_SIZE)
            .collect();

        if matches.len() < GROUP_SIZE {
            return false;
        }

        self.used.extend(matches.iter().copied());
        debug!("connections: group {:?} -> {:?}", name, matches);
        self.categories.push(Category {
            name,
            words: matches.iter().map(|w| w.to_string()).collect(),
            color: CategoryColor::ALL[self.categories.len()],
        });
        true
    }
}

/// Split the vocabulary into four disjoint groups of four.
///
/// Duplicate words are collapsed to their first occurrence, and at least
/// sixteen distinct words are required.
pub fn partition(vocabulary: &[VocabularyItem]) -> Result<Vec<Category>, GenerationError> {
    let mut seen = HashSet::new();
    let pool: Vec<&str> = vocabulary
        .iter()
        .map(|item| item.word.as_str())
        .filter(|w| seen.insert(*w))
        .collect();

    if pool.len() < BOARD_SIZE {
        warn!("connections: only {} distinct word(s)", pool.len());
        return Err(GenerationError::InsufficientInput {
            required: BOARD_SIZE,
            found: pool.len(),
        });
    }

    let mut p = Partitioner {
        pool,
        used: HashSet::new(),
        categories: Vec::with_capacity(GROUP_COUNT),
    };

    for len in 4..=10 {
        p.try_group(format!("{} LETTERS", len), |w| w.chars().count() == len);
    }

    for letter in ALPHABET.chars() {
        p.try_group(format!("STARTS WITH '{}'", letter), |w| {
            upper_chars(w).next() == Some(letter)
        });
    }

    for letter in ALPHABET.chars() {
        p.try_group(format!("ENDS WITH '{}'", letter), |w| {
            upper_chars(w).last() == Some(letter)
        });
    }

    for vowel in VOWELS {
        p.try_group(format!("CONTAINS '{}'", vowel), |w| upper_chars(w).any(|c| c == vowel));
    }

    while !p.is_full() {
        let name = format!("RANDOM GROUP {}", p.categories.len() + 1);
        if !p.try_group(name, |_| true) {
            warn!("connections: pool exhausted after {} group(s)", p.categories.len());
            return Err(GenerationError::InsufficientCategories {
                found: p.categories.len(),
            });
        }
    }

    Ok(p.categories)
}

fn upper_chars(word: &str) -> impl DoubleEndedIterator<Item = char> + '_ {
    word.chars().map(|c| c.to_ascii_uppercase())
}

/// Flatten the groups into board tiles in a uniformly shuffled order,
/// independent of group order.
pub fn deal_cards(categories: &[Category], rng: &mut WasmRng) -> Vec<ConnectionsCard> {
    let mut cards: Vec<ConnectionsCard> = categories
        .iter()
        .flat_map(|category| {
            category.words.iter().map(move |word| ConnectionsCard {
                id: word.clone(),
                word: word.clone(),
                category_name: category.name.clone(),
                selected: false,
                solved: false,
            })
        })
        .collect();

    rng.shuffle(&mut cards);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(words: &[&str]) -> Vec<VocabularyItem> {
        words.iter().map(|w| VocabularyItem::new(w, "")).collect()
    }

    fn names(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.name.as_str()).collect()
    }

    const SIXTEEN: [&str; 16] = [
        "lucid", "aloof", "candor", "benign", "nuance", "zealous", "serene", "arcane",
        "pragmatic", "tenacious", "ephemeral", "resilient", "laconic", "verbose", "stoic", "wary",
    ];

    #[test]
    fn test_disjoint_cover_of_input() {
        let items = vocab(&SIXTEEN);
        let categories = partition(&items).unwrap();
        assert_eq!(categories.len(), 4);

        let mut all = HashSet::new();
        for c in &categories {
            assert_eq!(c.words.len(), 4);
            for w in &c.words {
                assert!(SIXTEEN.contains(&w.as_str()));
                assert!(all.insert(w.clone()), "{} reused", w);
            }
        }
        assert_eq!(all.len(), 16);

        let colors: Vec<usize> = categories.iter().map(|c| c.color.index()).collect();
        assert_eq!(colors, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_fifteen_words_is_insufficient() {
        let items = vocab(&SIXTEEN[..15]);
        assert_eq!(
            partition(&items),
            Err(GenerationError::InsufficientInput { required: 16, found: 15 })
        );
    }

    #[test]
    fn test_duplicates_do_not_count() {
        let mut words = SIXTEEN[..15].to_vec();
        words.push("lucid");
        assert_eq!(
            partition(&vocab(&words)),
            Err(GenerationError::InsufficientInput { required: 16, found: 15 })
        );
    }

    #[test]
    fn test_length_rule_claims_before_starts_with() {
        // Five-letter words starting with A overlap both rules.
        let items = vocab(&[
            "adept", "agile", "alert", "ample", "abate", "aroma",
            "ab", "az", "ax", "aq",
            "zz", "yy", "xx", "ww", "vv", "uu",
        ]);
        let categories = partition(&items).unwrap();

        assert_eq!(categories[0].name, "5 LETTERS");
        assert_eq!(categories[0].words, vec!["adept", "agile", "alert", "ample"]);
        assert_eq!(categories[1].name, "STARTS WITH 'A'");
        assert_eq!(categories[1].words, vec!["abate", "aroma", "ab", "az"]);
    }

    #[test]
    fn test_rule_cascade_order() {
        let items = vocab(&[
            // the only length with four words
            "candor", "benign", "nuance", "serene",
            // starting with P
            "pragmatic", "pithy", "pert", "placid",
            // ending in Y
            "wary", "glossy", "jittery", "haughty",
            // containing O
            "dour", "stoic", "verbose", "obdurate",
        ]);
        let categories = partition(&items).unwrap();
        assert_eq!(
            names(&categories),
            vec!["6 LETTERS", "STARTS WITH 'P'", "ENDS WITH 'Y'", "CONTAINS 'O'"]
        );
    }

    #[test]
    fn test_random_group_fallback() {
        // All two letters, no shared first or last letter, no vowels.
        let words: Vec<String> = "bcdfghjklmnpqrst"
            .chars()
            .zip("vwxyzbcdfghjklmn".chars())
            .map(|(a, b)| format!("{}{}", a, b))
            .collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let categories = partition(&vocab(&refs)).unwrap();
        assert_eq!(
            names(&categories),
            vec!["RANDOM GROUP 1", "RANDOM GROUP 2", "RANDOM GROUP 3", "RANDOM GROUP 4"]
        );
        assert_eq!(categories[0].words, refs[..4].to_vec());
    }

    #[test]
    fn test_deal_cards_is_seeded_permutation() {
        let categories = partition(&vocab(&SIXTEEN)).unwrap();
        let a = deal_cards(&categories, &mut WasmRng::from_seed(3));
        let b = deal_cards(&categories, &mut WasmRng::from_seed(3));
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);

        for card in &a {
            assert_eq!(card.id, card.word);
            assert!(!card.selected && !card.solved);
            let category = categories.iter().find(|c| c.name == card.category_name).unwrap();
            assert!(category.words.contains(&card.word));
        }
    }
}
