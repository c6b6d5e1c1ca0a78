//! Data contract with the external study-content generator.
//!
//! The generator itself (prompting and transport) lives outside this
//! crate. It hands back one JSON document per request, which is decoded and
//! checked here before any session is built from it.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::types::VocabularyItem;

pub const QUIZ_OPTIONS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(alias = "correct")]
    pub correct_index: usize,
    pub word: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub word: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antonyms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
    #[serde(default)]
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
}

impl Flashcard {
    pub fn to_vocabulary(&self) -> VocabularyItem {
        VocabularyItem::new(&self.word, &self.definition)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensionQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphData {
    /// Prose with vocabulary wrapped in `**` markers.
    pub paragraph: String,
    #[serde(default)]
    pub questions: Vec<ComprehensionQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub quiz: Vec<QuizQuestion>,
    pub flashcards: Vec<Flashcard>,
    pub matching: Vec<VocabularyItem>,
    pub paragraph: ParagraphData,
}

impl GeneratedContent {
    /// Decode and validate a generator response.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content: GeneratedContent = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        for (i, q) in self.quiz.iter().enumerate() {
            if q.options.len() != QUIZ_OPTIONS {
                return Err(ContentError::Malformed(format!(
                    "quiz question {} has {} options",
                    i + 1,
                    q.options.len()
                )));
            }
            if q.correct_index >= q.options.len() {
                return Err(ContentError::Malformed(format!(
                    "quiz question {} answer index {} out of range",
                    i + 1,
                    q.correct_index
                )));
            }
        }
        if let Some(card) = self.flashcards.iter().find(|c| c.word.trim().is_empty()) {
            return Err(ContentError::Malformed(format!(
                "flashcard with empty word (definition {:?})",
                card.definition
            )));
        }
        if self.matching.iter().any(|p| p.word.trim().is_empty()) {
            return Err(ContentError::Malformed("matching pair with empty word".into()));
        }
        Ok(())
    }

    /// The flashcards as plain word/definition items for the puzzles.
    pub fn vocabulary(&self) -> Vec<VocabularyItem> {
        self.flashcards.iter().map(Flashcard::to_vocabulary).collect()
    }
}

/// The external generator, as seen from the app.
pub trait ContentProvider {
    fn generate(&mut self, words: &[String]) -> Result<GeneratedContent, ContentError>;
}

/// Allows at most one generation request in flight per session.
#[derive(Default)]
pub struct GenerationGuard {
    busy: Cell<bool>,
}

/// Held for the duration of a request; releases the guard on drop.
pub struct GenerationTicket<'a> {
    guard: &'a GenerationGuard,
}

impl Drop for GenerationTicket<'_> {
    fn drop(&mut self) {
        self.guard.busy.set(false);
    }
}

impl GenerationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Start a request, or `Busy` if one is already running.
    pub fn begin(&self) -> Result<GenerationTicket<'_>, ContentError> {
        if self.busy.replace(true) {
            return Err(ContentError::Busy);
        }
        Ok(GenerationTicket { guard: self })
    }

    /// Run a provider call under the guard.
    pub fn run<P: ContentProvider>(
        &self,
        provider: &mut P,
        words: &[String],
    ) -> Result<GeneratedContent, ContentError> {
        let _ticket = self.begin()?;
        let content = provider.generate(words)?;
        content.validate()?;
        Ok(content)
    }
}
