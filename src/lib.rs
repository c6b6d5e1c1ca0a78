//! WebAssembly puzzle engine for the vocabulary study app.
//!
//! Turns a study list into playable structures (a crossword, a connections
//! board, hangman, matching and paragraph cloze) and drives each with a
//! small state machine. Everything random takes a `WasmRng`, so a seed
//! reproduces a puzzle exactly.
//!
//! Sessions are exported to JavaScript as classes via wasm-bindgen; all
//! structured values cross the boundary through `serde-wasm-bindgen`.

pub mod cloze;
pub mod config;
pub mod confidence;
pub mod connections;
pub mod connections_session;
pub mod content;
pub mod crossword;
pub mod crossword_session;
pub mod error;
pub mod flashcards;
pub mod hangman;
pub mod matching;
pub mod placement;
pub mod quiz;
pub mod rng;
pub mod types;

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use crate::cloze::{self, ClozeGame, DragSource};
    use crate::confidence::{Confidence, ConfidenceStore, KeyValueStore};
    use crate::config::{ConnectionsConfig, CrosswordConfig};
    use crate::connections_session::ConnectionsSession;
    use crate::content::{Flashcard, GeneratedContent, QuizQuestion};
    use crate::crossword::generate_crossword;
    use crate::crossword_session::{Arrow, CrosswordPhase, CrosswordSession};
    use crate::flashcards::FlashcardDeck;
    use crate::hangman::HangmanGame;
    use crate::matching::MatchingGame;
    use crate::quiz::QuizSession;
    use crate::rng::WasmRng;
    use crate::types::{Direction, VocabularyItem};

    // ─── Logging ────────────────────────────────────────────────────────────

    struct ConsoleLogger;

    impl log::Log for ConsoleLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &log::Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
            match record.level() {
                log::Level::Error => web_sys::console::error_1(&msg),
                log::Level::Warn => web_sys::console::warn_1(&msg),
                log::Level::Info => web_sys::console::info_1(&msg),
                _ => web_sys::console::debug_1(&msg),
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: ConsoleLogger = ConsoleLogger;

    /// Install the panic hook and route `log` output to the browser console.
    #[wasm_bindgen(js_name = "init")]
    pub fn wasm_init(verbose: bool) {
        console_error_panic_hook::set_once();
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(if verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            });
        }
    }

    // ─── Boundary helpers ───────────────────────────────────────────────────

    fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
        serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
    }

    fn js_err<E: std::fmt::Display>(e: E) -> JsError {
        JsError::new(&e.to_string())
    }

    fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
        serde_wasm_bindgen::from_value(value).map_err(js_err)
    }

    /// `undefined` / `null` fall back to the default config.
    fn config_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsError> {
        if value.is_undefined() || value.is_null() {
            Ok(T::default())
        } else {
            from_js(value)
        }
    }

    fn rng_for(seed: Option<u32>) -> WasmRng {
        WasmRng::from_optional_seed(seed.map(u64::from))
    }

    fn parse_direction(direction: &str) -> Option<Direction> {
        match direction {
            "across" => Some(Direction::Across),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    struct LocalStorage(web_sys::Storage);

    impl LocalStorage {
        fn open() -> Option<Self> {
            web_sys::window()?.local_storage().ok()?.map(LocalStorage)
        }
    }

    impl KeyValueStore for LocalStorage {
        fn read(&self, key: &str) -> Option<String> {
            self.0.get_item(key).ok().flatten()
        }

        fn write(&mut self, key: &str, value: &str) {
            if let Err(e) = self.0.set_item(key, value) {
                log::warn!("localStorage write failed: {:?}", e);
            }
        }
    }

    // ─── Content contract ───────────────────────────────────────────────────

    /// Decode and validate a generator response.
    #[wasm_bindgen(js_name = "parseGeneratedContent")]
    pub fn wasm_parse_generated_content(json: &str) -> Result<JsValue, JsError> {
        GeneratedContent::from_json(json).map(|content| to_js(&content)).map_err(js_err)
    }

    #[wasm_bindgen(js_name = "answerMatches")]
    pub fn wasm_answer_matches(expected: &str, given: &str) -> bool {
        cloze::answer_matches(expected, given)
    }

    // ─── Crossword ──────────────────────────────────────────────────────────

    /// One-shot generation for callers that render the grid themselves.
    /// Returns `{ success, attempts, bestAttempt, size, grid, clues }`, where
    /// `grid` is a row-major `Uint32Array` of code points (0 = empty cell).
    #[wasm_bindgen(js_name = "generateCrossword")]
    pub fn wasm_generate_crossword(
        vocabulary: JsValue,
        config: JsValue,
        seed: Option<u32>,
    ) -> Result<JsValue, JsError> {
        let vocabulary: Vec<VocabularyItem> = from_js(vocabulary)?;
        let config: CrosswordConfig = config_from_js(config)?;
        let obj = js_sys::Object::new();

        match generate_crossword(&vocabulary, &config, &mut rng_for(seed)) {
            Ok(cw) => {
                let size = cw.grid.size;
                let letters = js_sys::Uint32Array::new_with_length((size * size) as u32);
                for (row, col, ch) in cw.grid.occupied() {
                    letters.set_index((row * size + col) as u32, ch as u32);
                }
                js_sys::Reflect::set(&obj, &"success".into(), &true.into()).unwrap();
                js_sys::Reflect::set(&obj, &"attempts".into(), &cw.attempts.into()).unwrap();
                js_sys::Reflect::set(&obj, &"bestAttempt".into(), &cw.best_attempt.into()).unwrap();
                js_sys::Reflect::set(&obj, &"size".into(), &(size as u32).into()).unwrap();
                js_sys::Reflect::set(&obj, &"grid".into(), &letters.into()).unwrap();
                js_sys::Reflect::set(&obj, &"clues".into(), &to_js(&cw.clues)).unwrap();
            }
            Err(e) => {
                js_sys::Reflect::set(&obj, &"success".into(), &false.into()).unwrap();
                js_sys::Reflect::set(&obj, &"error".into(), &e.to_string().into()).unwrap();
            }
        }
        Ok(obj.into())
    }

    #[wasm_bindgen(js_name = "CrosswordGame")]
    pub struct JsCrossword {
        session: CrosswordSession,
    }

    #[wasm_bindgen(js_class = "CrosswordGame")]
    impl JsCrossword {
        #[wasm_bindgen(constructor)]
        pub fn new(
            vocabulary: JsValue,
            config: JsValue,
            seed: Option<u32>,
        ) -> Result<JsCrossword, JsError> {
            let vocabulary: Vec<VocabularyItem> = from_js(vocabulary)?;
            let config: CrosswordConfig = config_from_js(config)?;
            let mut rng = rng_for(seed);
            let puzzle = generate_crossword(&vocabulary, &config, &mut rng).map_err(js_err)?;
            Ok(JsCrossword { session: CrosswordSession::new(puzzle) })
        }

        /// `{ size, placed, clues, attempts, bestAttempt }`
        pub fn puzzle(&self) -> JsValue {
            to_js(self.session.puzzle())
        }

        pub fn cells(&self) -> JsValue {
            to_js(&self.session.cells())
        }

        pub fn selected(&self) -> JsValue {
            to_js(&self.session.selected())
        }

        pub fn direction(&self) -> JsValue {
            to_js(&self.session.direction())
        }

        #[wasm_bindgen(js_name = "isSolved")]
        pub fn is_solved(&self) -> bool {
            self.session.phase() == CrosswordPhase::Solved
        }

        #[wasm_bindgen(js_name = "activeClue")]
        pub fn active_clue(&self) -> JsValue {
            to_js(&self.session.active_clue())
        }

        pub fn click(&mut self, row: usize, col: usize) {
            self.session.click(row, col);
        }

        #[wasm_bindgen(js_name = "selectClue")]
        pub fn select_clue(&mut self, number: u32, direction: &str) {
            if let Some(direction) = parse_direction(direction) {
                self.session.select_clue(number, direction);
            }
        }

        /// Feed a `KeyboardEvent.key` value. Returns true if it was handled.
        pub fn key(&mut self, key: &str) -> bool {
            let arrow = match key {
                "ArrowUp" => Some(Arrow::Up),
                "ArrowDown" => Some(Arrow::Down),
                "ArrowLeft" => Some(Arrow::Left),
                "ArrowRight" => Some(Arrow::Right),
                _ => None,
            };
            if let Some(arrow) = arrow {
                self.session.arrow(arrow);
                return true;
            }
            if key == "Backspace" {
                self.session.backspace();
                return true;
            }
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_alphabetic() => {
                    self.session.type_letter(ch);
                    true
                }
                _ => false,
            }
        }

        pub fn check(&mut self) -> bool {
            self.session.check() == CrosswordPhase::Solved
        }

        pub fn reveal(&self, row: usize, col: usize) -> Option<String> {
            self.session.reveal(row, col).map(String::from)
        }
    }

    // ─── Connections ────────────────────────────────────────────────────────

    #[wasm_bindgen(js_name = "ConnectionsGame")]
    pub struct JsConnections {
        session: ConnectionsSession,
        rng: WasmRng,
    }

    #[wasm_bindgen(js_class = "ConnectionsGame")]
    impl JsConnections {
        #[wasm_bindgen(constructor)]
        pub fn new(
            vocabulary: JsValue,
            config: JsValue,
            seed: Option<u32>,
        ) -> Result<JsConnections, JsError> {
            let vocabulary: Vec<VocabularyItem> = from_js(vocabulary)?;
            let config: ConnectionsConfig = config_from_js(config)?;
            let mut rng = rng_for(seed);
            let session = ConnectionsSession::new(&vocabulary, config, &mut rng).map_err(js_err)?;
            Ok(JsConnections { session, rng })
        }

        pub fn cards(&self) -> JsValue {
            to_js(self.session.cards())
        }

        pub fn categories(&self) -> JsValue {
            to_js(self.session.categories())
        }

        pub fn solved(&self) -> JsValue {
            to_js(self.session.solved())
        }

        #[wasm_bindgen(js_name = "mistakesRemaining")]
        pub fn mistakes_remaining(&self) -> u32 {
            self.session.mistakes_remaining()
        }

        pub fn phase(&self) -> JsValue {
            to_js(&self.session.phase())
        }

        pub fn select(&mut self, id: &str) {
            self.session.select(id);
        }

        #[wasm_bindgen(js_name = "deselectAll")]
        pub fn deselect_all(&mut self) {
            self.session.deselect_all();
        }

        /// `{ kind: "ignored" | "correct" | "mistake", ... }`
        pub fn submit(&mut self) -> JsValue {
            to_js(&self.session.submit())
        }

        pub fn shuffle(&mut self) {
            self.session.shuffle(&mut self.rng);
        }

        #[wasm_bindgen(js_name = "newGame")]
        pub fn new_game(&mut self, vocabulary: JsValue) -> Result<(), JsError> {
            let vocabulary: Vec<VocabularyItem> = from_js(vocabulary)?;
            self.session.new_game(&vocabulary, &mut self.rng).map_err(js_err)
        }
    }

    // ─── Hangman ────────────────────────────────────────────────────────────

    #[wasm_bindgen(js_name = "HangmanGame")]
    pub struct JsHangman {
        game: HangmanGame,
    }

    #[wasm_bindgen(js_class = "HangmanGame")]
    impl JsHangman {
        #[wasm_bindgen(constructor)]
        pub fn new(vocabulary: JsValue, seed: Option<u32>) -> Result<JsHangman, JsError> {
            let vocabulary: Vec<VocabularyItem> = from_js(vocabulary)?;
            let game = HangmanGame::new(&vocabulary, &mut rng_for(seed)).map_err(js_err)?;
            Ok(JsHangman { game })
        }

        pub fn guess(&mut self, letter: &str) -> JsValue {
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => to_js(&self.game.guess(ch)),
                _ => to_js(&crate::hangman::GuessOutcome::Ignored),
            }
        }

        pub fn masked(&self) -> String {
            self.game.masked()
        }

        #[wasm_bindgen(js_name = "showHint")]
        pub fn show_hint(&mut self) {
            self.game.show_hint();
        }

        pub fn hint(&self) -> Option<String> {
            self.game.hint().map(str::to_string)
        }

        pub fn phase(&self) -> JsValue {
            to_js(&self.game.phase())
        }

        #[wasm_bindgen(js_name = "wrongGuesses")]
        pub fn wrong_guesses(&self) -> u32 {
            self.game.wrong_guesses()
        }

        #[wasm_bindgen(js_name = "wordIndex")]
        pub fn word_index(&self) -> usize {
            self.game.word_index()
        }

        #[wasm_bindgen(js_name = "wordCount")]
        pub fn word_count(&self) -> usize {
            self.game.word_count()
        }

        pub fn guesses(&self) -> String {
            self.game.guesses().collect()
        }
    }

    // ─── Matching ───────────────────────────────────────────────────────────

    #[wasm_bindgen(js_name = "MatchingGame")]
    pub struct JsMatching {
        game: MatchingGame,
        rng: WasmRng,
    }

    #[wasm_bindgen(js_class = "MatchingGame")]
    impl JsMatching {
        #[wasm_bindgen(constructor)]
        pub fn new(pairs: JsValue, seed: Option<u32>) -> Result<JsMatching, JsError> {
            let pairs: Vec<VocabularyItem> = from_js(pairs)?;
            let mut rng = rng_for(seed);
            let game = MatchingGame::new(&pairs, &mut rng).map_err(js_err)?;
            Ok(JsMatching { game, rng })
        }

        pub fn cards(&self) -> JsValue {
            to_js(self.game.cards())
        }

        pub fn select(&mut self, id: &str) -> JsValue {
            to_js(&self.game.select(id))
        }

        #[wasm_bindgen(js_name = "isMatched")]
        pub fn is_matched(&self, pair_id: usize) -> bool {
            self.game.is_matched(pair_id)
        }

        #[wasm_bindgen(js_name = "isComplete")]
        pub fn is_complete(&self) -> bool {
            self.game.is_complete()
        }

        pub fn attempts(&self) -> u32 {
            self.game.attempts()
        }

        pub fn reset(&mut self) {
            self.game.reset(&mut self.rng);
        }
    }

    // ─── Paragraph cloze ────────────────────────────────────────────────────

    #[wasm_bindgen(js_name = "ClozeGame")]
    pub struct JsCloze {
        game: ClozeGame,
        rng: WasmRng,
    }

    #[wasm_bindgen(js_class = "ClozeGame")]
    impl JsCloze {
        #[wasm_bindgen(constructor)]
        pub fn new(paragraph: &str, seed: Option<u32>) -> Result<JsCloze, JsError> {
            let mut rng = rng_for(seed);
            let game = ClozeGame::new(paragraph, &mut rng).map_err(js_err)?;
            Ok(JsCloze { game, rng })
        }

        pub fn segments(&self) -> JsValue {
            to_js(self.game.segments())
        }

        pub fn bank(&self) -> JsValue {
            to_js(self.game.bank())
        }

        pub fn blank(&self, index: usize) -> Option<String> {
            self.game.blank(index).map(str::to_string)
        }

        /// `source` is `{ from: "bank", word }` or `{ from: "blank", index }`.
        #[wasm_bindgen(js_name = "dropWord")]
        pub fn drop_word(&mut self, source: JsValue, target: usize) -> Result<bool, JsError> {
            let source: DragSource = from_js(source)?;
            Ok(self.game.drop_word(source, target, &mut self.rng))
        }

        #[wasm_bindgen(js_name = "returnToBank")]
        pub fn return_to_bank(&mut self, index: usize) -> bool {
            self.game.return_to_bank(index, &mut self.rng)
        }

        pub fn check(&mut self) -> usize {
            self.game.check()
        }

        pub fn results(&self) -> JsValue {
            to_js(&self.game.results())
        }

        pub fn reset(&mut self) {
            self.game.reset(&mut self.rng);
        }
    }

    // ─── Quiz ───────────────────────────────────────────────────────────────

    #[wasm_bindgen(js_name = "QuizGame")]
    pub struct JsQuiz {
        session: QuizSession,
    }

    #[wasm_bindgen(js_class = "QuizGame")]
    impl JsQuiz {
        #[wasm_bindgen(constructor)]
        pub fn new(questions: JsValue) -> Result<JsQuiz, JsError> {
            let questions: Vec<QuizQuestion> = from_js(questions)?;
            let session = QuizSession::new(questions).map_err(js_err)?;
            Ok(JsQuiz { session })
        }

        pub fn current(&self) -> JsValue {
            to_js(self.session.current())
        }

        pub fn answer(&mut self, option: usize) -> JsValue {
            to_js(&self.session.answer(option))
        }

        pub fn next(&mut self) {
            self.session.next();
        }

        pub fn restart(&mut self) {
            self.session.restart();
        }

        pub fn score(&self) -> usize {
            self.session.score()
        }

        pub fn percentage(&self) -> u32 {
            self.session.percentage()
        }

        #[wasm_bindgen(js_name = "isFinished")]
        pub fn is_finished(&self) -> bool {
            self.session.is_finished()
        }
    }

    // ─── Flashcards ─────────────────────────────────────────────────────────

    #[wasm_bindgen(js_name = "FlashcardDeck")]
    pub struct JsFlashcards {
        deck: FlashcardDeck,
        storage: Option<LocalStorage>,
    }

    #[wasm_bindgen(js_class = "FlashcardDeck")]
    impl JsFlashcards {
        /// Ratings are loaded from `localStorage` when it is available.
        #[wasm_bindgen(constructor)]
        pub fn new(cards: JsValue) -> Result<JsFlashcards, JsError> {
            let cards: Vec<Flashcard> = from_js(cards)?;
            let storage = LocalStorage::open();
            let ratings = storage.as_ref().map(ConfidenceStore::load).unwrap_or_default();
            let deck = FlashcardDeck::new(cards, ratings).map_err(js_err)?;
            Ok(JsFlashcards { deck, storage })
        }

        pub fn current(&self) -> JsValue {
            to_js(self.deck.current())
        }

        pub fn index(&self) -> usize {
            self.deck.index()
        }

        #[wasm_bindgen(js_name = "isFlipped")]
        pub fn is_flipped(&self) -> bool {
            self.deck.is_flipped()
        }

        pub fn flip(&mut self) {
            self.deck.flip();
        }

        pub fn next(&mut self) {
            self.deck.next();
        }

        pub fn previous(&mut self) {
            self.deck.previous();
        }

        pub fn reset(&mut self) {
            self.deck.reset();
        }

        pub fn rating(&self) -> JsValue {
            to_js(&self.deck.rating())
        }

        /// `"know" | "learning" | "need-help"`, or `undefined` to clear.
        /// Persists immediately.
        pub fn rate(&mut self, rating: JsValue) -> Result<(), JsError> {
            let rating: Option<Confidence> = if rating.is_undefined() || rating.is_null() {
                None
            } else {
                Some(from_js(rating)?)
            };
            self.deck.rate(rating);
            if let Some(storage) = self.storage.as_mut() {
                self.deck.ratings().save(storage);
            }
            Ok(())
        }
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "lexiplay engine ready".to_string()
    }
}
