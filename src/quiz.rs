//! Multiple-choice quiz: one locked-in answer per question, then advance.

use serde::Serialize;

use crate::content::QuizQuestion;
use crate::error::GenerationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerOutcome {
    Ignored,
    Correct,
    Incorrect { correct_index: usize },
}

pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    index: usize,
    selection: Option<usize>,
    score: usize,
    finished: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, GenerationError> {
        if questions.is_empty() {
            return Err(GenerationError::InsufficientInput { required: 1, found: 0 });
        }
        Ok(Self {
            questions,
            index: 0,
            selection: None,
            score: 0,
            finished: false,
        })
    }

    pub fn current(&self) -> &QuizQuestion {
        &self.questions[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Rounded percentage of correct answers.
    pub fn percentage(&self) -> u32 {
        ((self.score as f64 / self.questions.len() as f64) * 100.0).round() as u32
    }

    /// Lock in an option. Only the first answer to a question counts.
    pub fn answer(&mut self, option: usize) -> AnswerOutcome {
        if self.finished || self.selection.is_some() || option >= self.current().options.len() {
            return AnswerOutcome::Ignored;
        }
        self.selection = Some(option);

        let correct_index = self.current().correct_index;
        if option == correct_index {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect { correct_index }
        }
    }

    /// Move to the next question, or finish after the last one.
    pub fn next(&mut self) {
        if self.finished {
            return;
        }
        if self.index + 1 == self.questions.len() {
            self.finished = true;
            return;
        }
        self.index += 1;
        self.selection = None;
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.selection = None;
        self.score = 0;
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(word: &str, correct_index: usize) -> QuizQuestion {
        QuizQuestion {
            question: format!("What does {} mean?", word),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index,
            word: word.into(),
        }
    }

    #[test]
    fn test_scoring_and_finish() {
        let questions = vec![question("lucid", 1), question("aloof", 2), question("wary", 0)];
        let mut quiz = QuizSession::new(questions).unwrap();

        assert_eq!(quiz.answer(1), AnswerOutcome::Correct);
        assert_eq!(quiz.answer(0), AnswerOutcome::Ignored);
        quiz.next();

        assert_eq!(quiz.answer(3), AnswerOutcome::Incorrect { correct_index: 2 });
        quiz.next();

        assert_eq!(quiz.answer(9), AnswerOutcome::Ignored);
        assert_eq!(quiz.answer(0), AnswerOutcome::Correct);
        quiz.next();

        assert!(quiz.is_finished());
        assert_eq!(quiz.score(), 2);
        assert_eq!(quiz.percentage(), 67);

        quiz.restart();
        assert_eq!(quiz.index(), 0);
        assert_eq!(quiz.score(), 0);
        assert!(!quiz.is_finished());
    }

    #[test]
    fn test_empty_quiz() {
        assert!(QuizSession::new(vec![]).is_err());
    }
}
