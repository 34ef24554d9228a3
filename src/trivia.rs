//! Trivia questions asked when a shield pickup is collected
//!
//! The question UI belongs to the host; the simulation only picks a question
//! and blocks on [`TriviaPrompt::ask`] for the answer.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of options every question carries
pub const OPTION_COUNT: usize = 3;

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    /// Index into `options`
    pub correct: usize,
}

impl TriviaQuestion {
    pub fn new(question: &str, options: [&str; OPTION_COUNT], correct: usize) -> Self {
        Self {
            question: question.to_string(),
            options: options.map(str::to_string),
            correct,
        }
    }

    /// Check a 0-based choice
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct
    }
}

/// Blocking question UI. Implementations run their own input loop until one
/// of the options is chosen.
pub trait TriviaPrompt {
    /// Returns whether the player picked the correct option
    fn ask(&mut self, question: &TriviaQuestion) -> bool;
}

impl<F: FnMut(&TriviaQuestion) -> bool> TriviaPrompt for F {
    fn ask(&mut self, question: &TriviaQuestion) -> bool {
        self(question)
    }
}

/// Prompt that always picks the same option (headless runs)
#[derive(Debug, Clone, Copy)]
pub struct FixedChoice(pub usize);

impl TriviaPrompt for FixedChoice {
    fn ask(&mut self, question: &TriviaQuestion) -> bool {
        log::debug!("Trivia: {} -> option {}", question.question, self.0 + 1);
        question.is_correct(self.0)
    }
}

/// Pool of questions to draw from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub questions: Vec<TriviaQuestion>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: vec![
                TriviaQuestion::new(
                    "What does 'phishing' mean?",
                    [
                        "A scam to steal personal info",
                        "A type of fish",
                        "A network protocol",
                    ],
                    0,
                ),
                TriviaQuestion::new(
                    "What is a firewall?",
                    [
                        "Blocks unauthorized access",
                        "A wall that prevents fires",
                        "A type of computer virus",
                    ],
                    0,
                ),
                TriviaQuestion::new(
                    "What is a 'VPN' used for?",
                    [
                        "Encrypting your connection",
                        "A type of virus scan",
                        "To speed up your PC",
                    ],
                    0,
                ),
            ],
        }
    }
}

impl QuestionBank {
    /// Uniformly pick a question (None when the bank is empty)
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&TriviaQuestion> {
        if self.questions.is_empty() {
            return None;
        }
        self.questions.get(rng.random_range(0..self.questions.len()))
    }
}
