use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum QuestionSourceError {
    #[error("Pack not found: {0}")]
    PackNotFound(String),

    #[error("Invalid question record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum AnswerChoice {
    A,
    B,
    C,
    D,
}

impl fmt::Display for AnswerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            AnswerChoice::A => "A",
            AnswerChoice::B => "B",
            AnswerChoice::C => "C",
            AnswerChoice::D => "D",
        };
        f.write_str(letter)
    }
}

/// One validated question as delivered by the question bank
///
/// Every field is required; deserializing a record that lacks one fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "Question ID")]
    pub question_id: String,
    #[serde(rename = "Question Text")]
    pub question_text: String,
    #[serde(rename = "Option A")]
    pub option_a: String,
    #[serde(rename = "Option B")]
    pub option_b: String,
    #[serde(rename = "Option C")]
    pub option_c: String,
    #[serde(rename = "Option D")]
    pub option_d: String,
    #[serde(rename = "Correct Answer")]
    pub correct_answer: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: String,
}

impl QuestionRecord {
    pub fn option(&self, choice: AnswerChoice) -> &str {
        match choice {
            AnswerChoice::A => &self.option_a,
            AnswerChoice::B => &self.option_b,
            AnswerChoice::C => &self.option_c,
            AnswerChoice::D => &self.option_d,
        }
    }

    /// `Correct Answer` may hold the option letter or the option text
    pub fn correct_choice(&self) -> Option<AnswerChoice> {
        let answer = self.correct_answer.trim();
        AnswerChoice::iter()
            .find(|choice| answer.eq_ignore_ascii_case(&choice.to_string()))
            .or_else(|| {
                AnswerChoice::iter()
                    .find(|choice| self.option(*choice).trim().eq_ignore_ascii_case(answer))
            })
    }

    pub fn is_correct(&self, choice: AnswerChoice) -> bool {
        self.correct_choice() == Some(choice)
    }
}

/// Trait for the question bank loader
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn load_questions(&self, pack_name: &str)
        -> Result<Vec<QuestionRecord>, QuestionSourceError>;
}

/// Question packs held in memory, for development and testing
#[derive(Debug, Default, Clone)]
pub struct InMemoryQuestionSource {
    packs: HashMap<String, Vec<QuestionRecord>>,
}

impl InMemoryQuestionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pack(mut self, pack_name: &str, questions: Vec<QuestionRecord>) -> Self {
        self.packs.insert(pack_name.to_string(), questions);
        self
    }

    /// Adds a pack from a JSON array of question records
    pub fn with_json_pack(self, pack_name: &str, json: &str) -> Result<Self, QuestionSourceError> {
        let questions: Vec<QuestionRecord> = serde_json::from_str(json)?;
        Ok(self.with_pack(pack_name, questions))
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    #[instrument(skip(self))]
    async fn load_questions(
        &self,
        pack_name: &str,
    ) -> Result<Vec<QuestionRecord>, QuestionSourceError> {
        let questions = self
            .packs
            .get(pack_name)
            .cloned()
            .ok_or_else(|| QuestionSourceError::PackNotFound(pack_name.to_string()))?;

        debug!(pack_name, count = questions.len(), "Loaded question pack");
        Ok(questions)
    }
}
