//! Question bank for the attachment quiz.
//!
//! Items are adapted from the ECR-R anxiety and avoidance dimensions and are
//! worded neutrally so the instrument stays blind: the factor an item loads on
//! is never sent to respondents.

use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dimension a question loads on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Anxiety,
    Avoidance,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Anxiety => "anxiety",
            Factor::Avoidance => "avoidance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub factor: Factor,
}

impl Question {
    pub fn new(id: &str, text: &str, factor: Factor) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            factor,
        }
    }
}

/// Client-facing view of a question (no factor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: String,
    pub text: String,
}

/// Reference ECR-R item set: (id, text, factor)
const ECR_R_ITEMS: &[(&str, &str, Factor)] = &[
    // Avoidance
    ("A1", "I prefer not to show a partner how I feel deep down.", Factor::Avoidance),
    ("A2", "I find it difficult to depend on close others.", Factor::Avoidance),
    ("A3", "I don't feel comfortable opening up to romantic partners.", Factor::Avoidance),
    ("A4", "I prefer not to be too close to others.", Factor::Avoidance),
    ("A5", "It's important for me to feel independent from others.", Factor::Avoidance),
    ("A6", "I want to get close, but I keep people at arm’s length.", Factor::Avoidance),
    // Anxiety
    ("X1", "I worry about being abandoned.", Factor::Anxiety),
    ("X2", "I often worry my partner doesn't really love me.", Factor::Anxiety),
    ("X3", "I need a lot of reassurance from close others.", Factor::Anxiety),
    ("X4", "I worry that romantic partners won’t care as much as I do.", Factor::Anxiety),
    ("X5", "I get frustrated if I don't get the closeness I want.", Factor::Anxiety),
    ("X6", "I fear being alone more than most people.", Factor::Anxiety),
];

/// Immutable, ordered set of questions with an id index.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    index: HashMap<String, usize>,
}

impl QuestionBank {
    /// Build a bank from an ordered question list. Ids must be unique.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        let mut index = HashMap::with_capacity(questions.len());
        for (pos, q) in questions.iter().enumerate() {
            if index.insert(q.id.clone(), pos).is_some() {
                return Err(QuizError::DuplicateQuestionId(q.id.clone()));
            }
        }
        Ok(Self { questions, index })
    }

    /// The twelve-item reference bank (six items per factor)
    pub fn ecr_r() -> Self {
        let questions = ECR_R_ITEMS
            .iter()
            .map(|(id, text, factor)| Question::new(id, text, *factor))
            .collect();
        Self::new(questions).unwrap_or_else(|e| unreachable!("reference bank is unique: {e}"))
    }

    pub fn lookup(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|&pos| &self.questions[pos])
    }

    /// Questions in bank order, without their factor
    pub fn list_questions(&self) -> Vec<QuestionSummary> {
        self.questions
            .iter()
            .map(|q| QuestionSummary {
                id: q.id.clone(),
                text: q.text.clone(),
            })
            .collect()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions loading on the given factor
    pub fn count_for(&self, factor: Factor) -> usize {
        self.questions.iter().filter(|q| q.factor == factor).count()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::ecr_r()
    }
}
