//! Request and response bodies for the quiz HTTP API.

use crate::instrument::ScaleInfo;
use crate::questions::QuestionSummary;
use crate::scoring::Answer;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `GET /` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

/// `GET /api/questions` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionSummary>,
    pub scale: ScaleInfo,
}

/// `POST /api/submit` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<Answer>,
    /// Free-form client metadata; missing or null becomes an empty object
    #[serde(default, deserialize_with = "null_as_empty")]
    pub meta: Map<String, Value>,
}

/// Error body for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}
