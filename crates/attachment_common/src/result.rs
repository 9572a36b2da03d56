//! Result assembly.
//!
//! `QuizResult` is the full-precision record handed to persistence.
//! `SubmitResponse` is what the respondent sees, with scores rounded to two
//! decimals. The two are deliberately kept apart: only the response is rounded.

use crate::classifier::{AttachmentStyle, Classification};
use crate::scoring::Answer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fixed explanation attached to every response
pub const EXPLANATION: &str = "Scores are computed on two dimensions (anxiety and avoidance) derived from the validated ECR-R measure.";

/// Collection name quiz results are stored under
pub const RESULT_COLLECTION: &str = "quizresult";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub answers: Vec<Answer>,
    pub anxiety_score: f64,
    pub avoidance_score: f64,
    pub style: AttachmentStyle,
    pub prevalence: String,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

/// Build the persistable record. No validation happens here.
pub fn assemble(
    answers: Vec<Answer>,
    anxiety_score: f64,
    avoidance_score: f64,
    classification: Classification,
    meta: Map<String, Value>,
) -> QuizResult {
    QuizResult {
        answers,
        anxiety_score,
        avoidance_score,
        style: classification.style,
        prevalence: classification.prevalence,
        recommendations: classification.recommendations,
        meta,
    }
}

/// Caller-facing submission response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub style: AttachmentStyle,
    pub anxiety_score: f64,
    pub avoidance_score: f64,
    pub prevalence: String,
    pub recommendations: Vec<String>,
    pub explanation: String,
}

impl SubmitResponse {
    pub fn from_result(result: &QuizResult) -> Self {
        Self {
            style: result.style,
            anxiety_score: round2(result.anxiety_score),
            avoidance_score: round2(result.avoidance_score),
            prevalence: result.prevalence.clone(),
            recommendations: result.recommendations.clone(),
            explanation: EXPLANATION.to_string(),
        }
    }
}

/// Round to two decimals.
///
/// Rounds the exact decimal value of `value`, so 1.075 (stored just below
/// the tie) gives 1.07 and exact binary ties such as 4.125 go to even.
/// Scaling by 100 first would introduce its own rounding error.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    fn sample(anxiety: f64, avoidance: f64) -> QuizResult {
        let mut meta = Map::new();
        meta.insert("source".to_string(), Value::String("web".to_string()));
        assemble(
            vec![Answer::new("X1", 5.0)],
            anxiety,
            avoidance,
            classify(anxiety, avoidance),
            meta,
        )
    }

    #[test]
    fn test_assemble_copies_classification() {
        let result = sample(14.0 / 3.0, 2.0);
        assert_eq!(result.style, AttachmentStyle::Anxious);
        assert_eq!(result.prevalence, "~20%");
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.meta["source"], "web");
    }

    #[test]
    fn test_record_keeps_full_precision() {
        let result = sample(14.0 / 3.0, 2.0);
        assert_eq!(result.anxiety_score, 14.0 / 3.0);
    }

    #[test]
    fn test_response_is_rounded() {
        let result = sample(14.0 / 3.0, 1.0 / 3.0);
        let response = SubmitResponse::from_result(&result);
        assert_eq!(response.anxiety_score, 4.67);
        assert_eq!(response.avoidance_score, 0.33);
        assert_eq!(response.explanation, EXPLANATION);
        assert_eq!(response.style, result.style);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(4.666_666_666), 4.67);
        assert_eq!(round2(3.994), 3.99);
        // Exact binary ties go to even
        assert_eq!(round2(4.125), 4.12);
        assert_eq!(round2(4.375), 4.38);
    }

    #[test]
    fn test_round2_uses_exact_decimal_value() {
        // Each of these sits just off a tie in binary; x * 100 lands on the
        // wrong side of it
        assert_eq!(round2(7.215), 7.21);
        assert_eq!(round2(1.075), 1.07);
        assert_eq!(round2(0.025), 0.03);
    }

    #[test]
    fn test_round2_integer_means() {
        // Means reachable through repeated answers
        assert_eq!(round2(1443.0 / 200.0), 7.21);
        assert_eq!(round2(43.0 / 40.0), 1.07);
        assert_eq!(round2(1.0 / 40.0), 0.03);
    }

    #[test]
    fn test_response_json_contract() {
        let response = SubmitResponse::from_result(&sample(2.0, 2.0));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["style"], "Secure");
        assert_eq!(json["anxiety_score"], 2.0);
        assert_eq!(json["avoidance_score"], 2.0);
        assert_eq!(json["prevalence"], "~50% of adults in community samples");
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
        assert!(json["explanation"].as_str().unwrap().contains("ECR-R"));
    }

    #[test]
    fn test_result_json_uses_style_label() {
        let json = serde_json::to_value(sample(5.0, 5.0)).unwrap();
        assert_eq!(json["style"], "Fearful-Avoidant (Disorganized)");
        assert_eq!(json["answers"][0]["question_id"], "X1");
    }
}
