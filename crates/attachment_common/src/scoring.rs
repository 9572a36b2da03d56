//! Score aggregation.
//!
//! Reduces a list of answers to one mean score per factor.

use crate::error::QuizError;
use crate::instrument::{in_scale, SCALE_MAX, SCALE_MIN};
use crate::questions::{Factor, QuestionBank};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One submitted rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub score: f64,
}

impl Answer {
    pub fn new(question_id: &str, score: f64) -> Self {
        Self {
            question_id: question_id.to_string(),
            score,
        }
    }
}

/// Mean score per factor, full precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub anxiety: f64,
    pub avoidance: f64,
}

#[derive(Debug, Default)]
struct Bucket {
    sum: f64,
    count: usize,
}

impl Bucket {
    fn push(&mut self, score: f64) {
        self.sum += score;
        self.count += 1;
    }

    /// Mean of the bucket; an empty bucket scores 0
    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Aggregate answers into per-factor means.
///
/// Every answer must reference a question in `bank`; the first unknown id
/// aborts the whole aggregation. Answers are summed in input order. Repeated
/// answers to the same question each count. Ratings outside the published
/// scale are accepted as-is and only logged.
pub fn aggregate(bank: &QuestionBank, answers: &[Answer]) -> Result<FactorScores, QuizError> {
    let mut anxiety = Bucket::default();
    let mut avoidance = Bucket::default();

    for answer in answers {
        let question = bank
            .lookup(&answer.question_id)
            .ok_or_else(|| QuizError::UnknownQuestionId(answer.question_id.clone()))?;

        if !in_scale(answer.score) {
            warn!(
                "Score {} for {} is outside the {}-{} scale",
                answer.score, answer.question_id, SCALE_MIN, SCALE_MAX
            );
        }

        match question.factor {
            Factor::Anxiety => anxiety.push(answer.score),
            Factor::Avoidance => avoidance.push(answer.score),
        }
    }

    Ok(FactorScores {
        anxiety: anxiety.mean(),
        avoidance: avoidance.mean(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::Question;

    fn answers(pairs: &[(&str, f64)]) -> Vec<Answer> {
        pairs.iter().map(|(id, s)| Answer::new(id, *s)).collect()
    }

    #[test]
    fn test_mean_per_factor() {
        let bank = QuestionBank::ecr_r();
        let scores = aggregate(&bank, &answers(&[("X1", 6.0), ("X2", 4.0), ("X3", 2.0)])).unwrap();
        assert_eq!(scores.anxiety, 4.0);
        assert_eq!(scores.avoidance, 0.0);
    }

    #[test]
    fn test_factors_are_independent() {
        let bank = QuestionBank::ecr_r();
        let scores = aggregate(
            &bank,
            &answers(&[("A1", 7.0), ("X1", 1.0), ("A2", 5.0), ("X2", 2.0)]),
        )
        .unwrap();
        assert_eq!(scores.avoidance, 6.0);
        assert_eq!(scores.anxiety, 1.5);
    }

    #[test]
    fn test_empty_answers_score_zero() {
        let bank = QuestionBank::ecr_r();
        let scores = aggregate(&bank, &[]).unwrap();
        assert_eq!(scores.anxiety, 0.0);
        assert_eq!(scores.avoidance, 0.0);
        assert!(!scores.anxiety.is_nan());
    }

    #[test]
    fn test_unknown_id_aborts() {
        let bank = QuestionBank::ecr_r();
        let err = aggregate(&bank, &answers(&[("X1", 3.0), ("Z9", 4.0), ("A1", 2.0)])).unwrap_err();
        assert_eq!(err, QuizError::UnknownQuestionId("Z9".to_string()));
    }

    #[test]
    fn test_order_does_not_change_result() {
        let bank = QuestionBank::ecr_r();
        let forward = answers(&[("X1", 1.0), ("A3", 6.0), ("X4", 5.0), ("A5", 3.0)]);
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            aggregate(&bank, &forward).unwrap(),
            aggregate(&bank, &reversed).unwrap()
        );
    }

    #[test]
    fn test_repeated_answers_each_count() {
        let bank = QuestionBank::ecr_r();
        let scores = aggregate(&bank, &answers(&[("X1", 7.0), ("X1", 1.0), ("X1", 1.0)])).unwrap();
        assert_eq!(scores.anxiety, 3.0);
    }

    #[test]
    fn test_out_of_scale_scores_participate() {
        let bank = QuestionBank::ecr_r();
        let scores = aggregate(&bank, &answers(&[("A1", 0.0), ("A2", 99.0)])).unwrap();
        assert_eq!(scores.avoidance, 49.5);
    }

    #[test]
    fn test_thirds_keep_full_precision() {
        let bank = QuestionBank::ecr_r();
        let scores = aggregate(&bank, &answers(&[("X1", 5.0), ("X2", 5.0), ("X3", 4.0)])).unwrap();
        approx::assert_relative_eq!(scores.anxiety, 14.0 / 3.0);
    }

    #[test]
    fn test_custom_bank_aggregation() {
        let bank = QuestionBank::new(vec![
            Question::new("p", "p", Factor::Avoidance),
            Question::new("q", "q", Factor::Anxiety),
        ])
        .unwrap();
        let scores = aggregate(&bank, &answers(&[("p", 2.0), ("q", 5.0)])).unwrap();
        assert_eq!(scores, FactorScores { anxiety: 5.0, avoidance: 2.0 });
        assert!(aggregate(&bank, &answers(&[("A1", 2.0)])).is_err());
    }
}
