//! Quiz submission pipeline.
//!
//! answers -> aggregate -> classify -> assemble -> store (best-effort) -> response

use crate::store::{ResultStore, StoreError};
use attachment_common::{
    aggregate, assemble, classify, QuestionBank, QuizError, QuizResult, SubmitRequest,
    SubmitResponse, RESULT_COLLECTION,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Scores submissions and hands the results to persistence
#[derive(Clone)]
pub struct QuizService {
    bank: Arc<QuestionBank>,
    store: Arc<dyn ResultStore>,
}

impl QuizService {
    pub fn new(bank: Arc<QuestionBank>, store: Arc<dyn ResultStore>) -> Self {
        Self { bank, store }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Score a submission without persisting it
    pub fn evaluate(&self, request: SubmitRequest) -> Result<QuizResult, QuizError> {
        let scores = aggregate(&self.bank, &request.answers)?;
        let classification = classify(scores.anxiety, scores.avoidance);
        Ok(assemble(
            request.answers,
            scores.anxiety,
            scores.avoidance,
            classification,
            request.meta,
        ))
    }

    /// Score, store and build the response.
    ///
    /// Only scoring errors reach the caller. A failed store is logged and the
    /// computed response is returned unchanged.
    pub async fn submit(&self, request: SubmitRequest) -> Result<SubmitResponse, QuizError> {
        let result = self.evaluate(request)?;
        let response = SubmitResponse::from_result(&result);
        info!(
            "Classified submission as {} (anxiety={:.2}, avoidance={:.2})",
            result.style, result.anxiety_score, result.avoidance_score
        );

        if let Err(e) = self.persist(result).await {
            warn!("Quiz result not persisted: {}", e);
        }

        Ok(response)
    }

    async fn persist(&self, result: QuizResult) -> Result<String, StoreError> {
        let store = Arc::clone(&self.store);
        let id = tokio::task::spawn_blocking(move || store.store(RESULT_COLLECTION, &result))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;
        info!("Stored quiz result {}", id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DisabledStore;
    use attachment_common::{Answer, AttachmentStyle};
    use serde_json::{Map, Value};
    use std::sync::Mutex;

    /// Records every store call
    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<(String, QuizResult)>>,
    }

    impl ResultStore for RecordingStore {
        fn store(&self, collection: &str, record: &QuizResult) -> Result<String, StoreError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((collection.to_string(), record.clone()));
            Ok(format!("doc-{}", calls.len()))
        }
    }

    fn request(pairs: &[(&str, f64)]) -> SubmitRequest {
        SubmitRequest {
            answers: pairs.iter().map(|(id, s)| Answer::new(id, *s)).collect(),
            meta: Map::new(),
        }
    }

    fn all_items(score: f64) -> SubmitRequest {
        let bank = QuestionBank::ecr_r();
        SubmitRequest {
            answers: bank
                .questions()
                .iter()
                .map(|q| Answer::new(&q.id, score))
                .collect(),
            meta: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_all_twos_is_secure() {
        let store = Arc::new(RecordingStore::default());
        let service = QuizService::new(Arc::new(QuestionBank::ecr_r()), store.clone());

        let response = service.submit(all_items(2.0)).await.unwrap();
        assert_eq!(response.style, AttachmentStyle::Secure);
        assert_eq!(response.anxiety_score, 2.0);
        assert_eq!(response.avoidance_score, 2.0);
        assert_eq!(response.prevalence, "~50% of adults in community samples");

        let calls = store.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "quizresult");
        assert_eq!(calls[0].1.answers.len(), 12);
    }

    #[tokio::test]
    async fn test_unknown_id_skips_store() {
        let store = Arc::new(RecordingStore::default());
        let service = QuizService::new(Arc::new(QuestionBank::ecr_r()), store.clone());

        let err = service
            .submit(request(&[("X1", 5.0), ("Z9", 3.0)]))
            .await
            .unwrap_err();
        assert_eq!(err, QuizError::UnknownQuestionId("Z9".to_string()));
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_does_not_change_response() {
        let service = QuizService::new(Arc::new(QuestionBank::ecr_r()), Arc::new(DisabledStore));
        let response = service
            .submit(request(&[("X1", 5.0), ("X2", 5.0), ("X3", 4.0)]))
            .await
            .unwrap();
        assert_eq!(response.anxiety_score, 4.67);
        assert_eq!(response.avoidance_score, 0.0);
        assert_eq!(response.style, AttachmentStyle::Anxious);
    }

    #[tokio::test]
    async fn test_stored_record_keeps_precision_and_meta() {
        let store = Arc::new(RecordingStore::default());
        let service = QuizService::new(Arc::new(QuestionBank::ecr_r()), store.clone());
        let mut req = request(&[("A1", 5.0), ("A2", 5.0), ("A3", 4.0)]);
        req.meta.insert("campaign".to_string(), Value::String("spring".to_string()));

        let response = service.submit(req).await.unwrap();
        assert_eq!(response.avoidance_score, 4.67);

        let calls = store.calls.lock().unwrap();
        let stored = &calls[0].1;
        assert_eq!(stored.avoidance_score, 14.0 / 3.0);
        assert_eq!(stored.meta["campaign"], "spring");
        assert_eq!(stored.style, AttachmentStyle::Avoidant);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let service = QuizService::new(Arc::new(QuestionBank::ecr_r()), Arc::new(DisabledStore));
        let a = service.evaluate(all_items(4.0)).unwrap();
        let b = service.evaluate(all_items(4.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.style, AttachmentStyle::FearfulAvoidant);
    }
}
