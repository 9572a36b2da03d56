//! Attachment Common - question bank, scoring and classification for the
//! attachment style quiz.
//!
//! Pure domain logic. No I/O; persistence and transport live in `attachmentd`.

pub mod api;
pub mod classifier;
pub mod error;
pub mod instrument;
pub mod questions;
pub mod result;
pub mod scoring;

pub use api::{ErrorBody, QuestionsResponse, StatusMessage, SubmitRequest};
pub use classifier::{classify, AttachmentStyle, Classification, THRESHOLD};
pub use error::QuizError;
pub use instrument::{research_info, scale_info, ResearchInfo, ResearchSource, ScaleInfo};
pub use questions::{Factor, Question, QuestionBank, QuestionSummary};
pub use result::{assemble, round2, QuizResult, SubmitResponse, EXPLANATION, RESULT_COLLECTION};
pub use scoring::{aggregate, Answer, FactorScores};
