//! Wire DTOs for the admin survey API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Client-local
//! identifiers never appear here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::QuestionType;

/// Body of `POST /api/admin/save-survey`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyPayload {
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub questions: Vec<QuestionPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub question_text: String,
    pub question_type: QuestionType,
    pub required: bool,
    /// Empty for open-ended questions.
    pub options: Vec<OptionPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionPayload {
    pub option_text: String,
    pub option_value: i64,
}

/// A survey as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSurvey {
    pub id: Uuid,
    #[serde(flatten)]
    pub survey: SurveyPayload,
}
