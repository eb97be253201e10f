//! In-memory survey draft: the value the editor mutates before it is saved.
//!
//! # Design
//! Identifiers are client-local `Uuid`s generated at creation time. They key
//! list rows and the per-question error map but never leave the process;
//! `payload` strips them before anything is sent to the server.
//!
//! Option values keep the raw text they were entered with. A value selector
//! hands back strings, so coercion to an integer happens only when the draft
//! is serialized.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-local identifier of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(Uuid);

impl QuestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-local identifier of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(Uuid);

impl OptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// What kind of answer a question collects. Determines whether its options
/// mean anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuestionType {
    #[default]
    #[serde(rename = "Open-ended")]
    OpenEnded,
    #[serde(rename = "Multiple Choice")]
    MultipleChoice,
    #[serde(rename = "Rating")]
    Rating,
}

const RATING_LABELS: [&str; 5] = ["Poorly", "Unsatisfied", "Neutral", "Satisfied", "Very Satisfied"];

impl QuestionType {
    /// Wire label used by the save endpoint.
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::OpenEnded => "Open-ended",
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::Rating => "Rating",
        }
    }

    pub fn has_options(self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::Rating)
    }

    /// Options a question receives when switched to this type. Always a full
    /// replacement set with fresh ids.
    pub fn default_options(self) -> Vec<SurveyOption> {
        match self {
            QuestionType::OpenEnded => Vec::new(),
            QuestionType::MultipleChoice => vec![SurveyOption::new("1st option", 1i64)],
            QuestionType::Rating => RATING_LABELS
                .iter()
                .zip(1i64..)
                .map(|(label, value)| SurveyOption::new(*label, value))
                .collect(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown question type: {0:?}")]
pub struct UnknownQuestionType(pub String);

impl FromStr for QuestionType {
    type Err = UnknownQuestionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open-ended" => Ok(QuestionType::OpenEnded),
            "Multiple Choice" => Ok(QuestionType::MultipleChoice),
            "Rating" => Ok(QuestionType::Rating),
            other => Err(UnknownQuestionType(other.to_string())),
        }
    }
}

/// An option value as stored in the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionValue(String);

/// Equality key for duplicate detection: `"2"`, `" 2"` and `2` collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValueKey {
    Int(i64),
    Raw(String),
}

impl OptionValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn as_int(&self) -> Result<i64, ParseIntError> {
        self.0.trim().parse()
    }

    pub(crate) fn key(&self) -> ValueKey {
        match self.as_int() {
            Ok(n) => ValueKey::Int(n),
            Err(_) => ValueKey::Raw(self.0.trim().to_string()),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for OptionValue {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for OptionValue {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurveyOption {
    pub id: OptionId,
    pub text: String,
    pub value: OptionValue,
}

impl SurveyOption {
    pub fn new(text: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            id: OptionId::new(),
            text: text.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub kind: QuestionType,
    pub required: bool,
    /// Empty whenever `kind` is `OpenEnded`.
    pub options: Vec<SurveyOption>,
}

impl Question {
    /// A blank open-ended question with a fresh id.
    pub fn new() -> Self {
        Self {
            id: QuestionId::new(),
            text: String::new(),
            kind: QuestionType::OpenEnded,
            required: false,
            options: Vec::new(),
        }
    }
}

impl Default for Question {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyDraft {
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_defaults_have_fixed_labels_and_values() {
        let options = QuestionType::Rating.default_options();
        let labels: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
        let values: Vec<i64> = options.iter().map(|o| o.value.as_int().unwrap()).collect();
        assert_eq!(labels, RATING_LABELS);
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn multiple_choice_default_is_single_option() {
        let options = QuestionType::MultipleChoice.default_options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].text, "1st option");
        assert_eq!(options[0].value.as_int().unwrap(), 1);
    }

    #[test]
    fn open_ended_has_no_default_options() {
        assert!(QuestionType::OpenEnded.default_options().is_empty());
        assert!(!QuestionType::OpenEnded.has_options());
    }

    #[test]
    fn question_type_parses_wire_labels() {
        for kind in [QuestionType::OpenEnded, QuestionType::MultipleChoice, QuestionType::Rating] {
            assert_eq!(kind.label().parse::<QuestionType>().unwrap(), kind);
        }
        assert!("Essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn question_type_serializes_to_wire_label() {
        let json = serde_json::to_value(QuestionType::MultipleChoice).unwrap();
        assert_eq!(json, "Multiple Choice");
    }

    #[test]
    fn option_value_key_ignores_representation() {
        assert_eq!(OptionValue::new(" 2").key(), OptionValue::from(2i64).key());
        assert_ne!(OptionValue::new("two").key(), OptionValue::from(2i64).key());
    }

    #[test]
    fn ids_serialize_as_bare_uuids() {
        let id = QuestionId::new();
        let json = serde_json::to_value(id).unwrap();
        assert!(json.is_string());
        assert_eq!(serde_json::from_value::<QuestionId>(json).unwrap(), id);
        assert!(serde_json::to_value(OptionId::new()).unwrap().is_string());
    }

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(Question::new().id, Question::new().id);
        assert_ne!(OptionId::new(), OptionId::new());
    }
}
