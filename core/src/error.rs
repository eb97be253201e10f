//! Error types for the survey editor and its API client.
//!
//! # Design
//! Two failure families reach the user: duplicate option values (see
//! `validation`) and save failures. Everything here is recoverable within
//! the editing session; nothing is fatal.

use thiserror::Error;

use crate::draft::QuestionType;
use crate::editor::EditorPhase;

/// Errors returned by `SurveyClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the bearer token.
    #[error("unauthorized")]
    Unauthorized,

    /// The server returned a status other than the one the operation expects.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// The host could not complete the round-trip (DNS, connection reset, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// The draft cannot be turned into a transport payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("question {question_number}, option {option_number}: {raw:?} is not an integer")]
    InvalidOptionValue {
        question_number: usize,
        option_number: usize,
        raw: String,
    },
}

impl PayloadError {
    /// Message pushed to the alert surface when a save is refused.
    pub fn alert_message(&self) -> String {
        match self {
            PayloadError::InvalidOptionValue {
                question_number,
                option_number,
                ..
            } => format!("Option {option_number} in Question {question_number} needs a whole-number value"),
        }
    }
}

/// Errors returned by `SurveyDraftEditor` operations. A failed operation
/// leaves the draft untouched.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("no question at index {index} (draft has {len})")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("question {question} has no option at index {index} (it has {len})")]
    OptionOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },

    #[error("question {question} is {kind} and takes no options")]
    NoOptions { question: usize, kind: QuestionType },

    #[error("a save is in flight")]
    SaveInFlight,

    #[error("editor is closed ({0:?})")]
    Closed(EditorPhase),

    #[error("{count} question(s) have duplicate option values")]
    ValidationPending { count: usize },

    #[error("no save is in flight")]
    NoSaveInFlight,

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
