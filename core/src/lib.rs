//! Survey builder core for the alumni-association admin pages.
//!
//! # Overview
//! `SurveyDraftEditor` owns an in-memory survey draft and applies discrete
//! user actions to it: editing survey fields, adding and removing questions
//! and options, switching question types. It tracks duplicate option values
//! per question and gates saving on them.
//!
//! # Design
//! - No I/O. Saving follows the host-does-IO pattern: the editor produces an
//!   `HttpRequest` through `SurveyClient`, the host executes it, and the
//!   result is handed back to `finish_save`.
//! - Client-local ids (`QuestionId`, `OptionId`) never reach the wire.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod alert;
pub mod client;
pub mod draft;
pub mod editor;
pub mod error;
pub mod http;
pub mod payload;
pub mod types;
pub mod validation;

pub use alert::{Alert, Severity};
pub use client::SurveyClient;
pub use draft::{OptionId, OptionValue, Question, QuestionId, QuestionType, SurveyDraft, SurveyOption};
pub use editor::{
    EditAction, EditorPhase, Navigation, OptionField, QuestionField, SaveOutcome, SurveyDraftEditor, SurveyField,
};
pub use error::{ApiError, EditError, PayloadError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{OptionPayload, QuestionPayload, SavedSurvey, SurveyPayload};
pub use validation::DuplicateOptionValue;
