//! Survey draft editor: owns one draft and applies user actions to it.
//!
//! # Design
//! Every user action is a synchronous transition on an owned
//! `SurveyDraftEditor`, available both as a method and as an `EditAction`
//! passed to `apply`. Saving is the only step that crosses an I/O boundary
//! and is split in two: `begin_save` hands the host an `HttpRequest` and
//! locks the draft, `finish_save` settles it with whatever the host got back.
//!
//! Duplicate option values are re-checked only when an option value is
//! edited or an option is deleted. Adding options or editing option text
//! leaves the error map alone.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::alert::{Alert, Severity};
use crate::client::SurveyClient;
use crate::draft::{OptionValue, Question, QuestionId, QuestionType, SurveyDraft, SurveyOption};
use crate::error::{EditError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{SavedSurvey, SurveyPayload};
use crate::validation::{self, DuplicateOptionValue};

pub const SAVED_MESSAGE: &str = "Survey saved successfully!";
pub const REJECTED_MESSAGE: &str = "Failed to save survey. Please try again.";
pub const TRANSPORT_FAILED_MESSAGE: &str = "Error saving survey. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    #[default]
    Editing,
    /// A save request is out; mutations are refused until it settles.
    Saving,
    Saved,
    Discarded,
}

/// Where the page shell should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    SurveyFeedbackList,
}

impl Navigation {
    pub fn path(self) -> &'static str {
        match self {
            Navigation::SurveyFeedbackList => "/admin/survey-feedback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurveyField {
    Title(String),
    Description(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionField {
    Text(String),
    /// Replaces the question's options with the type's default set.
    Type(QuestionType),
    Required(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionField {
    Text(String),
    Value(OptionValue),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    SetField(SurveyField),
    AddQuestion,
    DeleteQuestion(usize),
    SetQuestionField { question: usize, field: QuestionField },
    AddOption(usize),
    SetOptionField { question: usize, option: usize, field: OptionField },
    DeleteOption { question: usize, option: usize },
    DismissAlert,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved {
        navigate_to: Navigation,
        /// The server's copy, when its body could be decoded.
        survey: Option<SavedSurvey>,
    },
    /// The draft is kept as it was; the alert says why.
    Failed,
}

#[derive(Debug, Default)]
pub struct SurveyDraftEditor {
    draft: SurveyDraft,
    errors: HashMap<QuestionId, DuplicateOptionValue>,
    alert: Alert,
    phase: EditorPhase,
}

impl SurveyDraftEditor {
    /// An editor holding an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// The pending duplicate-value error of the question at `index`, numbered
    /// by its current position.
    pub fn question_error(&self, index: usize) -> Option<DuplicateOptionValue> {
        let question = self.draft.questions.get(index)?;
        self.errors.get(&question.id).map(|e| DuplicateOptionValue {
            question_number: index + 1,
            value: e.value.clone(),
        })
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Global save gate: no question has a duplicate-value error and no save
    /// is already running.
    pub fn can_save(&self) -> bool {
        self.phase == EditorPhase::Editing && self.errors.is_empty()
    }

    pub fn apply(&mut self, action: EditAction) -> Result<(), EditError> {
        match action {
            EditAction::SetField(field) => self.set_field(field),
            EditAction::AddQuestion => self.add_question().map(|_| ()),
            EditAction::DeleteQuestion(index) => self.delete_question(index),
            EditAction::SetQuestionField { question, field } => self.set_question_field(question, field),
            EditAction::AddOption(question) => self.add_option(question),
            EditAction::SetOptionField { question, option, field } => {
                self.set_option_field(question, option, field)
            }
            EditAction::DeleteOption { question, option } => self.delete_option(question, option),
            EditAction::DismissAlert => {
                self.dismiss_alert();
                Ok(())
            }
        }
    }

    pub fn set_field(&mut self, field: SurveyField) -> Result<(), EditError> {
        self.ensure_editable()?;
        match field {
            SurveyField::Title(title) => self.draft.title = title,
            SurveyField::Description(description) => self.draft.description = description,
            SurveyField::StartDate(date) => self.draft.start_date = date,
            SurveyField::EndDate(date) => self.draft.end_date = date,
        }
        Ok(())
    }

    /// Append a blank open-ended question. The returned id is the question
    /// the view should scroll to; it is always the last one.
    pub fn add_question(&mut self) -> Result<QuestionId, EditError> {
        self.ensure_editable()?;
        let question = Question::new();
        let id = question.id;
        self.draft.questions.push(question);
        debug!(count = self.draft.questions.len(), "question added");
        Ok(id)
    }

    pub fn delete_question(&mut self, index: usize) -> Result<(), EditError> {
        self.ensure_editable()?;
        self.check_question_index(index)?;
        let removed = self.draft.questions.remove(index);
        self.errors.remove(&removed.id);
        debug!(index, "question deleted");
        Ok(())
    }

    pub fn set_question_field(&mut self, index: usize, field: QuestionField) -> Result<(), EditError> {
        self.ensure_editable()?;
        let question = self.question_mut(index)?;
        match field {
            QuestionField::Text(text) => question.text = text,
            QuestionField::Required(required) => question.required = required,
            QuestionField::Type(kind) => {
                question.kind = kind;
                question.options = kind.default_options();
                let id = question.id;
                // The options that caused a pending error are gone.
                if self.errors.remove(&id).is_some() && self.alert.severity == Severity::Error {
                    self.alert = Alert::none();
                }
                debug!(index, %kind, "question type changed");
            }
        }
        Ok(())
    }

    /// Append a blank option valued one past the current count. Duplicates
    /// created this way are not flagged until the next value edit or delete.
    pub fn add_option(&mut self, question_index: usize) -> Result<(), EditError> {
        self.ensure_editable()?;
        let question = self.choice_question_mut(question_index)?;
        let next_value = question.options.len() as i64 + 1;
        question.options.push(SurveyOption::new("", next_value));
        Ok(())
    }

    pub fn set_option_field(
        &mut self,
        question_index: usize,
        option_index: usize,
        field: OptionField,
    ) -> Result<(), EditError> {
        self.ensure_editable()?;
        let option = self.option_mut(question_index, option_index)?;
        match field {
            OptionField::Text(text) => option.text = text,
            OptionField::Value(value) => {
                option.value = value;
                self.validate_options(question_index);
            }
        }
        Ok(())
    }

    pub fn delete_option(&mut self, question_index: usize, option_index: usize) -> Result<(), EditError> {
        self.ensure_editable()?;
        self.check_option_index(question_index, option_index)?;
        self.draft.questions[question_index].options.remove(option_index);
        self.validate_options(question_index);
        Ok(())
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = Alert::none();
    }

    /// Serialize the draft as it would be sent, without touching editor state.
    pub fn payload(&self) -> Result<SurveyPayload, EditError> {
        Ok(SurveyPayload::from_draft(&self.draft)?)
    }

    /// Build the save request and lock the draft until `finish_save`.
    pub fn begin_save(&mut self, client: &SurveyClient) -> Result<HttpRequest, EditError> {
        self.ensure_editable()?;
        if !self.errors.is_empty() {
            return Err(EditError::ValidationPending {
                count: self.errors.len(),
            });
        }
        let payload = match SurveyPayload::from_draft(&self.draft) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "survey payload rejected");
                self.alert = Alert::error(e.alert_message());
                return Err(e.into());
            }
        };
        let request = match client.build_save_survey(&payload) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "save request could not be built");
                self.alert = Alert::error(REJECTED_MESSAGE);
                return Err(e.into());
            }
        };
        self.phase = EditorPhase::Saving;
        debug!(questions = payload.questions.len(), "save started");
        Ok(request)
    }

    /// Settle an in-flight save with the host's result.
    pub fn finish_save(
        &mut self,
        client: &SurveyClient,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<SaveOutcome, EditError> {
        if self.phase != EditorPhase::Saving {
            return Err(EditError::NoSaveInFlight);
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "survey save failed");
                self.phase = EditorPhase::Editing;
                self.alert = Alert::error(TRANSPORT_FAILED_MESSAGE);
                return Ok(SaveOutcome::Failed);
            }
        };

        if response.status != 201 {
            warn!(status = response.status, "survey save rejected");
            self.phase = EditorPhase::Editing;
            self.alert = Alert::error(REJECTED_MESSAGE);
            return Ok(SaveOutcome::Failed);
        }

        let survey = match client.parse_save_survey(response) {
            Ok(survey) => Some(survey),
            Err(e) => {
                warn!(error = %e, "saved survey body could not be decoded");
                None
            }
        };
        self.draft = SurveyDraft::default();
        self.errors.clear();
        self.phase = EditorPhase::Saved;
        self.alert = Alert::success(SAVED_MESSAGE);
        Ok(SaveOutcome::Saved {
            navigate_to: Navigation::SurveyFeedbackList,
            survey,
        })
    }

    /// Throw the draft away and leave. No confirmation, nothing persisted.
    pub fn cancel(&mut self) -> Navigation {
        self.draft = SurveyDraft::default();
        self.errors.clear();
        self.alert = Alert::none();
        self.phase = EditorPhase::Discarded;
        debug!("draft discarded");
        Navigation::SurveyFeedbackList
    }

    fn ensure_editable(&self) -> Result<(), EditError> {
        match self.phase {
            EditorPhase::Editing => Ok(()),
            EditorPhase::Saving => Err(EditError::SaveInFlight),
            phase => Err(EditError::Closed(phase)),
        }
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut Question, EditError> {
        let len = self.draft.questions.len();
        self.draft
            .questions
            .get_mut(index)
            .ok_or(EditError::QuestionOutOfRange { index, len })
    }

    fn check_question_index(&self, index: usize) -> Result<(), EditError> {
        let len = self.draft.questions.len();
        if index < len {
            Ok(())
        } else {
            Err(EditError::QuestionOutOfRange { index, len })
        }
    }

    /// Options only exist on multiple-choice and rating questions.
    fn choice_question_mut(&mut self, index: usize) -> Result<&mut Question, EditError> {
        let question = self.question_mut(index)?;
        if !question.kind.has_options() {
            return Err(EditError::NoOptions {
                question: index,
                kind: question.kind,
            });
        }
        Ok(question)
    }

    fn check_option_index(&self, question_index: usize, option_index: usize) -> Result<(), EditError> {
        self.check_question_index(question_index)?;
        let question = &self.draft.questions[question_index];
        if !question.kind.has_options() {
            return Err(EditError::NoOptions {
                question: question_index,
                kind: question.kind,
            });
        }
        let len = question.options.len();
        if option_index < len {
            Ok(())
        } else {
            Err(EditError::OptionOutOfRange {
                question: question_index,
                index: option_index,
                len,
            })
        }
    }

    fn option_mut(&mut self, question_index: usize, option_index: usize) -> Result<&mut SurveyOption, EditError> {
        let question = self.choice_question_mut(question_index)?;
        let len = question.options.len();
        question
            .options
            .get_mut(option_index)
            .ok_or(EditError::OptionOutOfRange {
                question: question_index,
                index: option_index,
                len,
            })
    }

    fn validate_options(&mut self, index: usize) {
        let question = &self.draft.questions[index];
        let id = question.id;
        match validation::check_options(index, &question.options) {
            Err(duplicate) => {
                warn!(question = duplicate.question_number, value = %duplicate.value, "duplicate option value");
                self.alert = Alert::error(duplicate.alert_message());
                self.errors.insert(id, duplicate);
            }
            Ok(()) => {
                if self.errors.remove(&id).is_some() {
                    debug!(question = index + 1, "duplicate option value resolved");
                }
                self.alert = Alert::none();
            }
        }
    }
}
