//! Stateless HTTP request builder and response parser for the admin survey API.
//!
//! # Design
//! `SurveyClient` holds only a `base_url` and the bearer token handed over by
//! the host's credential store. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the round-trip.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{SavedSurvey, SurveyPayload};

pub const SAVE_SURVEY_PATH: &str = "/api/admin/save-survey";
pub const LIST_SURVEYS_PATH: &str = "/api/admin/surveys";

#[derive(Debug, Clone)]
pub struct SurveyClient {
    base_url: String,
    token: String,
}

impl SurveyClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn authorization(&self) -> (String, String) {
        ("authorization".to_string(), format!("Bearer {}", self.token))
    }

    pub fn build_save_survey(&self, payload: &SurveyPayload) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{SAVE_SURVEY_PATH}", self.base_url),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                self.authorization(),
            ],
            body: Some(body),
        })
    }

    pub fn build_list_surveys(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{LIST_SURVEYS_PATH}", self.base_url),
            headers: vec![self.authorization()],
            body: None,
        }
    }

    pub fn parse_save_survey(&self, response: HttpResponse) -> Result<SavedSurvey, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_list_surveys(&self, response: HttpResponse) -> Result<Vec<SavedSurvey>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 401 {
        return Err(ApiError::Unauthorized);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
