use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

pub mod config;
pub mod error;

pub use config::Config;
pub use error::AppError;

const QUESTION_TYPES: [&str; 3] = ["Open-ended", "Multiple Choice", "Rating"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurveyInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionInput {
    pub question_text: String,
    pub question_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<OptionInput>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptionInput {
    pub option_text: String,
    pub option_value: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Survey {
    pub id: Uuid,
    #[serde(flatten)]
    pub survey: SurveyInput,
}

pub type Db = Arc<RwLock<Vec<Survey>>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    token: Arc<str>,
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Vec::new())),
        token: Arc::from(token),
    };
    Router::new()
        .route("/api/admin/save-survey", post(save_survey))
        .route("/api/admin/surveys", get(list_surveys))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if presented != Some(&*state.token) {
        warn!(path = %request.uri().path(), "rejected admin request");
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// Reject payloads the editor should never have let through.
pub fn validate(input: &SurveyInput) -> Result<(), AppError> {
    for (index, question) in input.questions.iter().enumerate() {
        let number = index + 1;
        if !QUESTION_TYPES.contains(&question.question_type.as_str()) {
            return Err(AppError::UnknownQuestionType(question.question_type.clone()));
        }
        if question.question_type == "Open-ended" {
            if !question.options.is_empty() {
                return Err(AppError::UnexpectedOptions(number));
            }
            continue;
        }
        if question.options.is_empty() {
            return Err(AppError::MissingOptions(number));
        }
        let mut seen = HashSet::new();
        for option in &question.options {
            if !seen.insert(option.option_value) {
                return Err(AppError::DuplicateOptionValue {
                    question: number,
                    value: option.option_value,
                });
            }
        }
    }
    Ok(())
}

async fn save_survey(
    State(state): State<AppState>,
    Json(input): Json<SurveyInput>,
) -> Result<(StatusCode, Json<Survey>), AppError> {
    validate(&input)?;
    let survey = Survey {
        id: Uuid::new_v4(),
        survey: input,
    };
    info!(id = %survey.id, questions = survey.survey.questions.len(), "survey saved");
    state.db.write().await.push(survey.clone());
    Ok((StatusCode::CREATED, Json(survey)))
}

async fn list_surveys(State(state): State<AppState>) -> Json<Vec<Survey>> {
    Json(state.db.read().await.clone())
}
