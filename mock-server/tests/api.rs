use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Survey};
use tower::ServiceExt;

const TOKEN: &str = "test-token";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn save_request(token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/admin/save-survey")
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

fn list_request(token: &str) -> Request<String> {
    Request::builder()
        .uri("/api/admin/surveys")
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(String::new())
        .unwrap()
}

const RATING_SURVEY: &str = r#"{
    "title": "Homecoming feedback",
    "description": "Tell us how it went",
    "start_date": "2026-11-01",
    "end_date": "2026-11-30",
    "questions": [
        {"question_text": "Overall?", "question_type": "Rating", "required": true, "options": [
            {"option_text": "Poorly", "option_value": 1},
            {"option_text": "Unsatisfied", "option_value": 2},
            {"option_text": "Neutral", "option_value": 3},
            {"option_text": "Satisfied", "option_value": 4},
            {"option_text": "Very Satisfied", "option_value": 5}
        ]},
        {"question_text": "Comments", "question_type": "Open-ended", "required": false, "options": []}
    ]
}"#;

// --- auth ---

#[tokio::test]
async fn save_without_token_returns_401() {
    let resp = app(TOKEN).oneshot(save_request(None, RATING_SURVEY)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn save_with_wrong_token_returns_401() {
    let resp = app(TOKEN)
        .oneshot(save_request(Some("nope"), RATING_SURVEY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_with_wrong_token_returns_401() {
    let resp = app(TOKEN).oneshot(list_request("nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- save ---

#[tokio::test]
async fn save_survey_returns_201() {
    let resp = app(TOKEN)
        .oneshot(save_request(Some(TOKEN), RATING_SURVEY))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let survey: Survey = body_json(resp).await;
    assert_eq!(survey.survey.title, "Homecoming feedback");
    assert_eq!(survey.survey.questions.len(), 2);
    assert_eq!(survey.survey.questions[0].options[4].option_value, 5);
}

#[tokio::test]
async fn save_duplicate_values_returns_422() {
    let body = r#"{"title":"T","start_date":null,"end_date":null,"questions":[
        {"question_text":"Pick","question_type":"Multiple Choice","options":[
            {"option_text":"A","option_value":1},{"option_text":"B","option_value":1}]}]}"#;
    let resp = app(TOKEN).oneshot(save_request(Some(TOKEN), body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_text(resp).await, "Duplicate option value 1 in question 1");
}

#[tokio::test]
async fn save_open_ended_with_options_returns_422() {
    let body = r#"{"title":"T","start_date":null,"end_date":null,"questions":[
        {"question_text":"Why?","question_type":"Open-ended","options":[
            {"option_text":"stray","option_value":1}]}]}"#;
    let resp = app(TOKEN).oneshot(save_request(Some(TOKEN), body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_text(resp).await,
        "Question 1 is open-ended and cannot have options"
    );
}

#[tokio::test]
async fn save_string_option_value_returns_422() {
    let body = r#"{"title":"T","start_date":null,"end_date":null,"questions":[
        {"question_text":"Pick","question_type":"Multiple Choice","options":[
            {"option_text":"A","option_value":"1"}]}]}"#;
    let resp = app(TOKEN).oneshot(save_request(Some(TOKEN), body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn save_malformed_json_returns_422() {
    let resp = app(TOKEN)
        .oneshot(save_request(Some(TOKEN), r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- save then list ---

#[tokio::test]
async fn save_then_list() {
    use tower::Service;

    let mut app = app(TOKEN).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(list_request(TOKEN))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let surveys: Vec<Survey> = body_json(resp).await;
    assert!(surveys.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(save_request(Some(TOKEN), RATING_SURVEY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let saved: Survey = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(list_request(TOKEN))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let surveys: Vec<Survey> = body_json(resp).await;
    assert_eq!(surveys.len(), 1);
    assert_eq!(surveys[0].id, saved.id);
    assert_eq!(surveys[0].survey.start_date, saved.survey.start_date);
}
