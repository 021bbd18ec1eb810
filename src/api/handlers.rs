use super::AppState;
use super::responses::{
    CategoriesResponse, CategoryQuestionsResponse, QuestionsPageResponse, QuizResponse,
    SearchResponse,
};
use crate::db::category;
use crate::error::{ApiError, ValidationError};
use crate::models::QuestionDraft;
use crate::pagination::parse_page_param;
use crate::quiz::{self, QuizQuery};
use crate::trivia;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct PageParams {
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

/// Path ids that are not integers do not name any resource.
fn parse_id(raw: &str, what: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("{} {:?}", what, raw)))
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ValidationError::MalformedBody(format!(
            "expected an object, got {}",
            other
        ))),
        Err(e) => Err(ValidationError::MalformedBody(e.to_string())),
    }
}

fn from_object<T: DeserializeOwned>(map: &Map<String, Value>) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(map.clone()))
        .map_err(|e| ValidationError::MalformedBody(e.to_string()))
}

pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state
        .with_conn(|conn| Ok(category::categories_by_id(conn)?))
        .await?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

pub async fn get_questions(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<QuestionsPageResponse>, ApiError> {
    let page = parse_page_param(params.page.as_deref());
    let page = state
        .with_conn(move |conn| trivia::questions_page(conn, page))
        .await?;

    Ok(Json(QuestionsPageResponse {
        success: true,
        questions: page.questions,
        total_questions: page.total_questions,
        categories: page.categories,
    }))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&question_id, "question")?;
    state
        .with_conn(move |conn| trivia::delete_question(conn, id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Responds with the submitted object plus `"success": true`.
pub async fn create_question(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let mut echo = parse_object(&body)?;
    let draft: QuestionDraft = from_object(&echo)?;

    state
        .with_conn(move |conn| trivia::create_question(conn, draft))
        .await?;

    echo.insert("success".to_string(), Value::Bool(true));
    Ok(Json(Value::Object(echo)))
}

pub async fn search_questions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let request: SearchRequest = from_object(&parse_object(&body)?)?;
    let term = request
        .search_term
        .ok_or(ValidationError::MissingField("searchTerm"))?;

    let results = state
        .with_conn(move |conn| trivia::search(conn, &term))
        .await?;

    Ok(Json(SearchResponse {
        success: true,
        questions: results.questions,
        total_questions: results.total_questions,
    }))
}

pub async fn get_questions_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let category_id = parse_id(&category_id, "category")?;
    let questions = state
        .with_conn(move |conn| trivia::questions_in_category(conn, category_id))
        .await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_count: questions.len(),
        questions,
        current_category: category_id,
    }))
}

pub async fn play_quiz(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<QuizResponse>, ApiError> {
    let query = QuizQuery::from_body(&body);
    let question = state
        .with_conn(move |conn| quiz::play(conn, &query, &mut rand::thread_rng()))
        .await?;

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("route")
}
