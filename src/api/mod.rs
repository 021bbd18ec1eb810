use crate::db::SqlitePool;
use crate::error::ApiError;
use axum::Router;
use axum::http::{Method, header};
use axum::routing::{delete, get, post};
use rusqlite::Connection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod responses;

#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Runs `f` on a blocking thread with a connection checked out for the
    /// duration of the call.
    pub async fn with_conn<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut *conn)
        })
        .await?
    }
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(handlers::get_categories))
        .route(
            "/categories/:category_id/questions",
            get(handlers::get_questions_by_category),
        )
        .route(
            "/questions",
            get(handlers::get_questions).post(handlers::create_question),
        )
        .route("/questions/:question_id", delete(handlers::delete_question))
        .route("/search/questions", post(handlers::search_questions))
        .route("/quizzes", post(handlers::play_quiz))
        .fallback(handlers::not_found)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
