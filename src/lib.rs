pub mod api;
pub mod csv;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod pagination;
pub mod quiz;
pub mod settings;
pub mod trivia;


// Re-exports for convenience
pub use api::{AppState, router};
pub use error::{ApiError, ValidationError};
pub use models::{Category, Difficulty, NewQuestion, Question, QuestionDraft};
pub use quiz::{QuizQuery, select_next};
pub use settings::Settings;
