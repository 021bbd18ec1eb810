//! Picks the next quiz question.
//!
//! The eligible pool is every question (or every question in one category)
//! minus the ones the player has already seen. One candidate is drawn
//! uniformly at random; an empty pool means the quiz is over.

use crate::db::{category, question};
use crate::error::ApiError;
use crate::models::{LooseInt, Question};
use rand::Rng;
use rand::seq::SliceRandom;
use rusqlite::Connection;
use serde::Deserialize;
use std::collections::HashSet;

/// Category id meaning "any category".
pub const ALL_CATEGORIES: i64 = 0;

/// Both fields are required; a body missing either one (or sending `null`)
/// takes the [`QuizQuery::Unparseable`] branch.
#[derive(Debug, Deserialize)]
struct QuizRequest {
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

#[derive(Debug, Deserialize)]
struct QuizCategory {
    id: LooseInt,
}

/// A parsed `POST /quizzes` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizQuery {
    /// `category` may be [`ALL_CATEGORIES`].
    Filtered {
        category: i64,
        excluded: HashSet<i64>,
    },
    /// The body could not be understood or lacked a field; the caller draws
    /// from the whole store and ignores exclusions.
    Unparseable(String),
}

impl QuizQuery {
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return QuizQuery::Unparseable("empty body".to_string());
        }

        let request: QuizRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(e) => return QuizQuery::Unparseable(e.to_string()),
        };

        let category = match request.quiz_category.id.to_i64("quiz_category.id") {
            Ok(id) => id,
            Err(e) => return QuizQuery::Unparseable(e.to_string()),
        };

        QuizQuery::Filtered {
            category,
            excluded: request.previous_questions.into_iter().collect(),
        }
    }
}

/// Draws the next question from `category_id` (or every category when
/// absent or [`ALL_CATEGORIES`]), skipping ids in `excluded`.
///
/// Returns `Ok(None)` once every eligible question has been seen, and
/// `ApiError::NotFound` for a category that does not exist.
pub fn select_next<R: Rng + ?Sized>(
    conn: &Connection,
    category_id: Option<i64>,
    excluded: &HashSet<i64>,
    rng: &mut R,
) -> Result<Option<Question>, ApiError> {
    let category_id = category_id.filter(|&id| id != ALL_CATEGORIES);
    if let Some(id) = category_id
        && !category::category_exists(conn, id)?
    {
        return Err(ApiError::not_found(format!("category {}", id)));
    }

    let candidates: Vec<i64> = question::list_question_ids(conn, category_id)?
        .into_iter()
        .filter(|id| !excluded.contains(id))
        .collect();

    pick(conn, &candidates, rng)
}

/// Draws from every question in the store with no exclusions.
pub fn select_any<R: Rng + ?Sized>(
    conn: &Connection,
    rng: &mut R,
) -> Result<Option<Question>, ApiError> {
    let candidates = question::list_question_ids(conn, None)?;
    pick(conn, &candidates, rng)
}

fn pick<R: Rng + ?Sized>(
    conn: &Connection,
    candidates: &[i64],
    rng: &mut R,
) -> Result<Option<Question>, ApiError> {
    match candidates.choose(rng) {
        Some(&id) => Ok(question::get_question(conn, id)?),
        None => Ok(None),
    }
}

/// Resolves a [`QuizQuery`] to the next question.
pub fn play<R: Rng + ?Sized>(
    conn: &Connection,
    query: &QuizQuery,
    rng: &mut R,
) -> Result<Option<Question>, ApiError> {
    match query {
        QuizQuery::Filtered { category, excluded } => {
            select_next(conn, Some(*category), excluded, rng)
        }
        QuizQuery::Unparseable(reason) => {
            tracing::warn!(%reason, "unparseable quiz request, drawing from all questions");
            select_any(conn, rng)
        }
    }
}
