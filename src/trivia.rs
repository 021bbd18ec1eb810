//! Request-level operations: each one combines the stores with validation
//! and, for mutations, a transaction that rolls back unless committed.

use crate::db::{category, question};
use crate::error::{ApiError, ValidationError};
use crate::models::{NewQuestion, Question, QuestionDraft};
use crate::pagination::Page;
use rusqlite::Connection;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<i64, String>,
}

#[derive(Debug, Clone)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// Lists page `page_number`. An empty page is reported as not found.
pub fn questions_page(conn: &Connection, page_number: i64) -> Result<QuestionPage, ApiError> {
    let page = Page::new(page_number)
        .ok_or_else(|| ApiError::not_found(format!("page {}", page_number)))?;

    let questions = question::list_questions_page(conn, page)?;
    if questions.is_empty() {
        return Err(ApiError::not_found(format!("page {}", page_number)));
    }

    Ok(QuestionPage {
        questions,
        total_questions: question::count_questions(conn)?,
        categories: category::categories_by_id(conn)?,
    })
}

fn insert_checked(conn: &Connection, new_question: &NewQuestion) -> Result<i64, ApiError> {
    if !category::category_exists(conn, new_question.category)? {
        return Err(ValidationError::UnknownCategory(new_question.category).into());
    }
    Ok(question::insert_question(conn, new_question)?)
}

pub fn create_question(conn: &mut Connection, draft: QuestionDraft) -> Result<i64, ApiError> {
    let new_question = draft.validate()?;

    let tx = conn.transaction()?;
    let id = insert_checked(&tx, &new_question)?;
    tx.commit()?;

    tracing::info!(id, category = new_question.category, "question created");
    Ok(id)
}

/// Validates and inserts every draft in one transaction; any bad row
/// aborts the whole import.
pub fn import_questions(
    conn: &mut Connection,
    drafts: impl IntoIterator<Item = QuestionDraft>,
) -> Result<usize, ApiError> {
    let tx = conn.transaction()?;
    let mut imported = 0;
    for draft in drafts {
        insert_checked(&tx, &draft.validate()?)?;
        imported += 1;
    }
    tx.commit()?;

    tracing::info!(imported, "questions imported");
    Ok(imported)
}

/// Imports `drafts` only when the store holds no questions yet.
pub fn seed_if_empty(
    conn: &mut Connection,
    drafts: impl IntoIterator<Item = QuestionDraft>,
) -> Result<usize, ApiError> {
    if question::count_questions(conn)? > 0 {
        return Ok(0);
    }
    import_questions(conn, drafts)
}

pub fn delete_question(conn: &mut Connection, id: i64) -> Result<(), ApiError> {
    let tx = conn.transaction()?;
    if question::delete_question(&tx, id)? == 0 {
        return Err(ValidationError::UnknownQuestion(id).into());
    }
    tx.commit()?;

    tracing::info!(id, "question deleted");
    Ok(())
}

pub fn search(conn: &Connection, term: &str) -> Result<SearchResults, ApiError> {
    let questions = question::search_questions(conn, term)?;
    Ok(SearchResults {
        total_questions: questions.len(),
        questions,
    })
}

pub fn questions_in_category(
    conn: &Connection,
    category_id: i64,
) -> Result<Vec<Question>, ApiError> {
    if !category::category_exists(conn, category_id)? {
        return Err(ApiError::not_found(format!("category {}", category_id)));
    }
    Ok(question::list_questions_by_category(conn, category_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::LooseInt;

    fn draft(text: &str, category: i64, difficulty: i64) -> QuestionDraft {
        QuestionDraft {
            question: Some(text.to_string()),
            answer: Some("An answer".to_string()),
            category: Some(LooseInt::Int(category)),
            difficulty: Some(LooseInt::Int(difficulty)),
        }
    }

    #[test]
    fn test_create_question_persists() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();

        let id = create_question(&mut conn, draft("Will this pass?", 5, 1)).unwrap();
        let stored = question::get_question(&conn, id).unwrap().unwrap();
        assert_eq!(stored.category, 5);
        assert_eq!(question::count_questions(&conn).unwrap(), 1);
    }

    #[test]
    fn test_create_question_unknown_category_is_not_persisted() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();

        let err = create_question(&mut conn, draft("Nope", 10, 1)).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::UnknownCategory(10))
        ));
        assert_eq!(question::count_questions(&conn).unwrap(), 0);
    }

    #[test]
    fn test_create_question_bad_difficulty() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();

        let err = create_question(&mut conn, draft("Nope", 2, 10)).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(question::count_questions(&conn).unwrap(), 0);
    }

    #[test]
    fn test_delete_question_reduces_count() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();

        let id = create_question(&mut conn, draft("Q1", 1, 1)).unwrap();
        create_question(&mut conn, draft("Q2", 1, 1)).unwrap();

        delete_question(&mut conn, id).unwrap();
        assert_eq!(question::count_questions(&conn).unwrap(), 1);
        assert!(question::get_question(&conn, id).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_question() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();
        create_question(&mut conn, draft("Q1", 1, 1)).unwrap();

        let err = delete_question(&mut conn, 100).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::UnknownQuestion(100))
        ));
        assert_eq!(question::count_questions(&conn).unwrap(), 1);
    }

    #[test]
    fn test_import_rolls_back_on_bad_row() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();

        let drafts = vec![draft("Q1", 1, 1), draft("Q2", 2, 2), draft("Q3", 42, 2)];
        assert!(import_questions(&mut conn, drafts).is_err());
        assert_eq!(question::count_questions(&conn).unwrap(), 0);

        let drafts = vec![draft("Q1", 1, 1), draft("Q2", 2, 2)];
        assert_eq!(import_questions(&mut conn, drafts).unwrap(), 2);
    }

    #[test]
    fn test_seed_if_empty_runs_once() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();

        let stock = crate::csv::parse_question_csv(include_str!("../data/questions.csv"));
        assert_eq!(seed_if_empty(&mut conn, stock.clone()).unwrap(), 19);
        assert_eq!(seed_if_empty(&mut conn, stock).unwrap(), 0);
        assert_eq!(question::count_questions(&conn).unwrap(), 19);
    }

    #[test]
    fn test_questions_page_not_found_when_empty() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();

        assert!(matches!(questions_page(&conn, 1), Err(ApiError::NotFound(_))));

        create_question(&mut conn, draft("Q1", 3, 1)).unwrap();
        let page = questions_page(&conn, 1).unwrap();
        assert_eq!(page.questions.len(), 1);
        assert_eq!(page.total_questions, 1);
        assert_eq!(page.categories.len(), 6);

        assert!(matches!(questions_page(&conn, 2), Err(ApiError::NotFound(_))));
        assert!(matches!(questions_page(&conn, 0), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_search_and_category_listing() {
        let (_dir, pool) = test_pool();
        let mut conn = pool.get().unwrap();

        create_question(&mut conn, draft("What is the title?", 1, 1)).unwrap();
        create_question(&mut conn, draft("Another one", 2, 1)).unwrap();

        let results = search(&conn, "TITLE").unwrap();
        assert_eq!(results.total_questions, 1);

        let science = questions_in_category(&conn, 1).unwrap();
        assert_eq!(science.len(), 1);
        assert!(science.iter().all(|q| q.category == 1));

        assert!(questions_in_category(&conn, 3).unwrap().is_empty());
        assert!(matches!(
            questions_in_category(&conn, 10),
            Err(ApiError::NotFound(_))
        ));
    }
}
