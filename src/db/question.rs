use crate::models::{NewQuestion, Question};
use crate::pagination::Page;
use rusqlite::{Connection, OptionalExtension, Result, Row};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

fn question_from_row(row: &Row<'_>) -> Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        category: row.get(3)?,
        difficulty: row.get(4)?,
    })
}

fn query_questions(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Question>> {
    let mut stmt = conn.prepare(sql)?;
    let questions = stmt
        .query_map(params, question_from_row)?
        .collect::<Result<Vec<_>>>()?;
    Ok(questions)
}

pub fn list_questions(conn: &Connection) -> Result<Vec<Question>> {
    query_questions(
        conn,
        &format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id"),
        [],
    )
}

pub fn list_questions_by_category(conn: &Connection, category_id: i64) -> Result<Vec<Question>> {
    query_questions(
        conn,
        &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE category = ? ORDER BY id"),
        [category_id],
    )
}

/// One page of questions ordered by category, ties broken by id.
pub fn list_questions_page(conn: &Connection, page: Page) -> Result<Vec<Question>> {
    query_questions(
        conn,
        &format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY category, id LIMIT ? OFFSET ?"
        ),
        rusqlite::params![page.limit(), page.offset()],
    )
}

/// Ids of every question, or only those in `category_id` when given.
pub fn list_question_ids(conn: &Connection, category_id: Option<i64>) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT id FROM questions WHERE (?1 IS NULL OR category = ?1) ORDER BY id",
    )?;
    let ids = stmt
        .query_map([category_id], |row| row.get(0))?
        .collect::<Result<Vec<i64>>>()?;
    Ok(ids)
}

pub fn count_questions(conn: &Connection) -> Result<usize> {
    conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))
}

pub fn count_questions_in_category(conn: &Connection, category_id: i64) -> Result<usize> {
    conn.query_row(
        "SELECT COUNT(*) FROM questions WHERE category = ?",
        [category_id],
        |row| row.get(0),
    )
}

pub fn get_question(conn: &Connection, id: i64) -> Result<Option<Question>> {
    conn.query_row(
        &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?"),
        [id],
        question_from_row,
    )
    .optional()
}

pub fn insert_question(conn: &Connection, question: &NewQuestion) -> Result<i64> {
    conn.execute(
        "INSERT INTO questions (question, answer, category, difficulty) VALUES (?, ?, ?, ?)",
        rusqlite::params![
            question.question,
            question.answer,
            question.category,
            question.difficulty.get()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns the number of rows removed (0 or 1).
pub fn delete_question(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM questions WHERE id = ?", [id])
}

/// Case-insensitive substring match on question text, ordered by id. Case
/// is folded with Unicode lowercasing, so non-ASCII letters match too.
pub fn search_questions(conn: &Connection, term: &str) -> Result<Vec<Question>> {
    let needle = term.to_lowercase();
    let questions = list_questions(conn)?
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect();
    Ok(questions)
}
