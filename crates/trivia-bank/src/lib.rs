//! Question bank model and data access for the trivia API.
//!
//! Implements question CRUD, case-insensitive text search, category
//! filtering, and category listing as plain functions over a
//! `rusqlite::Connection`. Handlers obtain a pooled connection and call
//! into this crate; no query text lives in the HTTP layer.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during question bank operations.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("question not found: {0}")]
    QuestionNotFound(i64),
}

/// A labeled grouping for questions (e.g. "Art", "Science").
///
/// Categories are reference data: seeded by migration, never written
/// through the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Internal database ID.
    pub id: i64,
    /// Display name.
    #[serde(rename = "type")]
    pub kind: String,
}

/// A quiz item with text, answer, numeric difficulty, and a category
/// reference.
///
/// `category` is not constrained to an existing [`Category`] row; orphaned
/// references are tolerated throughout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    /// Internal database ID, unique and stable once assigned.
    pub id: i64,
    /// Question text.
    pub question: String,
    /// Answer text.
    pub answer: String,
    /// Difficulty rating. The range is unconstrained.
    pub difficulty: i64,
    /// ID of the category this question belongs to.
    pub category: i64,
}

/// Parameters for creating a new question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: i64,
}

/// Lists all categories, ordered by display name.
pub fn list_categories(conn: &Connection) -> Result<Vec<Category>, BankError> {
    let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY type ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok(Category {
            id: row.get(0)?,
            kind: row.get(1)?,
        })
    })?;

    let mut categories = Vec::new();
    for row in rows {
        categories.push(row?);
    }
    Ok(categories)
}

/// Lists all questions, ordered by ID.
pub fn list_questions(conn: &Connection) -> Result<Vec<Question>, BankError> {
    let mut stmt = conn.prepare(
        "SELECT id, question, answer, difficulty, category
         FROM questions ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], map_row_to_question)?;
    let mut questions = Vec::new();
    for row in rows {
        questions.push(row?);
    }
    Ok(questions)
}

/// Retrieves a question by its ID.
pub fn get_question(conn: &Connection, id: i64) -> Result<Question, BankError> {
    conn.query_row(
        "SELECT id, question, answer, difficulty, category
         FROM questions WHERE id = ?1",
        [id],
        map_row_to_question,
    )
    .optional()?
    .ok_or(BankError::QuestionNotFound(id))
}

/// Inserts a new question and returns its assigned ID.
pub fn insert_question(conn: &Connection, new: &NewQuestion) -> Result<i64, BankError> {
    conn.execute(
        "INSERT INTO questions (question, answer, difficulty, category)
         VALUES (?1, ?2, ?3, ?4)",
        params![new.question, new.answer, new.difficulty, new.category],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Deletes a question by its ID.
pub fn delete_question(conn: &Connection, id: i64) -> Result<(), BankError> {
    let count = conn.execute("DELETE FROM questions WHERE id = ?1", [id])?;
    if count == 0 {
        return Err(BankError::QuestionNotFound(id));
    }
    Ok(())
}

/// Finds questions whose text contains `term`, case-insensitively.
///
/// The term is embedded between `%` wildcards without escaping, so `%` and
/// `_` inside it act as wildcards. SQLite `LIKE` is case-insensitive for
/// ASCII only.
pub fn search_questions(conn: &Connection, term: &str) -> Result<Vec<Question>, BankError> {
    let mut stmt = conn.prepare(
        "SELECT id, question, answer, difficulty, category
         FROM questions WHERE question LIKE ?1 ORDER BY id ASC",
    )?;

    let pattern = format!("%{}%", term);
    let rows = stmt.query_map([pattern], map_row_to_question)?;
    let mut questions = Vec::new();
    for row in rows {
        questions.push(row?);
    }
    Ok(questions)
}

/// Lists all questions in the given category, ordered by ID.
///
/// An unknown category ID is not an error here; it simply matches nothing.
pub fn questions_for_category(
    conn: &Connection,
    category_id: i64,
) -> Result<Vec<Question>, BankError> {
    let mut stmt = conn.prepare(
        "SELECT id, question, answer, difficulty, category
         FROM questions WHERE category = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([category_id], map_row_to_question)?;
    let mut questions = Vec::new();
    for row in rows {
        questions.push(row?);
    }
    Ok(questions)
}

fn map_row_to_question(row: &Row) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        difficulty: row.get(3)?,
        category: row.get(4)?,
    })
}
