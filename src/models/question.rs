// src/models/question.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, prelude::FromRow, types::Json};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: i64,

    /// The prompt shown to the quiz taker.
    pub question: String,

    /// Ordered list of options (e.g., ["Option A", "Option B"]).
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// Zero-based index into `options`.
    /// Rows are not re-validated on read, so this may be out of bounds.
    pub correct_answer: i64,

    pub explanation: String,

    pub category: String,

    pub difficulty: String,
}

impl Question {
    /// Text of the option at `index`, or an empty string when out of range.
    pub fn option_text(&self, index: i64) -> String {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.options.get(i))
            .cloned()
            .unwrap_or_default()
    }

    /// All questions in storage order.
    pub async fn fetch_all<'c, E>(db: E) -> Result<Vec<Question>, sqlx::Error>
    where
        E: SqliteExecutor<'c>,
    {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, options, correct_answer, explanation, category, difficulty
            FROM questions
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find<'c, E>(db: E, id: i64) -> Result<Option<Question>, sqlx::Error>
    where
        E: SqliteExecutor<'c>,
    {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, options, correct_answer, explanation, category, difficulty
            FROM questions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Loads the given questions keyed by id. Unknown ids are simply absent from the map.
    pub async fn find_by_ids<'c, E>(db: E, ids: &[i64]) -> Result<HashMap<i64, Question>, sqlx::Error>
    where
        E: SqliteExecutor<'c>,
    {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        // Use QueryBuilder for dynamic IN clause
        let mut query_builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, question, options, correct_answer, explanation, category, difficulty
            FROM questions WHERE id IN (",
        );

        let mut separated = query_builder.separated(",");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let questions: Vec<Question> = query_builder.build_query_as().fetch_all(db).await?;

        Ok(questions.into_iter().map(|q| (q.id, q)).collect())
    }

    pub async fn count<'c, E>(db: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'c>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(db)
            .await
    }

    /// Inserts a question and returns its new id.
    pub async fn insert<'c, E>(db: E, req: &QuestionRequest) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'c>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO questions (question, options, correct_answer, explanation, category, difficulty)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&req.question)
        .bind(Json(&req.options))
        .bind(req.correct_answer)
        .bind(&req.explanation)
        .bind(&req.category)
        .bind(&req.difficulty)
        .execute(db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Replaces every editable field. Returns `false` if no row has this id.
    pub async fn update<'c, E>(db: E, id: i64, req: &QuestionRequest) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'c>,
    {
        let result = sqlx::query(
            r#"
            UPDATE questions
            SET question = ?, options = ?, correct_answer = ?, explanation = ?,
                category = ?, difficulty = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&req.question)
        .bind(Json(&req.options))
        .bind(req.correct_answer)
        .bind(&req.explanation)
        .bind(&req.category)
        .bind(&req.difficulty)
        .bind(id)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Wire format of a question.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i64,
    pub explanation: String,
    pub category: String,
    pub difficulty: String,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            options: q.options.0,
            correct_answer: q.correct_answer,
            explanation: q.explanation,
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

/// DTO for creating or replacing a question.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_correct_answer))]
pub struct QuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
    #[validate(
        length(min = 2, max = 6, message = "A question needs between 2 and 6 options."),
        custom(function = validate_options)
    )]
    pub options: Vec<String>,
    pub correct_answer: i64,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub explanation: String,
    #[serde(default = "default_category")]
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[serde(default = "default_difficulty")]
    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,
}

fn default_category() -> String {
    "RDS".to_string()
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    for opt in options {
        if opt.is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.chars().count() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

fn validate_correct_answer(req: &QuestionRequest) -> Result<(), validator::ValidationError> {
    let in_bounds = usize::try_from(req.correct_answer)
        .map(|i| i < req.options.len())
        .unwrap_or(false);

    if !in_bounds {
        return Err(validator::ValidationError::new("correct_answer_out_of_range"));
    }
    Ok(())
}

/// Query parameters for the random question endpoint.
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RandomQuestionsParams {
    /// How many questions to return (1-50, default 10).
    #[validate(range(min = 1, max = 50))]
    pub count: Option<i64>,
}
