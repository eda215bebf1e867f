// src/models/submission.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteExecutor, prelude::FromRow, types::Json};
use utoipa::ToSchema;
use validator::Validate;

use crate::scoring::{AnswerDetail, Grade};

/// Raw answers as submitted: question id (as a string key) to selected option index.
pub type AnswerSheet = BTreeMap<String, i64>;

/// Represents the 'quiz_submissions' table in the database.
/// Rows are written once and never updated.
#[derive(Debug, Clone, FromRow)]
pub struct Submission {
    pub id: i64,

    /// Empty when the client did not identify itself.
    pub user_id: String,

    /// Stored as a JSON object in the database.
    pub answers: Json<AnswerSheet>,

    /// Milliseconds.
    pub time_spent: i64,

    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
}

/// Values computed by the submit flow, ready to be persisted.
#[derive(Debug)]
pub struct NewSubmission<'a> {
    pub user_id: &'a str,
    pub answers: &'a AnswerSheet,
    pub time_spent: i64,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub async fn insert<'c, E>(db: E, new: &NewSubmission<'_>) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'c>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO quiz_submissions (user_id, answers, time_spent, score, total, percentage, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.user_id)
        .bind(Json(new.answers))
        .bind(new.time_spent)
        .bind(new.score)
        .bind(new.total)
        .bind(new.percentage)
        .bind(new.created_at)
        .execute(db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find<'c, E>(db: E, id: i64) -> Result<Option<Submission>, sqlx::Error>
    where
        E: SqliteExecutor<'c>,
    {
        sqlx::query_as::<_, Submission>(
            r#"
            SELECT id, user_id, answers, time_spent, score, total, percentage, created_at
            FROM quiz_submissions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Aggregates over every stored submission. All zero when there are none.
    pub async fn stats<'c, E>(db: E) -> Result<QuizStats, sqlx::Error>
    where
        E: SqliteExecutor<'c>,
    {
        let (total_submissions, average_score, average_time, highest_score, lowest_score): (
            i64,
            f64,
            f64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(AVG(score), 0.0),
                COALESCE(AVG(time_spent), 0.0),
                COALESCE(MAX(score), 0),
                COALESCE(MIN(score), 0)
            FROM quiz_submissions
            "#,
        )
        .fetch_one(db)
        .await?;

        Ok(QuizStats {
            total_submissions,
            average_score,
            average_time,
            highest_score,
            lowest_score,
        })
    }
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub user_id: String,

    /// Key: Question ID. Value: selected option index.
    pub answers: BTreeMap<String, i64>,

    /// Milliseconds spent on the attempt.
    #[validate(range(min = 0, message = "timeSpent must not be negative"))]
    pub time_spent: i64,
}

/// Response for submit and result retrieval.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: i64,
    pub user_id: String,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub time_spent: i64,
    pub answers: Vec<AnswerDetail>,
    pub created_at: DateTime<Utc>,
}

impl SubmissionResponse {
    pub fn new(submission: Submission, answers: Vec<AnswerDetail>) -> Self {
        Self {
            id: submission.id,
            user_id: submission.user_id,
            score: submission.score,
            total: submission.total,
            percentage: submission.percentage,
            time_spent: submission.time_spent,
            answers,
            created_at: submission.created_at,
        }
    }
}

/// Result breakdown with correct/wrong counts and letter grade.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizReport {
    pub id: i64,
    pub user_id: String,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    pub time_spent: i64,
    pub answers: Vec<AnswerDetail>,
    pub grade: Grade,
    pub created_at: DateTime<Utc>,
}

/// Aggregate statistics across all submissions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_submissions: i64,
    pub average_score: f64,
    pub average_time: f64,
    pub highest_score: i64,
    pub lowest_score: i64,
}
