// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        question::Question,
        submission::{
            NewSubmission, QuizReport, QuizStats, SubmissionResponse, SubmitQuizRequest,
            Submission,
        },
    },
    scoring::{self, AnswerDetail},
    utils::response::ApiResponse,
};

fn invalid_result_id() -> AppError {
    AppError::BadRequest("Invalid quiz result ID".to_string())
}

/// Submits a user's answers, scores them and stores the attempt.
///
/// * Loads only the questions referenced by the answer keys.
/// * Unknown keys count toward `total` but never toward `score`.
/// * Question lookup and the insert share one immediate transaction.
#[utoipa::path(
    post,
    path = "/api/v1/quiz/submit",
    tag = "Quiz",
    request_body = SubmitQuizRequest,
    responses(
        (status = 200, description = "Quiz scored and stored", body = SubmissionResponse),
        (status = 422, description = "Malformed or invalid body")
    )
)]
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let question_ids = scoring::referenced_question_ids(&req.answers);

    // Take the write lock up front: a deferred transaction that reads and then
    // writes fails with SQLITE_BUSY when another submit commits in between.
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let questions = Question::find_by_ids(&mut *tx, &question_ids)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch questions for scoring: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let scorecard = scoring::score_answers(&req.answers, &questions);
    let created_at = Utc::now();

    let id = Submission::insert(
        &mut *tx,
        &NewSubmission {
            user_id: &req.user_id,
            answers: &req.answers,
            time_spent: req.time_spent,
            score: scorecard.score,
            total: scorecard.total,
            percentage: scorecard.percentage,
            created_at,
        },
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to save quiz submission: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tx.commit().await?;

    tracing::info!(
        submission_id = id,
        score = scorecard.score,
        total = scorecard.total,
        "Quiz submitted"
    );

    let response = SubmissionResponse {
        id,
        user_id: req.user_id,
        score: scorecard.score,
        total: scorecard.total,
        percentage: scorecard.percentage,
        time_spent: req.time_spent,
        answers: scorecard.details,
        created_at,
    };

    Ok(ApiResponse::success(response, "Quiz submitted successfully"))
}

/// Loads a stored submission and rebuilds its answer details from current questions.
async fn load_result(
    pool: &SqlitePool,
    id: i64,
) -> Result<(Submission, Vec<AnswerDetail>), AppError> {
    let submission = Submission::find(pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch quiz result {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or(AppError::NotFound("Quiz result not found".to_string()))?;

    let question_ids = scoring::referenced_question_ids(&submission.answers);
    let questions = Question::find_by_ids(pool, &question_ids).await?;
    let details = scoring::answer_details(&submission.answers, &questions);

    Ok((submission, details))
}

/// Retrieves a stored result.
///
/// Score, total and percentage are the values frozen at submission time;
/// the answer details reflect the questions as they are now.
#[utoipa::path(
    get,
    path = "/api/v1/quiz/results/{id}",
    tag = "Quiz",
    params(("id" = i64, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Stored result", body = SubmissionResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Quiz result not found")
    )
)]
pub async fn get_result(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id.map_err(|_| invalid_result_id())?;
    let (submission, details) = load_result(&pool, id).await?;

    Ok(ApiResponse::success(
        SubmissionResponse::new(submission, details),
        "Quiz result retrieved successfully",
    ))
}

/// Retrieves a stored result with correct/wrong counts and a letter grade.
#[utoipa::path(
    get,
    path = "/api/v1/quiz/results/{id}/report",
    tag = "Quiz",
    params(("id" = i64, Path, description = "Submission id")),
    responses(
        (status = 200, description = "Graded result", body = QuizReport),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Quiz result not found")
    )
)]
pub async fn get_result_report(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id.map_err(|_| invalid_result_id())?;
    let (submission, details) = load_result(&pool, id).await?;
    let stats = scoring::summarize(&details, submission.percentage);

    let report = QuizReport {
        id: submission.id,
        user_id: submission.user_id,
        score: submission.score,
        total: submission.total,
        percentage: submission.percentage,
        correct_answers: stats.correct_answers,
        wrong_answers: stats.wrong_answers,
        time_spent: submission.time_spent,
        answers: details,
        grade: stats.grade,
        created_at: submission.created_at,
    };

    Ok(ApiResponse::success(report, "Quiz report retrieved successfully"))
}

/// Aggregate statistics over all submissions.
#[utoipa::path(
    get,
    path = "/api/v1/quiz/stats",
    tag = "Quiz",
    responses((status = 200, description = "Submission statistics", body = QuizStats))
)]
pub async fn get_stats(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let stats = Submission::stats(&pool).await.map_err(|e| {
        tracing::error!("Failed to compute quiz stats: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(ApiResponse::success(stats, "Quiz statistics retrieved successfully"))
}
