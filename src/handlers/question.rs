// src/handlers/question.rs

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use rand::seq::SliceRandom;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::{DEFAULT_RANDOM_COUNT, MAX_RANDOM_COUNT},
    error::AppError,
    models::question::{Question, QuestionRequest, QuestionResponse, RandomQuestionsParams},
    utils::response::ApiResponse,
};

fn invalid_question_id() -> AppError {
    AppError::BadRequest("Invalid question ID".to_string())
}

fn invalid_count() -> AppError {
    AppError::BadRequest(format!(
        "Invalid count parameter. Must be between 1 and {}",
        MAX_RANDOM_COUNT
    ))
}

/// Lists every question in storage order.
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    tag = "Questions",
    responses((status = 200, description = "All questions", body = [QuestionResponse]))
)]
pub async fn list_questions(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let questions = Question::fetch_all(&pool).await.map_err(|e| {
        tracing::error!("Failed to fetch questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let questions: Vec<QuestionResponse> = questions.into_iter().map(Into::into).collect();

    Ok(ApiResponse::success(questions, "Questions retrieved successfully"))
}

/// Returns `count` questions drawn uniformly at random without repeats.
///
/// The whole set is shuffled on every call, so asking for more questions
/// than exist simply returns all of them in random order.
#[utoipa::path(
    get,
    path = "/api/v1/questions/random",
    tag = "Questions",
    params(RandomQuestionsParams),
    responses(
        (status = 200, description = "Random subset", body = [QuestionResponse]),
        (status = 400, description = "count outside 1..=50")
    )
)]
pub async fn random_questions(
    State(pool): State<SqlitePool>,
    params: Result<Query<RandomQuestionsParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params.map_err(|_| invalid_count())?;
    params.validate().map_err(|_| invalid_count())?;
    let count = params.count.unwrap_or(DEFAULT_RANDOM_COUNT) as usize;

    let mut questions = Question::fetch_all(&pool).await.map_err(|e| {
        tracing::error!("Failed to fetch questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    questions.shuffle(&mut rand::thread_rng());
    questions.truncate(count);

    let questions: Vec<QuestionResponse> = questions.into_iter().map(Into::into).collect();

    Ok(ApiResponse::success(
        questions,
        "Random questions retrieved successfully",
    ))
}

/// Retrieves a single question by ID.
#[utoipa::path(
    get,
    path = "/api/v1/questions/{id}",
    tag = "Questions",
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "The question", body = QuestionResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Question not found")
    )
)]
pub async fn get_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id.map_err(|_| invalid_question_id())?;

    let question = Question::find(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(ApiResponse::success(
        QuestionResponse::from(question),
        "Question retrieved successfully",
    ))
}

/// Creates a new question.
#[utoipa::path(
    post,
    path = "/api/v1/questions",
    tag = "Questions",
    request_body = QuestionRequest,
    responses(
        (status = 201, description = "Question created", body = QuestionResponse),
        (status = 422, description = "Invalid question")
    )
)]
pub async fn create_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let id = Question::insert(&pool, &req).await.map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let question = Question::find(&pool, id)
        .await?
        .ok_or_else(|| AppError::InternalServerError(format!("Question {} vanished after insert", id)))?;

    tracing::info!(question_id = id, "Question created");

    Ok((
        StatusCode::CREATED,
        ApiResponse::success(QuestionResponse::from(question), "Question created successfully"),
    ))
}

/// Replaces an existing question.
///
/// Submissions that reference it keep their stored score, but their answer
/// details are rebuilt from the new text and options on the next read.
#[utoipa::path(
    put,
    path = "/api/v1/questions/{id}",
    tag = "Questions",
    params(("id" = i64, Path, description = "Question id")),
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Question updated", body = QuestionResponse),
        (status = 404, description = "Question not found"),
        (status = 422, description = "Invalid question")
    )
)]
pub async fn update_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id.map_err(|_| invalid_question_id())?;
    let Json(req) = payload?;
    req.validate()?;

    if !Question::update(&pool, id, &req).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    let question = Question::find(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    tracing::info!(question_id = id, "Question updated");

    Ok(ApiResponse::success(
        QuestionResponse::from(question),
        "Question updated successfully",
    ))
}
