// src/docs.rs

use axum::{Json, response::IntoResponse};
use utoipa::OpenApi;

use crate::{
    handlers::{health, question, quiz},
    models::{
        question::{QuestionRequest, QuestionResponse},
        submission::{QuizReport, QuizStats, SubmissionResponse, SubmitQuizRequest},
    },
    scoring::{AnswerDetail, Grade},
};

/// OpenAPI description of the HTTP API.
///
/// Response bodies listed per path are the `data` field of the
/// `{success, message, data, error}` envelope.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        question::list_questions,
        question::random_questions,
        question::get_question,
        question::create_question,
        question::update_question,
        quiz::submit_quiz,
        quiz::get_result,
        quiz::get_result_report,
        quiz::get_stats,
    ),
    components(schemas(
        health::HealthStatus,
        QuestionRequest,
        QuestionResponse,
        SubmitQuizRequest,
        SubmissionResponse,
        AnswerDetail,
        Grade,
        QuizReport,
        QuizStats,
    )),
    tags(
        (name = "System", description = "System endpoints"),
        (name = "Questions", description = "Question retrieval and authoring"),
        (name = "Quiz", description = "Submission scoring and results")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
