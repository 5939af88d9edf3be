use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    questions::{
        dto::{
            CreateQuestionRequest, CreatedQuestionResponse, QuestionListResponse,
            QuestionResponse, StatusMessage, UpdateQuestionRequest,
        },
        repo_types::Question,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_questions).post(post_question))
        .route(
            "/:questionid",
            get(get_question).put(update_question).delete(delete_question),
        )
}

#[instrument(skip(state))]
pub async fn list_questions(
    State(state): State<AppState>,
    AuthUser(_principal): AuthUser,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let questions = Question::list_all(&state.db).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound("No questions found".into()));
    }
    Ok(Json(QuestionListResponse {
        status: "success",
        total_questions: questions.len(),
        data: questions,
    }))
}

#[instrument(skip(state))]
pub async fn get_question(
    State(state): State<AppState>,
    AuthUser(_principal): AuthUser,
    Path(questionid): Path<Uuid>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = Question::find_with_author(&state.db, questionid)
        .await?
        .ok_or_else(|| ApiError::NotFound("Question not found".into()))?;
    Ok(Json(QuestionResponse {
        status: "success",
        data: question,
    }))
}

#[instrument(skip(state, payload))]
pub async fn post_question(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<CreatedQuestionResponse>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("Title is required.".into()));
    }
    if payload.description.trim().is_empty() {
        return Err(ApiError::Validation("Description is required.".into()));
    }
    if payload.tag.trim().is_empty() {
        return Err(ApiError::Validation("Tag is required.".into()));
    }

    let questionid = Uuid::new_v4();
    let question = Question::create(
        &state.db,
        questionid,
        principal.userid,
        &payload.title,
        &payload.tag,
        &payload.description,
    )
    .await?;

    info!(%questionid, userid = %principal.userid, "question created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedQuestionResponse {
            status: "success",
            message: "Question created successfully",
            data: question,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_question(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(questionid): Path<Uuid>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let existing = Question::find_by_id(&state.db, questionid)
        .await?
        .ok_or_else(|| ApiError::NotFound("Question not found or already deleted".into()))?;

    if existing.userid != principal.userid {
        return Err(ApiError::Forbidden(
            "You are not allowed to update this question".into(),
        ));
    }

    let title = payload
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(existing.title);
    let description = payload
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(existing.description);
    Question::update(&state.db, questionid, &title, &description).await?;

    info!(%questionid, "question updated");
    Ok(Json(StatusMessage {
        status: "success",
        message: "Question updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn delete_question(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(questionid): Path<Uuid>,
) -> Result<Json<StatusMessage>, ApiError> {
    let existing = Question::find_by_id(&state.db, questionid)
        .await?
        .ok_or_else(|| ApiError::NotFound("Question not found or already deleted".into()))?;

    if existing.userid != principal.userid {
        return Err(ApiError::Forbidden(
            "You are not allowed to delete this question".into(),
        ));
    }

    Question::soft_delete(&state.db, questionid).await?;

    info!(%questionid, "question soft-deleted");
    Ok(Json(StatusMessage {
        status: "success",
        message: "Question deleted successfully",
    }))
}
