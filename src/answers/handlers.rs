use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    answers::{
        dto::{
            AnswerListResponse, CreatedAnswerResponse, PostAnswerRequest, StatusMessage,
            UpdateAnswerRequest,
        },
        repo_types::Answer,
    },
    auth::jwt::AuthUser,
    error::ApiError,
    questions::repo_types::Question,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    // GET/POST address a question id, PUT/DELETE an answer id; the segment
    // shape is the same so they share one route.
    Router::new().route(
        "/:id",
        get(get_answers)
            .post(post_answer)
            .put(update_answer)
            .delete(delete_answer),
    )
}

#[instrument(skip(state))]
pub async fn get_answers(
    State(state): State<AppState>,
    AuthUser(_principal): AuthUser,
    Path(questionid): Path<Uuid>,
) -> Result<Json<AnswerListResponse>, ApiError> {
    let answers = Answer::list_by_question(&state.db, questionid).await?;
    Ok(Json(AnswerListResponse {
        status: "success",
        questionid,
        total_answers: answers.len(),
        data: answers,
    }))
}

#[instrument(skip(state, payload))]
pub async fn post_answer(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(questionid): Path<Uuid>,
    Json(payload): Json<PostAnswerRequest>,
) -> Result<(StatusCode, Json<CreatedAnswerResponse>), ApiError> {
    if payload.answer.trim().is_empty() {
        return Err(ApiError::Validation(
            "userid, questionid, and answer are required".into(),
        ));
    }

    if !Question::exists(&state.db, questionid).await? {
        return Err(ApiError::NotFound(
            "Cannot post answer: question does not exist".into(),
        ));
    }

    let answer = Answer::create(&state.db, principal.userid, questionid, &payload.answer).await?;

    info!(answerid = %answer.answerid, %questionid, "answer posted");
    Ok((
        StatusCode::CREATED,
        Json(CreatedAnswerResponse {
            status: "success",
            message: "Answer posted successfully",
            data: answer,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_answer(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(answerid): Path<Uuid>,
    Json(payload): Json<UpdateAnswerRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let existing = Answer::find_by_id(&state.db, answerid)
        .await?
        .ok_or_else(|| ApiError::NotFound("Answer not found or already deleted".into()))?;

    if existing.userid != principal.userid {
        return Err(ApiError::Forbidden(
            "You are not allowed to update this answer".into(),
        ));
    }

    let text = payload
        .answer
        .filter(|a| !a.trim().is_empty())
        .unwrap_or(existing.answer);
    Answer::update(&state.db, answerid, &text).await?;

    info!(%answerid, "answer updated");
    Ok(Json(StatusMessage {
        status: "success",
        message: "Answer updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn delete_answer(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(answerid): Path<Uuid>,
) -> Result<Json<StatusMessage>, ApiError> {
    let existing = Answer::find_by_id(&state.db, answerid)
        .await?
        .ok_or_else(|| ApiError::NotFound("Answer not found or already deleted".into()))?;

    if existing.userid != principal.userid {
        return Err(ApiError::Forbidden(
            "You are not allowed to delete this answer".into(),
        ));
    }

    Answer::soft_delete(&state.db, answerid).await?;

    info!(%answerid, "answer soft-deleted");
    Ok(Json(StatusMessage {
        status: "success",
        message: "Answer deleted successfully",
    }))
}
