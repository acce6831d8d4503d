use crate::{AppState, error::ApiError, pagination};
use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use quizbank::{
    app,
    criteria::Criteria,
    entity::{QUESTION_SCHEMA, Question, QuestionInput, QuestionPatch},
    page::{DEFAULT_PAGE_SIZE, PageRequest},
};
use serde::Deserialize;

pub async fn create_question(
    State(state): State<AppState>,
    Json(input): Json<QuestionInput>,
) -> Result<impl IntoResponse, ApiError> {
    if input.id.is_some() {
        return Err(ApiError::BadRequest(
            "a new question cannot already have an id".to_string(),
        ));
    }

    let question = app::save_question(&state.db, input).await?;
    tracing::debug!(id = question.id, "created question");

    let location = format!("/api/questions/{}", question.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(question),
    ))
}

pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<QuestionInput>,
) -> Result<Json<Question>, ApiError> {
    if input.id.is_some_and(|body_id| body_id != id) {
        return Err(ApiError::BadRequest(
            "body id does not match the path id".to_string(),
        ));
    }

    let question = app::update_question(&state.db, id, input).await?;

    Ok(Json(question))
}

pub async fn patch_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<QuestionPatch>,
) -> Result<Json<Question>, ApiError> {
    let question = app::partial_update_question(&state.db, id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("question {id} not found")))?;

    Ok(Json(question))
}

pub async fn get_all_questions(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let pairs = params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let criteria = Criteria::from_params(&QUESTION_SCHEMA, pairs.clone())?;
    let request = PageRequest::from_params(&QUESTION_SCHEMA, pairs)?;

    let page = app::find_questions(&state.db, &criteria, &request).await?;
    let headers = pagination::pagination_headers(&uri, &page);

    Ok((headers, Json(page.items)))
}

pub async fn count_questions(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<u64>, ApiError> {
    let pairs = params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let criteria = Criteria::from_params(&QUESTION_SCHEMA, pairs)?;

    let total = app::count_questions(&state.db, &criteria).await?;

    Ok(Json(total))
}

pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Question>, ApiError> {
    let question = app::find_question(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("question {id} not found")))?;

    Ok(Json(question))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app::delete_question(&state.db, id).await?;
    tracing::debug!(id, "deleted question");

    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------
// Legacy routes, kept with their historical names and camelCase
// parameters. The mutating ones answer 200 with an empty body.
// ----------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionParams {
    quiz_id: i64,
    index: Option<u32>,
    page_size: Option<u32>,
}

pub async fn legacy_list_questions(
    State(state): State<AppState>,
    Query(params): Query<ListQuestionParams>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let questions = app::list_questions(
        &state.db,
        params.quiz_id,
        params.index.unwrap_or(0),
        params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .await?;

    Ok(Json(questions))
}

pub async fn legacy_get_question(
    State(state): State<AppState>,
    Path(qid): Path<i64>,
) -> Result<Json<Question>, ApiError> {
    let question = app::find_question(&state.db, qid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("question {qid} not found")))?;

    Ok(Json(question))
}

pub async fn legacy_add_question(
    State(state): State<AppState>,
    Json(input): Json<QuestionInput>,
) -> Result<StatusCode, ApiError> {
    let question = app::save_question(&state.db, input).await?;
    tracing::debug!(id = question.id, "created question");

    Ok(StatusCode::OK)
}

pub async fn legacy_edit_question(
    State(state): State<AppState>,
    Json(input): Json<QuestionInput>,
) -> Result<StatusCode, ApiError> {
    let id = input
        .id
        .ok_or_else(|| ApiError::BadRequest("question id is required".to_string()))?;

    app::update_question(&state.db, id, input).await?;

    Ok(StatusCode::OK)
}

pub async fn legacy_delete_question(
    State(state): State<AppState>,
    Path(qid): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app::delete_question(&state.db, qid).await?;

    Ok(StatusCode::OK)
}
