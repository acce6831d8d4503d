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
    entity::{QUIZ_SCHEMA, Quiz, QuizInput, QuizPatch},
    page::PageRequest,
};

pub async fn create_quiz(
    State(state): State<AppState>,
    Json(input): Json<QuizInput>,
) -> Result<impl IntoResponse, ApiError> {
    if input.id.is_some() {
        return Err(ApiError::BadRequest(
            "a new quiz cannot already have an id".to_string(),
        ));
    }

    let quiz = app::save_quiz(&state.db, input).await?;
    tracing::debug!(id = quiz.id, "created quiz");

    let location = format!("/api/quizzes/{}", quiz.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(quiz),
    ))
}

pub async fn update_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<QuizInput>,
) -> Result<Json<Quiz>, ApiError> {
    if input.id.is_some_and(|body_id| body_id != id) {
        return Err(ApiError::BadRequest(
            "body id does not match the path id".to_string(),
        ));
    }

    let quiz = app::update_quiz(&state.db, id, input).await?;

    Ok(Json(quiz))
}

pub async fn patch_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<QuizPatch>,
) -> Result<Json<Quiz>, ApiError> {
    let quiz = app::partial_update_quiz(&state.db, id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quiz {id} not found")))?;

    Ok(Json(quiz))
}

pub async fn get_all_quizzes(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let pairs = params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let criteria = Criteria::from_params(&QUIZ_SCHEMA, pairs.clone())?;
    let request = PageRequest::from_params(&QUIZ_SCHEMA, pairs)?;

    let page = app::find_quizzes(&state.db, &criteria, &request).await?;
    let headers = pagination::pagination_headers(&uri, &page);

    Ok((headers, Json(page.items)))
}

pub async fn count_quizzes(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<u64>, ApiError> {
    let pairs = params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let criteria = Criteria::from_params(&QUIZ_SCHEMA, pairs)?;

    let total = app::count_quizzes(&state.db, &criteria).await?;

    Ok(Json(total))
}

pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Quiz>, ApiError> {
    let quiz = app::find_quiz(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quiz {id} not found")))?;

    Ok(Json(quiz))
}

pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app::delete_quiz(&state.db, id).await?;
    tracing::debug!(id, "deleted quiz");

    Ok(StatusCode::NO_CONTENT)
}
