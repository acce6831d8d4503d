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
    entity::{IMAGE_SCHEMA, Image, ImageInput, ImagePatch},
    page::PageRequest,
};

pub async fn create_image(
    State(state): State<AppState>,
    Json(input): Json<ImageInput>,
) -> Result<impl IntoResponse, ApiError> {
    if input.id.is_some() {
        return Err(ApiError::BadRequest(
            "a new image cannot already have an id".to_string(),
        ));
    }

    let image = app::save_image(&state.db, input).await?;
    tracing::debug!(id = image.id, "created image");

    let location = format!("/api/images/{}", image.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(image),
    ))
}

pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ImageInput>,
) -> Result<Json<Image>, ApiError> {
    if input.id.is_some_and(|body_id| body_id != id) {
        return Err(ApiError::BadRequest(
            "body id does not match the path id".to_string(),
        ));
    }

    let image = app::update_image(&state.db, id, input).await?;

    Ok(Json(image))
}

pub async fn patch_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ImagePatch>,
) -> Result<Json<Image>, ApiError> {
    let image = app::partial_update_image(&state.db, id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("image {id} not found")))?;

    Ok(Json(image))
}

pub async fn get_all_images(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let pairs = params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let criteria = Criteria::from_params(&IMAGE_SCHEMA, pairs.clone())?;
    let request = PageRequest::from_params(&IMAGE_SCHEMA, pairs)?;

    let page = app::find_images(&state.db, &criteria, &request).await?;
    let headers = pagination::pagination_headers(&uri, &page);

    Ok((headers, Json(page.items)))
}

pub async fn count_images(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<u64>, ApiError> {
    let pairs = params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let criteria = Criteria::from_params(&IMAGE_SCHEMA, pairs)?;

    let total = app::count_images(&state.db, &criteria).await?;

    Ok(Json(total))
}

pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Image>, ApiError> {
    let image = app::find_image(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("image {id} not found")))?;

    Ok(Json(image))
}

pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app::delete_image(&state.db, id).await?;
    tracing::debug!(id, "deleted image");

    Ok(StatusCode::NO_CONTENT)
}
