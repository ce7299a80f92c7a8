use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::database::models::sample::{NewSampleId, Sample, SampleNew, SampleUpdate};
use crate::database::samples;
use crate::error::ApiError;
use crate::matcher;
use crate::middleware::auth::AuthUser;

#[derive(Debug, Deserialize)]
pub struct SampleFilter {
    pub user_id: Option<i64>,
    pub card_id: Option<i64>,
}

/// GET /v1/samples - list samples, optionally filtered by owner and/or card
pub async fn samples_get(
    Query(filter): Query<SampleFilter>,
) -> Result<Json<Vec<Sample>>, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    let samples = samples::list(&mut conn, filter.user_id, filter.card_id).await?;

    Ok(Json(samples))
}

/// GET /v1/samples/:id - a single sample or 404
pub async fn sample_get(Path(id): Path<i64>) -> Result<Json<Sample>, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    let sample = samples::get(&mut conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Sample with given ID not found: {}", id)))?;

    Ok(Json(sample))
}

/// POST /v1/samples - insert a sample and report the assigned id
pub async fn samples_post(
    Extension(caller): Extension<AuthUser>,
    Json(payload): Json<SampleNew>,
) -> Result<Json<NewSampleId>, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    let id = samples::insert(&mut conn, &payload).await?;

    tracing::debug!(caller = caller.user_id, "sample {} created", id);
    matcher::sample_created(&Sample {
        id,
        user_id: payload.user_id,
        card_id: payload.card_id,
        state: payload.state,
        wts: payload.wts,
    });

    Ok(Json(NewSampleId { id }))
}

/// PATCH /v1/samples/:id - overwrite only the fields present in the body
pub async fn sample_patch(
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<SampleUpdate>,
) -> Result<Json<Sample>, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    let sample = samples::update(&mut conn, id, &payload).await?;

    tracing::debug!(caller = caller.user_id, "sample {} updated", id);
    matcher::sample_updated(&sample);

    Ok(Json(sample))
}

/// DELETE /v1/samples/:id
pub async fn sample_delete(
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    samples::delete(&mut conn, id).await?;

    tracing::debug!(caller = caller.user_id, "sample {} deleted", id);

    Ok(StatusCode::OK)
}
