use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::database::models::wish::{NewWishId, Wish, WishNew, WishUpdate};
use crate::database::wishes;
use crate::error::ApiError;
use crate::matcher;
use crate::middleware::auth::AuthUser;

#[derive(Debug, Deserialize)]
pub struct WishFilter {
    pub user_id: Option<i64>,
    pub card_id: Option<i64>,
}

/// GET /v1/wishes - list wishes, optionally filtered by owner and/or card
pub async fn wishes_get(Query(filter): Query<WishFilter>) -> Result<Json<Vec<Wish>>, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    let wishes = wishes::list(&mut conn, filter.user_id, filter.card_id).await?;

    Ok(Json(wishes))
}

/// GET /v1/wishes/:id - a single wish or 404
pub async fn wish_get(Path(id): Path<i64>) -> Result<Json<Wish>, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    let wish = wishes::get(&mut conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Wish with given ID not found: {}", id)))?;

    Ok(Json(wish))
}

/// POST /v1/wishes - insert a wish and report the assigned id
pub async fn wishes_post(
    Extension(caller): Extension<AuthUser>,
    Json(payload): Json<WishNew>,
) -> Result<Json<NewWishId>, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    let id = wishes::insert(&mut conn, &payload).await?;

    tracing::debug!(caller = caller.user_id, "wish {} created", id);
    matcher::wish_created(&Wish {
        id,
        user_id: payload.user_id,
        card_id: payload.card_id,
    });

    Ok(Json(NewWishId { id }))
}

/// PATCH /v1/wishes/:id - overwrite only the fields present in the body
pub async fn wish_patch(
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<WishUpdate>,
) -> Result<Json<Wish>, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    let wish = wishes::update(&mut conn, id, &payload).await?;

    tracing::debug!(caller = caller.user_id, "wish {} updated", id);
    matcher::wish_updated(&wish);

    Ok(Json(wish))
}

/// DELETE /v1/wishes/:id
pub async fn wish_delete(
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut conn = DatabaseManager::acquire().await?;
    wishes::delete(&mut conn, id).await?;

    tracing::debug!(caller = caller.user_id, "wish {} deleted", id);

    Ok(StatusCode::OK)
}
