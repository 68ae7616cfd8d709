use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::api::extract::AppJson;
use crate::database::models::post::{Post, UpdatePost};
use crate::database::repository::PostRepository;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::AppState;

/// GET /posts/:id - fetch a single post by id
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Post>, ApiError> {
    let post = PostRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(post))
}

/// PUT/PATCH /posts/:id - update a post; absent fields are left unchanged
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    AppJson(fields): AppJson<UpdatePost>,
) -> Result<Json<Post>, ApiError> {
    let post = PostRepository::new(state.pool.clone()).update(id, fields).await?;
    tracing::info!(user_id = user.user_id, post_id = id, "post updated");
    Ok(Json(post))
}

/// DELETE /posts/:id - remove a post
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    PostRepository::new(state.pool.clone()).delete(id).await?;
    tracing::info!(user_id = user.user_id, post_id = id, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}
