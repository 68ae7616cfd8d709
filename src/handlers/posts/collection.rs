use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::api::extract::AppJson;
use crate::database::models::post::{CreatePost, Post};
use crate::database::repository::PostRepository;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::AppState;

/// GET /posts - list all posts
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = PostRepository::new(state.pool.clone()).list().await?;
    Ok(Json(posts))
}

/// POST /posts - create a post, returns 201 with the assigned id
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppJson(fields): AppJson<CreatePost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = PostRepository::new(state.pool.clone()).create(fields).await?;
    tracing::info!(user_id = user.user_id, post_id = post.id, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}
