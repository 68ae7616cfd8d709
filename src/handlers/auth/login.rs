use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::extract::AppJson;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// POST /auth/login - issue a bearer token for a user
///
/// Credential verification lives outside this service; this endpoint owns
/// token issuance only.
pub async fn login_post(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let access_token = state.tokens.issue(payload.user_id)?;
    Ok(Json(LoginResponse { access_token }))
}
