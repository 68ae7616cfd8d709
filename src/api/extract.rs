use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, FieldError};

/// JSON body extractor that reports schema violations as a 422 with
/// location-tagged field errors instead of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(body_rejection(rejection)),
        }
    }
}

fn body_rejection(rejection: JsonRejection) -> ApiError {
    let msg = rejection.body_text();
    let loc = match missing_field(&msg) {
        Some(field) => vec!["body".to_string(), field.to_string()],
        None => vec!["body".to_string()],
    };

    ApiError::unprocessable_entity("Request body failed validation", vec![FieldError { loc, msg }])
}

/// serde reports absent required fields as ``missing field `name```.
fn missing_field(text: &str) -> Option<&str> {
    let rest = text.split("missing field `").nth(1)?;
    rest.split('`').next()
}
