use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller context extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub token_id: String,
}

impl TryFrom<AccessToken> for AuthUser {
    type Error = ApiError;

    fn try_from(claims: AccessToken) -> Result<Self, Self::Error> {
        // A non-numeric subject cannot belong to a token we issued.
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| ApiError::unauthorized("Invalid or expired token."))?;

        Ok(Self {
            user_id,
            token_id: claims.jti,
        })
    }
}

/// Bearer-token authentication middleware for protected routes. Validates
/// the token and injects the caller context into request extensions.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers())?;

    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::debug!("rejected bearer token: {}", e);
        ApiError::unauthorized("Invalid or expired token.")
    })?;

    let auth_user = AuthUser::try_from(claims)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Pull the bearer credential out of the Authorization header
fn extract_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let (scheme, credential) = authorization.split_once(' ').unwrap_or((authorization, ""));

    if credential.trim().is_empty() {
        return Err(ApiError::unauthorized("Missing authorization credentials."));
    }
    if scheme != "Bearer" {
        return Err(ApiError::unauthorized("Invalid authentication scheme."));
    }

    Ok(credential.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(v).expect("header"));
        }
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        let err = extract_bearer(&headers_with(None)).expect_err("must reject");
        assert_eq!(err.message(), "Missing authorization credentials.");
    }

    #[test]
    fn empty_header_is_rejected() {
        let err = extract_bearer(&headers_with(Some(""))).expect_err("must reject");
        assert_eq!(err.message(), "Missing authorization credentials.");
    }

    #[test]
    fn scheme_without_credential_is_rejected() {
        let err = extract_bearer(&headers_with(Some("Bearer"))).expect_err("must reject");
        assert_eq!(err.message(), "Missing authorization credentials.");
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let err = extract_bearer(&headers_with(Some("Basic dXNlcjpwYXNz"))).expect_err("must reject");
        assert_eq!(err.message(), "Invalid authentication scheme.");
    }

    #[test]
    fn bearer_credential_is_extracted() {
        let token = extract_bearer(&headers_with(Some("Bearer abc.def.ghi"))).expect("must accept");
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let claims = AccessToken {
            iss: crate::auth::ISSUER.to_string(),
            sub: "not-a-number".to_string(),
            aud: crate::auth::AUDIENCE.to_string(),
            exp: 0,
            iat: 0,
            nbf: 0,
            jti: "test".to_string(),
        };
        assert!(AuthUser::try_from(claims).is_err());
    }
}
