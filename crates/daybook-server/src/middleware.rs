//! Bearer-token authentication middleware.
//!
//! Two-step rejection, per request: a missing token is a 401, a token
//! that fails verification is a 403. On success the caller's identity
//! is attached to the request and discarded when it completes. Token
//! contents are never logged.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use daybook_auth::token::{self, Identity};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = {
        let token = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(token::extract_bearer_token)
            .ok_or(ApiError::MissingToken)?;

        let claims =
            token::verify_access(token, &state.auth_config).map_err(|_| ApiError::InvalidToken)?;
        Identity::try_from(claims).map_err(|_| ApiError::InvalidToken)?
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
