//! JWT Extractor
//!
//! Custom extractor for handlers that need the acting user

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::middleware::{authenticate, token_from_headers};
use crate::core::ServerState;
use crate::security_log;

/// JWT Auth Extractor
///
/// Reuses the user injected by `require_auth`; validates the token itself
/// when the route is not behind the middleware.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = match token_from_headers(&parts.headers)? {
            Some(token) => token.to_string(),
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                return Err(AppError::unauthorized());
            }
        };

        let user = authenticate(state, &token, &parts.uri)?;

        // Store in extensions for potential reuse
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
