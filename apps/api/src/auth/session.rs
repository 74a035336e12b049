//! Web-session plumbing: the session layer and the `CurrentUser` capability.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::user::SessionUser;

/// Key under which the logged-in `SessionUser` is stored.
pub const SESSION_USER_KEY: &str = "user";

/// Builds the cookie-backed session layer. Sessions expire after the
/// configured period of inactivity.
pub fn session_layer(config: &Config) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            config.session_inactivity_minutes,
        )))
}

/// Proof that the request carries an authenticated session.
///
/// Handlers that take a `CurrentUser` never run for anonymous requests:
/// extraction fails with a redirect to `/login`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match session.get::<SessionUser>(SESSION_USER_KEY).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => Err(Redirect::to("/login").into_response()),
            Err(e) => Err(AppError::from(e).into_response()),
        }
    }
}
