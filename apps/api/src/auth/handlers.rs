//! Axum route handlers for signup, login, logout and the resume gate.

use anyhow::Context;
use askama::Template;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use chrono::Utc;
use tower_sessions::{session, Session};
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{CurrentUser, SESSION_USER_KEY};
use crate::errors::AppError;
use crate::forms::FormFields;
use crate::models::user::{NewUser, SessionUser, User};
use crate::state::AppState;
use crate::views::{LoginPage, ResumeFormPage, SignupPage};

/// True when `email` has a local part and ends with `suffix`, ignoring ASCII case.
fn has_required_suffix(email: &str, suffix: &str) -> bool {
    email.len() > suffix.len()
        && email
            .to_ascii_lowercase()
            .ends_with(&suffix.to_ascii_lowercase())
}

/// GET /login
pub async fn handle_login_page() -> Result<Html<String>, AppError> {
    Ok(Html(LoginPage {}.render()?))
}

/// GET /signup
pub async fn handle_signup_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = SignupPage {
        email_suffix: &state.config.email_domain_suffix,
    };
    Ok(Html(page.render()?))
}

/// POST /signup
///
/// Creates the account and sends the user to the login form. No session is
/// started here.
pub async fn handle_signup(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = FormFields::new(pairs);
    let suffix = &state.config.email_domain_suffix;

    let email = form.text("email");
    if !has_required_suffix(email, suffix) {
        return Err(AppError::Validation(format!(
            "Please enter a valid email ending in {suffix}"
        )));
    }

    let password = form.raw("password").unwrap_or_default().to_string();
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("password hashing task failed")??;

    let new_user = NewUser {
        first_name: form.text("firstName").to_string(),
        last_name: form.text("lastName").to_string(),
        username: form.text("username").to_string(),
        email: email.to_string(),
        hashed_password,
        phone: form.text("phone").to_string(),
    };

    let user_id = state.store.insert_user(&new_user).await?;
    info!("Registered user {} ({})", new_user.username, user_id);

    Ok(Redirect::to("/login"))
}

/// POST /login
///
/// The session record is written before the web session is populated, so a
/// failed write never leaves a half-logged-in user. If populating the web
/// session fails, the record is closed again.
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = FormFields::new(pairs);
    let email = form.text("email");
    let password = form.raw("password").unwrap_or_default().to_string();

    let user = state
        .store
        .find_user_by_email(email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let stored_hash = user.hashed_password.clone();
    let password_matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .context("password verification task failed")??;
    if !password_matches {
        return Err(AppError::Unauthorized);
    }

    let record = state
        .store
        .open_session(user.id, &user.email, Utc::now())
        .await?;

    if let Err(e) = remember_user(&session, &user).await {
        // The login never completed; don't leave its record open.
        if let Err(close_err) = state
            .store
            .close_session(user.id, &user.email, Utc::now())
            .await
        {
            warn!(
                "Could not close session record {} after a failed login: {close_err}",
                record.id
            );
        }
        return Err(e.into());
    }

    info!("User {} logged in (session record {})", user.id, record.id);
    Ok(Redirect::to("/resume"))
}

/// Rotates the session id and stores the user's identity in it.
async fn remember_user(session: &Session, user: &User) -> Result<(), session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, SessionUser::from(user)).await
}

/// GET /logout
///
/// Anonymous requests are a no-op. The session survives if the session
/// record cannot be closed.
pub async fn handle_logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let Some(user) = session.get::<SessionUser>(SESSION_USER_KEY).await? else {
        return Ok(Redirect::to("/"));
    };

    match state
        .store
        .close_session(user.id, &user.email, Utc::now())
        .await?
    {
        Some(record) => info!("User {} logged out (session record {})", user.id, record.id),
        None => warn!("User {} logged out with no open session record", user.id),
    }

    session.flush().await?;
    Ok(Redirect::to("/"))
}

/// GET /resume
pub async fn handle_resume_page(
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    Ok(Html(ResumeFormPage { user: &user }.render()?))
}
