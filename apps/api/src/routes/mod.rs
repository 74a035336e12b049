pub mod health;
pub mod home;

use axum::{
    routing::{get, post},
    Router,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::auth::handlers;
use crate::resume::handlers::handle_generate_resume;
use crate::state::AppState;

pub fn build_router(state: AppState, sessions: SessionManagerLayer<MemoryStore>) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(home::home_handler))
        // Auth
        .route(
            "/signup",
            get(handlers::handle_signup_page).post(handlers::handle_signup),
        )
        .route(
            "/login",
            get(handlers::handle_login_page).post(handlers::handle_login),
        )
        .route("/logout", get(handlers::handle_logout))
        // Resume
        .route("/resume", get(handlers::handle_resume_page))
        .route("/generate_resume", post(handle_generate_resume))
        .layer(sessions)
        .with_state(state)
}
