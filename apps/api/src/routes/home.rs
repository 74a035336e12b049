use askama::Template;
use axum::response::Html;

use crate::errors::AppError;
use crate::views::IndexPage;

/// GET /
pub async fn home_handler() -> Result<Html<String>, AppError> {
    Ok(Html(IndexPage {}.render()?))
}
