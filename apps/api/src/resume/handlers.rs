//! Axum route handlers for resume assembly.

use askama::Template;
use axum::{extract::State, response::Html, Form};
use tracing::warn;

use crate::auth::session::CurrentUser;
use crate::errors::AppError;
use crate::forms::FormFields;
use crate::resume::assembly::assemble_resume;
use crate::resume::form::ResumeForm;
use crate::state::AppState;
use crate::views::GeneratedResumePage;

/// POST /generate_resume
///
/// Validates the form, drafts experience bullets, saves every resume entity
/// in one transaction and renders the generated resume.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let form = ResumeForm::from_fields(&FormFields::new(pairs));

    let resume = assemble_resume(
        state.store.as_ref(),
        state.completion.as_ref(),
        state.config.batch_policy,
        &user,
        form,
    )
    .await?;

    if resume.report.skills_skipped + resume.report.certificates_skipped > 0 {
        warn!(
            "Resume for user {} saved partially: {} skills and {} certificates skipped",
            user.id, resume.report.skills_skipped, resume.report.certificates_skipped
        );
    }

    let page = GeneratedResumePage {
        user: &user,
        education: &resume.education,
        experience: &resume.experience,
        bullets: &resume.bullets,
        skills: &resume.skills,
        linked_url: resume.linked_url.as_deref().unwrap_or_default(),
        certificates: &resume.certificates,
    };

    Ok(Html(page.render()?))
}
