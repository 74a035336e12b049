//! Resume Assembly: orchestrates one `/generate_resume` submission.
//!
//! Flow: validate form → parse skills/certificates → completion call →
//!       bullet post-processing → transactional save → return for rendering.
//!
//! Nothing is written unless the completion call succeeds, and nothing is
//! called or written unless the form validates.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::ASSISTANT_SYSTEM;
use crate::llm_client::CompletionProvider;
use crate::models::resume::{Certificate, Education, Experience, ResumeSubmission, SaveReport, Skill};
use crate::models::user::SessionUser;
use crate::resume::form::ResumeForm;
use crate::resume::parsing::{experience_bullets, parse_certificates, parse_skills};
use crate::resume::prompts::{fill_template, EXPERIENCE_PROMPT_TEMPLATE, NOTES_FRAGMENT};
use crate::store::{BatchPolicy, Store};

/// Everything the generated-resume page needs.
#[derive(Debug, Clone)]
pub struct GeneratedResume {
    pub education: Education,
    pub experience: Experience,
    pub bullets: Vec<String>,
    pub skills: Vec<Skill>,
    pub certificates: Vec<Certificate>,
    pub linked_url: Option<String>,
    pub report: SaveReport,
}

/// Runs the full pipeline for one submission.
pub async fn assemble_resume(
    store: &dyn Store,
    completion: &dyn CompletionProvider,
    policy: BatchPolicy,
    user: &SessionUser,
    form: ResumeForm,
) -> Result<GeneratedResume, AppError> {
    // Step 1: Validate and parse everything that needs no I/O
    form.validate(user)?;

    let skills = parse_skills(&form.skills);
    if skills.is_empty() {
        return Err(AppError::Validation(
            "Skills must list at least one entry, e.g. 'Python:Expert'".to_string(),
        ));
    }

    let certificates = parse_certificates(
        &form.certificate_names,
        &form.issuing_organizations,
        &form.issue_dates,
        &form.expiration_dates,
    )?;

    // Step 2: Generate experience bullets
    let prompt = build_experience_prompt(&form);
    info!("Requesting experience bullets for user {}", user.id);
    let reply = completion.complete(&prompt, ASSISTANT_SYSTEM).await?;
    let bullets = experience_bullets(&reply);
    info!("Generated {} bullets for user {}", bullets.len(), user.id);

    let experience = Experience {
        company_name: form.company_name,
        role: form.role,
        start_date: form.experience_start_date,
        end_date: form.experience_end_date,
        description: bullets.join(" "),
    };

    // Step 3: Persist Education → Experience → Skills → Certificates → Resume
    let report = store
        .save_resume(
            &ResumeSubmission {
                user,
                education: &form.education,
                experience: &experience,
                skills: &skills,
                certificates: &certificates,
                raw_skills: &form.skills,
                linked_url: form.linked_url.as_deref(),
            },
            policy,
        )
        .await?;

    Ok(GeneratedResume {
        education: form.education,
        experience,
        bullets,
        skills,
        certificates,
        linked_url: form.linked_url,
        report,
    })
}

/// Fills the experience prompt template from the submitted form.
fn build_experience_prompt(form: &ResumeForm) -> String {
    let notes = form
        .description
        .as_deref()
        .map(|description| fill_template(NOTES_FRAGMENT, &[("description", description)]))
        .unwrap_or_default();

    fill_template(
        EXPERIENCE_PROMPT_TEMPLATE,
        &[
            ("company_name", form.company_name.as_str()),
            ("role", form.role.as_str()),
            ("start_date", form.experience_start_date.as_str()),
            ("end_date", form.experience_end_date.as_str()),
            ("degree", form.education.degree.as_str()),
            ("institution", form.education.institution.as_str()),
            ("skills", form.skills.as_str()),
            ("job_description", form.job_description.as_str()),
            ("notes", notes.as_str()),
        ],
    )
}
