//! Server-rendered pages. Templates live in `apps/api/templates`.

use askama::Template;

use crate::models::resume::{Certificate, Education, Experience, Skill};
use crate::models::user::SessionUser;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage<'a> {
    pub email_suffix: &'a str,
}

#[derive(Template)]
#[template(path = "resume.html")]
pub struct ResumeFormPage<'a> {
    pub user: &'a SessionUser,
}

#[derive(Template)]
#[template(path = "generated_resume.html")]
pub struct GeneratedResumePage<'a> {
    pub user: &'a SessionUser,
    pub education: &'a Education,
    pub experience: &'a Experience,
    pub bullets: &'a [String],
    pub skills: &'a [Skill],
    /// Empty when no profile link was submitted.
    pub linked_url: &'a str,
    pub certificates: &'a [Certificate],
}
