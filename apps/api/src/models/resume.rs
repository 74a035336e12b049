use crate::models::user::SessionUser;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Experience {
    pub company_name: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    /// Generated bullets joined with a single space.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub skill_name: String,
    pub proficiency_level: Option<String>,
}

impl Skill {
    /// "Python (Expert)", or just the name when no level was given.
    pub fn label(&self) -> String {
        match &self.proficiency_level {
            Some(level) => format!("{} ({level})", self.skill_name),
            None => self.skill_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub certificate_name: String,
    pub issuing_organization: String,
    pub issue_date: String,
    pub expiration_date: Option<String>,
}

impl Certificate {
    pub fn validity(&self) -> String {
        match &self.expiration_date {
            Some(expires) => format!("issued {}, expires {expires}", self.issue_date),
            None => format!("issued {}", self.issue_date),
        }
    }
}

/// Everything written for one resume generation, in insertion order.
#[derive(Debug, Clone)]
pub struct ResumeSubmission<'a> {
    pub user: &'a SessionUser,
    pub education: &'a Education,
    pub experience: &'a Experience,
    pub skills: &'a [Skill],
    pub certificates: &'a [Certificate],
    /// The skills field exactly as submitted; stored on the resume snapshot.
    pub raw_skills: &'a str,
    pub linked_url: Option<&'a str>,
}

/// What the batch insert actually kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub skills_saved: usize,
    pub skills_skipped: usize,
    pub certificates_saved: usize,
    pub certificates_skipped: usize,
}
