use crate::errors::AppError;
use crate::forms::FormFields;
use crate::models::resume::Education;
use crate::models::user::SessionUser;

/// The `/generate_resume` form after decoding. Values are trimmed.
#[derive(Debug, Clone, Default)]
pub struct ResumeForm {
    pub education: Education,
    pub company_name: String,
    pub role: String,
    pub experience_start_date: String,
    pub experience_end_date: String,
    pub description: Option<String>,
    pub skills: String,
    pub linked_url: Option<String>,
    pub job_description: String,
    pub certificate_names: Vec<String>,
    pub issuing_organizations: Vec<String>,
    pub issue_dates: Vec<String>,
    pub expiration_dates: Vec<String>,
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

impl ResumeForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            education: Education {
                degree: fields.text("degree").to_string(),
                institution: fields.text("institution").to_string(),
                start_date: fields.text("startDate").to_string(),
                end_date: fields.text("endDate").to_string(),
            },
            company_name: fields.text("company_name").to_string(),
            role: fields.text("role").to_string(),
            experience_start_date: fields.text("experience_start_date").to_string(),
            experience_end_date: fields.text("experience_end_date").to_string(),
            description: fields.optional("description").map(str::to_string),
            skills: fields.text("skills").to_string(),
            linked_url: fields.optional("linkedUrl").map(str::to_string),
            job_description: fields.text("jobDescription").to_string(),
            certificate_names: owned(fields.list("certificate_name")),
            issuing_organizations: owned(fields.list("issuing_organization")),
            issue_dates: owned(fields.list("issue_date")),
            expiration_dates: owned(fields.list("expiration_date")),
        }
    }

    /// Names of required values that are blank, session identity included.
    pub fn missing_fields(&self, user: &SessionUser) -> Vec<&'static str> {
        let required = [
            ("firstName", user.first_name.as_str()),
            ("lastName", user.last_name.as_str()),
            ("email", user.email.as_str()),
            ("phone", user.phone.as_str()),
            ("degree", self.education.degree.as_str()),
            ("institution", self.education.institution.as_str()),
            ("startDate", self.education.start_date.as_str()),
            ("endDate", self.education.end_date.as_str()),
            ("company_name", self.company_name.as_str()),
            ("role", self.role.as_str()),
            ("experience_start_date", self.experience_start_date.as_str()),
            ("experience_end_date", self.experience_end_date.as_str()),
            ("skills", self.skills.as_str()),
            ("jobDescription", self.job_description.as_str()),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn validate(&self, user: &SessionUser) -> Result<(), AppError> {
        let missing = self.missing_fields(user);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "All fields are required (missing: {})",
                missing.join(", ")
            )))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_complete_form_passes_validation() {
        let form = ResumeForm::from_fields(&FormFields::new(pairs(COMPLETE_FORM)));
        assert!(form.validate(&session_user()).is_ok());
        assert_eq!(form.certificate_names, vec!["AWS SAA", "CKA"]);
        assert_eq!(form.expiration_dates, vec!["2026-01-10", ""]);
        assert_eq!(form.description, None);
    }

    #[test]
    fn test_missing_job_description_is_reported() {
        let form = ResumeForm::from_fields(&FormFields::new(pairs_without("jobDescription")));
        assert_eq!(form.missing_fields(&session_user()), vec!["jobDescription"]);
        assert!(matches!(
            form.validate(&session_user()),
            Err(AppError::Validation(msg)) if msg.contains("jobDescription")
        ));
    }

    #[test]
    fn test_blank_session_identity_is_reported() {
        let form = ResumeForm::from_fields(&FormFields::new(pairs(COMPLETE_FORM)));
        let mut user = session_user();
        user.phone = "  ".to_string();
        assert_eq!(form.missing_fields(&user), vec!["phone"]);
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let mut entries = pairs(COMPLETE_FORM);
        entries.retain(|(k, _)| {
            !k.starts_with("certificate")
                && !k.starts_with("issu")
                && k != "expiration_date"
                && k != "linkedUrl"
        });
        let form = ResumeForm::from_fields(&FormFields::new(entries));
        assert!(form.validate(&session_user()).is_ok());
        assert!(form.linked_url.is_none());
        assert!(form.certificate_names.is_empty());
    }
}
