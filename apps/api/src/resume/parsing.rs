//! Pure parsing for the resume pipeline: completion text → bullets, the skills
//! field → `Skill`s, parallel certificate lists → `Certificate`s.

use crate::errors::AppError;
use crate::models::resume::{Certificate, Skill};

/// Turns raw completion text into one bullet per line.
///
/// Each line is trimmed, loses one leading list marker and any trailing
/// periods, then gets exactly one period back. Lines left with only the
/// period are dropped.
pub fn experience_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let body = strip_list_marker(line.trim())
                .trim()
                .trim_end_matches('.')
                .trim_end();
            format!("{body}.")
        })
        .filter(|bullet| bullet != ".")
        .collect()
}

/// Strips `-`, `*`, `•`, `1.` or `1)` when followed by whitespace.
fn strip_list_marker(line: &str) -> &str {
    for marker in ["-", "*", "•"] {
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(after) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if after.starts_with(char::is_whitespace) {
                return after.trim_start();
            }
        }
    }

    line
}

/// Parses `"Python:Expert, SQL:Intermediate"` into skills.
///
/// Blank segments are skipped. A segment without a colon is a skill with no
/// proficiency level; anything after a second colon is ignored.
pub fn parse_skills(input: &str) -> Vec<Skill> {
    input
        .split(',')
        .filter_map(|segment| {
            let mut parts = segment.split(':').map(str::trim);
            let skill_name = parts.next().filter(|name| !name.is_empty())?;
            let proficiency_level = parts.next().filter(|level| !level.is_empty());
            Some(Skill {
                skill_name: skill_name.to_string(),
                proficiency_level: proficiency_level.map(str::to_string),
            })
        })
        .collect()
}

/// Zips the four certificate lists positionally.
///
/// Lists of different lengths are rejected. Rows where every field is blank
/// (an unused form row) are skipped; a blank expiration date means none.
pub fn parse_certificates(
    names: &[String],
    organizations: &[String],
    issue_dates: &[String],
    expiration_dates: &[String],
) -> Result<Vec<Certificate>, AppError> {
    let len = names.len();
    if organizations.len() != len || issue_dates.len() != len || expiration_dates.len() != len {
        return Err(AppError::Validation(format!(
            "Certificate fields must have the same number of entries \
            (names: {}, organizations: {}, issue dates: {}, expiration dates: {})",
            names.len(),
            organizations.len(),
            issue_dates.len(),
            expiration_dates.len()
        )));
    }

    Ok(names
        .iter()
        .zip(organizations)
        .zip(issue_dates)
        .zip(expiration_dates)
        .filter(|(((name, org), issued), expires)| {
            [name, org, issued, expires]
                .iter()
                .any(|field| !field.trim().is_empty())
        })
        .map(|(((name, org), issued), expires)| Certificate {
            certificate_name: name.trim().to_string(),
            issuing_organization: org.trim().to_string(),
            issue_date: issued.trim().to_string(),
            expiration_date: Some(expires.trim())
                .filter(|e| !e.is_empty())
                .map(str::to_string),
        })
        .collect())
}
