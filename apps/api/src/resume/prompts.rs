// Prompt templates for the Resume Assembly module.
// The system instruction comes from llm_client::prompts.

/// Experience-bullet prompt.
/// Placeholders: {company_name}, {role}, {start_date}, {end_date}, {degree},
///               {institution}, {skills}, {job_description}, {notes}
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = "Generate concise bullet points for the \
    experience section based on experience at {company_name} as a {role} from {start_date} \
    to {end_date}, a {degree} from {institution}, and skills in {skills}. \
    Ensure the points align with the following job description: {job_description}.{notes}";

/// Appended when the candidate wrote their own notes about the role.
/// Placeholders: {description}
pub const NOTES_FRAGMENT: &str = " Draw on these notes from the candidate: {description}";

/// Fills `{name}` placeholders in a single left-to-right pass.
///
/// Inserted values are never scanned again, so braces inside user text come
/// through verbatim. Unknown placeholders are left as written.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let filled = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match filled {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
