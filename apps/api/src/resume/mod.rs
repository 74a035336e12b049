// Resume Assembly: form validation, bullet generation, skill and certificate
// parsing, transactional persistence, rendering.
// All completion calls go through llm_client, never to a provider directly.

pub mod assembly;
pub mod form;
pub mod handlers;
pub mod parsing;
pub mod prompts;
