// Shared prompt constants.
// Each feature that needs completions defines its own prompts.rs alongside it.

/// General-purpose system instruction used for every completion request.
pub const ASSISTANT_SYSTEM: &str = "You are a helpful assistant.";
