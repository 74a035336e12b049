//! Form-urlencoded field access shared by the auth and resume handlers.
//!
//! Handlers extract `Form<Vec<(String, String)>>` so repeated keys survive
//! decoding. A key may also arrive with a `[]` suffix (`certificate_name[]`).

/// Decoded form body preserving field order and repeated keys.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

fn key_matches(candidate: &str, key: &str) -> bool {
    candidate == key || candidate.strip_suffix("[]") == Some(key)
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First raw value for `key`, untrimmed.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| key_matches(k, key))
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, trimmed; empty when absent.
    pub fn text(&self, key: &str) -> &str {
        self.raw(key).map(str::trim).unwrap_or_default()
    }

    /// First value for `key`, trimmed; `None` when absent or blank.
    pub fn optional(&self, key: &str) -> Option<&str> {
        Some(self.text(key)).filter(|v| !v.is_empty())
    }

    /// Every value submitted for `key`, trimmed, in submission order.
    pub fn list(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| key_matches(k, key))
            .map(|(_, v)| v.trim())
            .collect()
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}
