use serde::{Deserialize, Serialize};

/// Outcome of one settlement filter pass.
///
/// `filtered` and `excluded` partition the deduplicated input exactly:
/// every candidate serial lands in one of the two lists and
/// `filtered.len() + excluded.len() == total_input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    pub filtered: Vec<String>,
    pub excluded: Vec<String>,
    pub excluded_count: usize,
    pub total_input: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl FilterResult {
    /// Zero-filled result for an empty candidate list.
    pub fn empty() -> Self {
        Self {
            filtered: Vec::new(),
            excluded: Vec::new(),
            excluded_count: 0,
            total_input: 0,
            warning: None,
        }
    }

    /// Fail-open result: the whole input passes through untouched.
    pub fn passthrough(serials: Vec<String>, warning: impl Into<String>) -> Self {
        let total_input = serials.len();
        Self {
            filtered: serials,
            excluded: Vec::new(),
            excluded_count: 0,
            total_input,
            warning: Some(warning.into()),
        }
    }
}
