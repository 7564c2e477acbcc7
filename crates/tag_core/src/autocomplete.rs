//! Suggestion filtering over an externally-owned options list.
//!
//! The options list is read fresh for every call and never cached here, so
//! external updates are visible on the next keystroke with no explicit
//! invalidation.

/// One candidate from an options source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    /// Display label; falls back to the value when absent.
    pub label: Option<String>,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    /// The text the query is matched against.
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// A filtered suggestion ready for selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub value: String,
    pub label: String,
}

/// Filter `options` down to suggestions for `query`.
///
/// Matching is a case-insensitive substring test against the candidate's
/// label (or value when no distinct label exists). Candidates whose value
/// is already in `used_values` are excluded; source order is preserved.
/// An empty query yields no suggestions (minimum query length is 1).
pub fn suggest(options: &[Candidate], query: &str, used_values: &[&str]) -> Vec<Suggestion> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    options
        .iter()
        .filter(|c| c.display().to_lowercase().contains(&needle))
        .filter(|c| !used_values.contains(&c.value.as_str()))
        .map(|c| Suggestion {
            value: c.value.clone(),
            label: c.display().to_string(),
        })
        .collect()
}
