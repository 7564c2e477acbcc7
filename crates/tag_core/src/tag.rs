//! Tag data model and text-to-tag formatting settings.

/// A single entry in a tag collection.
///
/// `value` is the canonical identity: uniqueness checks, removal lookup and
/// the form projection all operate on it. `label` is the display text and
/// defaults to the value when no explicit label is supplied. Label
/// collisions are permitted; value collisions are not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub value: String,
    pub label: String,
}

impl Tag {
    /// Create a tag whose label equals its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    /// Create a tag with a display label distinct from its value.
    pub fn with_label(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Settings controlling how raw text is turned into tags.
#[derive(Clone, Debug)]
pub struct TagSettings {
    /// Delimiter used to split free text into multiple segments.
    pub delimiter: char,

    /// Remove surrounding whitespace from each segment.
    pub trim_tags: bool,

    /// Preserve case of added tags, i.e. "tag" is different than "Tag".
    /// When false, values are folded to lowercase.
    pub preserve_case: bool,

    /// Limit the number of tags that can be held. `None` is unbounded;
    /// `Some(1)` is single mode.
    pub max_tags: Option<usize>,
}

impl Default for TagSettings {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim_tags: true,
            preserve_case: false,
            max_tags: None,
        }
    }
}

impl TagSettings {
    /// Apply the configured trim/case formatting to one raw segment.
    pub fn format(&self, raw: &str) -> String {
        let s = if self.trim_tags { raw.trim() } else { raw };
        if self.preserve_case {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    }
}
