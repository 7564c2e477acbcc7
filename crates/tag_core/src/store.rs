//! Central ordered store for tag collections.
//!
//! The store is the single source of truth for an editor instance. It is
//! UI-agnostic: it knows nothing about structural nodes, form projections
//! or keyboard plumbing. Integration layers mirror its contents outward
//! and rebuild it from host structure when external edits occur.
//!
//! Invariants:
//! - Insertion order is significant and preserved on add/remove.
//! - No two tags share an identical `value` (exact match, case-sensitive).
//! - The cursor stays clamped to `[0, len]` across every mutation.
//! - Rejected inputs (empty after trim, duplicate, over the cardinality
//!   limit) are silently dropped, never errors; they arise from normal
//!   interactive typing.

use crate::cursor::{CursorController, DeleteKind};
use crate::tag::{Tag, TagSettings};

/// Ordered, uniqueness-enforcing collection of tags.
#[derive(Clone, Debug, Default)]
pub struct TagStore {
    settings: TagSettings,
    entries: Vec<Tag>,
    cursor: CursorController,
}

impl TagStore {
    /// Create an empty store with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given settings.
    pub fn with_settings(settings: TagSettings) -> Self {
        Self {
            settings,
            entries: Vec::new(),
            cursor: CursorController::new(),
        }
    }

    pub fn settings(&self) -> &TagSettings {
        &self.settings
    }

    /// Replace the cardinality limit. Existing excess entries are not
    /// removed here; callers use [`TagStore::enforce_max`] so they can
    /// propagate the drops outward.
    pub fn set_max_tags(&mut self, max_tags: Option<usize>) {
        self.settings.max_tags = max_tags;
    }

    /// Returns whether `value` could currently be added.
    ///
    /// False when the value is empty after trimming, when the cardinality
    /// limit is already reached, or when an exact duplicate exists.
    pub fn can_add(&self, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        if let Some(max) = self.settings.max_tags
            && self.entries.len() >= max
        {
            return false;
        }
        !self.has(value)
    }

    /// Add free text, splitting on the configured delimiter.
    ///
    /// Each segment is formatted (trim/case per settings) and filtered
    /// through [`TagStore::can_add`]; rejected segments are silently
    /// dropped. Accepted tags are inserted starting at
    /// `clamp(index, 0, len)` (end of the store when `index` is `None`),
    /// with the insertion point advancing after each accepted insert.
    /// Returns the accepted tags in insertion order.
    pub fn add(&mut self, raw: &str, index: Option<usize>) -> Vec<Tag> {
        let mut at = index.unwrap_or(self.entries.len());
        let mut accepted = Vec::new();

        let segments: Vec<String> = raw
            .split(self.settings.delimiter)
            .map(|s| self.settings.format(s))
            .collect();

        for value in segments {
            if !self.can_add(&value) {
                log::trace!(target: "tagfield.store", "rejected segment {value:?}");
                continue;
            }
            at = at.min(self.entries.len());
            let tag = Tag::new(value);
            self.insert_at(at, tag.clone());
            accepted.push(tag);
            at += 1;
        }

        accepted
    }

    /// Batch form of [`TagStore::add`]: list order is preserved and an
    /// explicit `index` advances by one per accepted item.
    pub fn add_all<S: AsRef<str>>(&mut self, items: &[S], index: Option<usize>) -> Vec<Tag> {
        let mut at = index;
        let mut accepted = Vec::new();
        for item in items {
            let got = self.add(item.as_ref(), at);
            if let Some(a) = at.as_mut() {
                *a += got.len();
            }
            accepted.extend(got);
        }
        accepted
    }

    /// Add an already-split value/label pair (e.g. an autocomplete
    /// selection). No delimiter splitting happens; the label defaults to
    /// the formatted value when absent.
    pub fn add_tag(&mut self, value: &str, label: Option<&str>, index: Option<usize>) -> Option<Tag> {
        let value = self.settings.format(value);
        if !self.can_add(&value) {
            return None;
        }
        let label = label.map_or_else(|| value.clone(), str::to_string);
        let at = index.unwrap_or(self.entries.len()).min(self.entries.len());
        let tag = Tag::with_label(value, label);
        self.insert_at(at, tag.clone());
        Some(tag)
    }

    /// Remove the last occurrence matching `value` exactly.
    ///
    /// Only one occurrence can exist given the uniqueness invariant, but
    /// the scan runs from the tail for symmetry with duplicate-tolerant
    /// variants. Returns the removed tag, if any.
    pub fn remove(&mut self, value: &str) -> Option<Tag> {
        let at = self.entries.iter().rposition(|t| t.value == value)?;
        Some(self.remove_at(at))
    }

    /// Empty the store in one logical operation; the cursor resets to 0.
    pub fn remove_all(&mut self) -> Vec<Tag> {
        let removed = std::mem::take(&mut self.entries);
        self.cursor.on_clear();
        removed
    }

    /// Replace the entire contents from an ordered tag sequence, skipping
    /// exact-duplicate values (first occurrence wins). The cardinality
    /// limit is not applied here; callers cap the input so they can route
    /// the drops back to the host structure. The cursor moves to the new
    /// length.
    pub fn rebuild<I: IntoIterator<Item = Tag>>(&mut self, tags: I) {
        self.entries.clear();
        for tag in tags {
            if self.entries.iter().any(|t| t.value == tag.value) {
                log::debug!(target: "tagfield.store", "rebuild skipped duplicate {:?}", tag.value);
                continue;
            }
            self.entries.push(tag);
        }
        let len = self.entries.len();
        self.cursor.on_clear();
        self.cursor.set(len, len);
    }

    /// Drop entries beyond the cardinality limit, returning them in order.
    pub fn enforce_max(&mut self) -> Vec<Tag> {
        let Some(max) = self.settings.max_tags else {
            return Vec::new();
        };
        if self.entries.len() <= max {
            return Vec::new();
        }
        let removed = self.entries.split_off(max);
        let len = self.entries.len();
        self.cursor.set(self.cursor.index(), len);
        self.cursor.disarm();
        removed
    }

    /// Register a delete-class keystroke (arm/confirm protocol).
    ///
    /// The first press arms the adjacent tag; a second consecutive press
    /// removes it and returns it. See [`crate::cursor::CursorController`].
    pub fn press_delete(&mut self, kind: DeleteKind) -> Option<Tag> {
        let at = self.cursor.press_delete(kind, self.entries.len())?;
        Some(self.remove_at(at))
    }

    /// Cancel a pending delete confirmation.
    pub fn disarm(&mut self) {
        self.cursor.disarm();
    }

    /// Index currently highlighted for deletion, if any.
    pub fn armed(&self) -> Option<usize> {
        self.cursor.armed()
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    pub fn set_cursor(&mut self, index: usize) {
        self.cursor.set(index, self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether an exact-match value exists.
    pub fn has(&self, value: &str) -> bool {
        self.entries.iter().any(|t| t.value == value)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.entries
    }

    /// Ordered value projection.
    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|t| t.value.as_str()).collect()
    }

    /// Ordered label projection.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|t| t.label.as_str()).collect()
    }

    fn insert_at(&mut self, at: usize, tag: Tag) {
        log::trace!(target: "tagfield.store", "insert {:?} at {at}", tag.value);
        self.entries.insert(at, tag);
        self.cursor.on_insert(at, self.entries.len());
    }

    fn remove_at(&mut self, at: usize) -> Tag {
        let tag = self.entries.remove(at);
        log::trace!(target: "tagfield.store", "remove {:?} from {at}", tag.value);
        self.cursor.on_remove(at, self.entries.len());
        tag
    }
}
