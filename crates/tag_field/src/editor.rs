//! Host-facing editor facade.
//!
//! [`TagEditor`] wires a [`TagStore`] to the host collaborators and routes
//! the keystroke surface: character input accumulates in an edit buffer,
//! submit keys confirm the buffer through the free-text add path at the
//! cursor, delete-class keys run the two-press removal protocol once the
//! buffer is empty.
//!
//! All mutations are synchronous and run to completion; every accepted
//! mutation reconciles the structural nodes, refreshes the form
//! projection, and fires notifications through the form collaborator.

use crate::bridge::SyncBridge;
use crate::events::{Notify, TagUpdate};
use crate::traits::{FormHost, OptionsSource, TagRenderer};
use tag_core::{
    DeleteKind, Suggestion, Tag, TagSettings, TagStore, Validity, evaluate, suggest,
};

/// Editor-level configuration, fixed at construction apart from the
/// runtime toggles (`set_multiple`, `set_required`, `set_enabled`).
#[derive(Clone, Copy, Debug)]
pub struct EditorSettings {
    /// When false the editor holds at most one tag.
    pub multiple: bool,
    pub required: bool,
    pub delimiter: char,
    pub trim_tags: bool,
    pub preserve_case: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            multiple: false,
            required: false,
            delimiter: ',',
            trim_tags: true,
            preserve_case: true,
        }
    }
}

/// A keystroke as the host delivers it, already decoded from whatever
/// capture plumbing the host uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Enter,
    Tab,
}

/// The editor facade: one instance per tag field.
pub struct TagEditor<R: TagRenderer, F: FormHost, O: OptionsSource> {
    store: TagStore,
    bridge: SyncBridge,
    buffer: String,
    renderer: R,
    form: F,
    options: O,
    required: bool,
    enabled: bool,
    validity: Validity,
}

impl<R: TagRenderer, F: FormHost, O: OptionsSource> TagEditor<R, F, O> {
    /// Build an editor over the given collaborators.
    ///
    /// Nodes already present in the host structure are adopted as the
    /// initial contents; initialization fires no notifications.
    pub fn new(renderer: R, form: F, options: O, settings: EditorSettings) -> Self {
        let store = TagStore::with_settings(TagSettings {
            delimiter: settings.delimiter,
            trim_tags: settings.trim_tags,
            preserve_case: settings.preserve_case,
            max_tags: if settings.multiple { None } else { Some(1) },
        });
        let mut editor = Self {
            store,
            bridge: SyncBridge::new(),
            buffer: String::new(),
            renderer,
            form,
            options,
            required: settings.required,
            enabled: true,
            validity: Validity::ok(),
        };
        editor.bridge.apply_structural_change(
            &mut editor.store,
            &mut editor.renderer,
            &mut editor.form,
            Notify::Suppress,
        );
        editor.validity = evaluate(editor.required, editor.store.len());
        editor
    }

    // ----- programmatic mutation API -----------------------------------
    //
    // These work regardless of `enabled`; only the interactive surface
    // (keystrokes, paste) honors the disabled state.

    /// Add free text at the end of the collection.
    pub fn add(&mut self, text: &str) {
        self.add_impl(text, None);
    }

    /// Add free text at a clamped insertion index.
    pub fn add_at(&mut self, text: &str, index: usize) {
        self.add_impl(text, Some(index));
    }

    /// Batch add, preserving list order. An explicit `index` advances by
    /// one per accepted item.
    pub fn add_all<S: AsRef<str>>(&mut self, items: &[S], index: Option<usize>) {
        let accepted = self.store.add_all(items, index);
        if accepted.is_empty() {
            return;
        }
        let updates = self.added_updates(&accepted);
        self.sync(&updates, Notify::Emit);
    }

    /// Remove the exact-match value. Returns whether a removal occurred.
    pub fn remove(&mut self, value: &str) -> bool {
        let Some(tag) = self.store.remove(value) else {
            return false;
        };
        self.sync(&[TagUpdate::Removed { value: tag.value }], Notify::Emit);
        true
    }

    /// Empty the collection in one logical operation.
    pub fn remove_all(&mut self) {
        let removed = self.store.remove_all();
        if removed.is_empty() {
            return;
        }
        let updates: Vec<TagUpdate> = removed
            .into_iter()
            .map(|t| TagUpdate::Removed { value: t.value })
            .collect();
        self.sync(&updates, Notify::Emit);
    }

    /// Replace the whole collection.
    ///
    /// Item-level notifications are suppressed; the collection-level
    /// notification fires only when the resulting ordered value list
    /// differs from the previous one.
    pub fn set_values<S: AsRef<str>>(&mut self, values: &[S]) {
        self.store.remove_all();
        self.store.add_all(values, None);
        self.sync(&[], Notify::Emit);
    }

    /// Form-reset hook: clears tags and the edit buffer. Removals go
    /// through the normal machinery, so notifications fire as for
    /// [`TagEditor::remove_all`].
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.store.disarm();
        self.remove_all();
    }

    // ----- interactive surface -----------------------------------------

    /// Route one decoded keystroke. Ignored while disabled.
    pub fn handle_key(&mut self, key: Key) {
        if !self.enabled {
            return;
        }
        match key {
            Key::Char(c) if c == self.store.settings().delimiter => self.commit_buffer(),
            Key::Char(c) => {
                self.buffer.push(c);
                self.store.disarm();
            }
            Key::Backspace => self.delete_key(DeleteKind::Backward),
            Key::Delete => self.delete_key(DeleteKind::Forward),
            Key::Enter | Key::Tab => self.commit_buffer(),
        }
    }

    /// Pasted text appends to the buffer and confirms immediately at the
    /// end of the collection. Ignored while disabled.
    pub fn paste(&mut self, text: &str) {
        if !self.enabled {
            return;
        }
        self.buffer.push_str(text);
        let text = std::mem::take(&mut self.buffer);
        let accepted = self.store.add(&text, None);
        if accepted.is_empty() {
            return;
        }
        let updates = self.added_updates(&accepted);
        self.sync(&updates, Notify::Emit);
    }

    /// Focus left the field: cancel any pending delete confirmation.
    pub fn blur(&mut self) {
        self.store.disarm();
    }

    // ----- autocomplete -------------------------------------------------

    /// Suggestions for the current edit buffer, against a fresh read of
    /// the options source.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let options = self.options.read_options();
        suggest(&options, &self.buffer, &self.store.values())
    }

    /// Accept a suggestion: the value/label pair goes straight into the
    /// store (no delimiter splitting) and the buffer clears.
    pub fn accept_suggestion(&mut self, suggestion: &Suggestion) {
        self.buffer.clear();
        let Some(tag) = self
            .store
            .add_tag(&suggestion.value, Some(&suggestion.label), None)
        else {
            return;
        };
        self.sync(
            &[TagUpdate::Added {
                value: tag.value,
                known_option: true,
            }],
            Notify::Emit,
        );
    }

    // ----- runtime configuration ----------------------------------------

    /// Toggle between single and multiple mode. Leaving multiple mode
    /// keeps only the first tag; the rest are dropped from the host
    /// structure with removal notifications.
    pub fn set_multiple(&mut self, multiple: bool) {
        self.store.set_max_tags(if multiple { None } else { Some(1) });
        let removed = self.store.enforce_max();
        if removed.is_empty() {
            return;
        }
        let updates: Vec<TagUpdate> = removed
            .into_iter()
            .map(|t| TagUpdate::Removed { value: t.value })
            .collect();
        self.sync(&updates, Notify::Emit);
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        self.validity = evaluate(self.required, self.store.len());
    }

    /// Disabled editors ignore keystrokes and paste; the programmatic API
    /// keeps working.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.store.disarm();
        }
    }

    // ----- structure → store --------------------------------------------

    /// The host reports that the externally-owned node set changed.
    ///
    /// Returns false when the report arrived during the editor's own
    /// reconciliation and was ignored.
    pub fn apply_structural_change(&mut self) -> bool {
        let applied = self.bridge.apply_structural_change(
            &mut self.store,
            &mut self.renderer,
            &mut self.form,
            Notify::Emit,
        );
        if applied {
            self.validity = evaluate(self.required, self.store.len());
        }
        applied
    }

    // ----- validity -----------------------------------------------------

    pub fn check_validity(&self) -> bool {
        evaluate(self.required, self.store.len()).valid
    }

    /// Re-evaluate and, on failure, surface the message through the form
    /// collaborator.
    pub fn report_validity(&mut self) -> Validity {
        self.validity = evaluate(self.required, self.store.len());
        if !self.validity.valid {
            self.form.report_invalid(self.validity.message);
        }
        self.validity
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    // ----- read access --------------------------------------------------

    pub fn values(&self) -> Vec<String> {
        self.store.values().iter().map(|v| (*v).to_string()).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.store.labels().iter().map(|l| (*l).to_string()).collect()
    }

    pub fn tags(&self) -> &[Tag] {
        self.store.tags()
    }

    pub fn has(&self, value: &str) -> bool {
        self.store.has(value)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Current edit-buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.store.cursor()
    }

    pub fn set_cursor(&mut self, index: usize) {
        self.store.set_cursor(index);
    }

    /// Index currently armed for deletion, if any.
    pub fn armed(&self) -> Option<usize> {
        self.store.armed()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn options_mut(&mut self) -> &mut O {
        &mut self.options
    }

    // ----- internals ----------------------------------------------------

    fn add_impl(&mut self, text: &str, index: Option<usize>) {
        let accepted = self.store.add(text, index);
        if accepted.is_empty() {
            return;
        }
        let updates = self.added_updates(&accepted);
        self.sync(&updates, Notify::Emit);
    }

    /// Submit key: a non-empty buffer confirms at the cursor; an empty
    /// buffer just disarms.
    fn commit_buffer(&mut self) {
        if self.buffer.is_empty() {
            self.store.disarm();
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        let at = self.store.cursor();
        let accepted = self.store.add(&text, Some(at));
        if accepted.is_empty() {
            return;
        }
        let updates = self.added_updates(&accepted);
        self.sync(&updates, Notify::Emit);
    }

    fn delete_key(&mut self, kind: DeleteKind) {
        if !self.buffer.is_empty() {
            // Delete-class keys edit the buffer first; the removal
            // protocol only engages once the buffer is empty.
            if kind == DeleteKind::Backward {
                self.buffer.pop();
            }
            return;
        }
        if let Some(tag) = self.store.press_delete(kind) {
            self.sync(&[TagUpdate::Removed { value: tag.value }], Notify::Emit);
        }
    }

    fn added_updates(&self, accepted: &[Tag]) -> Vec<TagUpdate> {
        let options = self.options.read_options();
        accepted
            .iter()
            .map(|t| TagUpdate::Added {
                value: t.value.clone(),
                known_option: options.iter().any(|c| c.value == t.value),
            })
            .collect()
    }

    fn sync(&mut self, updates: &[TagUpdate], notify: Notify) {
        self.bridge
            .sync(&self.store, &mut self.renderer, &mut self.form, updates, notify);
        self.validity = evaluate(self.required, self.store.len());
    }
}
