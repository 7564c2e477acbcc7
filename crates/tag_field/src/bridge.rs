//! Bidirectional reconciliation between the tag store and the
//! externally-owned structural nodes.
//!
//! The structural nodes are an observable mirror of the store, not a
//! second source of truth: store mutations flow outward as a minimal
//! create/destroy diff, and external structural edits flow back in as a
//! full rebuild. The bridge pauses its own observation while it edits the
//! structure; a structural-change notification arriving during
//! reconciliation is self-caused and must be ignored, otherwise the
//! corrective edits would re-trigger the same notification forever.
//!
//! Invariants:
//! - The mirror holds exactly one entry per store tag, in store order.
//! - Every mirror handle is live and distinct; a renderer handing out
//!   `NodeHandle::INVALID` or a duplicate is a contract violation and
//!   fails hard.
//! - Item-level notifications fire strictly before the collection-level
//!   notification; the latter fires at most once per logical operation
//!   and only when the ordered value list changed.

use crate::events::{Notify, TagUpdate};
use crate::traits::{FormHost, NodeHandle, TagRenderer};
use tag_core::{Tag, TagStore};

#[derive(Clone, Debug)]
struct MirrorEntry {
    value: String,
    handle: NodeHandle,
}

/// Reconciles store state with structural nodes and the form projection.
#[derive(Clone, Debug, Default)]
pub struct SyncBridge {
    mirror: Vec<MirrorEntry>,
    /// Ordered value list after the previous reconciliation, for
    /// collection-change detection.
    last_values: Vec<String>,
    /// Set while the bridge itself is editing the structure or rebuilding
    /// from it.
    paused: bool,
}

impl SyncBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store → structure: reconcile nodes against the store, refresh the
    /// form projection, then fire notifications per `notify`.
    ///
    /// `updates` carries the item-level details of the mutation batch that
    /// led here, in acceptance order.
    pub fn sync<R: TagRenderer, F: FormHost>(
        &mut self,
        store: &TagStore,
        renderer: &mut R,
        form: &mut F,
        updates: &[TagUpdate],
        notify: Notify,
    ) {
        self.paused = true;

        let mut old: Vec<Option<MirrorEntry>> =
            std::mem::take(&mut self.mirror).into_iter().map(Some).collect();
        let mut next: Vec<MirrorEntry> = Vec::with_capacity(store.len());

        for tag in store.tags() {
            let reused = old.iter_mut().find_map(|slot| match slot {
                Some(entry) if entry.value == tag.value => slot.take(),
                _ => None,
            });
            let entry = match reused {
                Some(entry) => entry,
                None => {
                    let handle = renderer.create_node(&tag.value, &tag.label);
                    self.ensure_fresh_handle(handle, &next, &old);
                    log::trace!(target: "tagfield.bridge", "created node for {:?}", tag.value);
                    MirrorEntry {
                        value: tag.value.clone(),
                        handle,
                    }
                }
            };
            next.push(entry);
        }

        for stale in old.into_iter().flatten() {
            log::trace!(target: "tagfield.bridge", "destroying node for {:?}", stale.value);
            renderer.destroy_node(stale.handle);
        }

        self.mirror = next;
        self.paused = false;

        self.project_and_notify(store, form, updates, notify);
    }

    /// Structure → store: rebuild the store from the current ordered node
    /// set after an out-of-band edit.
    ///
    /// Returns false when the notification arrived while the bridge was
    /// reconciling (self-caused) and was ignored.
    pub fn apply_structural_change<R: TagRenderer, F: FormHost>(
        &mut self,
        store: &mut TagStore,
        renderer: &mut R,
        form: &mut F,
        notify: Notify,
    ) -> bool {
        if self.paused {
            log::debug!(target: "tagfield.bridge", "ignoring structural change during reconciliation");
            return false;
        }
        self.paused = true;

        let nodes = renderer.read_nodes();

        // Cardinality first: in single mode, extra nodes beyond the first
        // are dropped from the host structure itself.
        let max = store.settings().max_tags.unwrap_or(nodes.len());
        let cut = max.min(nodes.len());
        let (kept, extra) = nodes.split_at(cut);
        for node in extra {
            log::debug!(target: "tagfield.bridge", "dropping node beyond cardinality limit");
            renderer.destroy_node(node.handle);
        }

        // Rebuild store and mirror together so they agree on which nodes
        // are represented; exact-duplicate values keep their first node
        // and the later ones stay in the host unmanaged.
        let mut tags: Vec<Tag> = Vec::with_capacity(kept.len());
        let mut mirror: Vec<MirrorEntry> = Vec::with_capacity(kept.len());
        for node in kept {
            let value = node.effective_value();
            if tags.iter().any(|t| t.value == value) {
                continue;
            }
            let label = if node.text.is_empty() { value } else { node.text.as_str() };
            tags.push(Tag::with_label(value, label));
            mirror.push(MirrorEntry {
                value: value.to_string(),
                handle: node.handle,
            });
        }

        log::debug!(target: "tagfield.bridge", "rebuilt store from {} node(s)", tags.len());
        store.rebuild(tags);
        self.mirror = mirror;
        self.paused = false;

        // External rebuilds carry no item-level detail; only the
        // collection-level notification can fire.
        self.project_and_notify(store, form, &[], notify);
        true
    }

    fn project_and_notify<F: FormHost>(
        &mut self,
        store: &TagStore,
        form: &mut F,
        updates: &[TagUpdate],
        notify: Notify,
    ) {
        let values: Vec<String> = store.values().iter().map(|v| (*v).to_string()).collect();
        let changed = values != self.last_values;

        // An empty collection still projects a single empty-string entry
        // so the field participates in form submission.
        if values.is_empty() {
            form.set_projected_value(&[String::new()]);
        } else {
            form.set_projected_value(&values);
        }
        self.last_values = values;

        if notify == Notify::Suppress {
            return;
        }
        for update in updates {
            form.notify_update(update);
        }
        if changed {
            form.notify_change();
        }
    }

    fn ensure_fresh_handle(&self, handle: NodeHandle, next: &[MirrorEntry], old: &[Option<MirrorEntry>]) {
        assert!(
            handle != NodeHandle::INVALID,
            "renderer returned an invalid node handle"
        );
        let duplicate = next.iter().any(|e| e.handle == handle)
            || old.iter().flatten().any(|e| e.handle == handle);
        assert!(!duplicate, "renderer returned a handle that is already live");
    }
}
