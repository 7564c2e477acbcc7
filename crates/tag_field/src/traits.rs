//! Collaborator contracts at the host boundary.
//!
//! The engine never owns the visual representation of tags, the form value
//! transport, or the options list. Each concern sits behind a trait so the
//! editor can be driven against fakes in tests and against real host
//! plumbing in production.

use crate::events::TagUpdate;
use tag_core::Candidate;

/// Opaque handle for a structural node representing one tag.
///
/// The handle is a weak, non-owning association: it routes removal
/// requests and rebuilds back to the right node, nothing more. The value
/// has no semantic meaning within this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub u64);

impl NodeHandle {
    /// Reserved sentinel for "unassigned/invalid" identity. A renderer
    /// returning this from [`TagRenderer::create_node`] violates the
    /// collaborator contract.
    pub const INVALID: NodeHandle = NodeHandle(0);
}

/// Snapshot of one structural node as the host currently sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedTag {
    pub handle: NodeHandle,
    /// Explicit value attribute, when present.
    pub value: Option<String>,
    /// Textual content; the value falls back to this.
    pub text: String,
}

impl RenderedTag {
    /// Canonical value this node contributes to a rebuild.
    ///
    /// A node with no derivable value contributes the empty string; the
    /// rebuild stays total rather than failing on malformed nodes.
    pub fn effective_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.text)
    }
}

/// Rendering collaborator: owns the structural nodes mirroring the store.
pub trait TagRenderer {
    /// Materialize a node for a tag. Must return a live handle distinct
    /// from [`NodeHandle::INVALID`] and from every other live handle.
    fn create_node(&mut self, value: &str, label: &str) -> NodeHandle;

    /// Tear down a previously created node.
    fn destroy_node(&mut self, handle: NodeHandle);

    /// Read the current ordered node set from the host structure.
    fn read_nodes(&self) -> Vec<RenderedTag>;
}

/// Form-association collaborator: receives the computed value projection
/// and the change/update notifications.
pub trait FormHost {
    /// Push the ordered value projection (a single empty string when the
    /// collection is empty, so the field still participates in
    /// submission).
    fn set_projected_value(&mut self, values: &[String]);

    /// Item-level notification; fires once per accepted mutation, before
    /// any collection-level notification.
    fn notify_update(&mut self, update: &TagUpdate);

    /// Collection-level notification; fires at most once per logical
    /// operation, and only when the ordered value list actually changed.
    fn notify_change(&mut self);

    /// Surface a validity failure to the user.
    fn report_invalid(&mut self, message: &str);
}

/// Options collaborator: a read-only external candidate list, re-read on
/// every use so external edits are visible without invalidation.
pub trait OptionsSource {
    fn read_options(&self) -> Vec<Candidate>;
}

/// No options at all.
impl OptionsSource for () {
    fn read_options(&self) -> Vec<Candidate> {
        Vec::new()
    }
}

impl OptionsSource for Vec<Candidate> {
    fn read_options(&self) -> Vec<Candidate> {
        self.clone()
    }
}

/// Combines an explicitly referenced options list with a nested fallback.
///
/// The explicit reference wins while it resolves; when it is removed at
/// runtime the nested list takes over on the next read. Nothing is cached
/// in between.
#[derive(Clone, Debug, Default)]
pub struct ReferencedOrNested<R, N> {
    pub referenced: Option<R>,
    pub nested: N,
}

impl<R: OptionsSource, N: OptionsSource> OptionsSource for ReferencedOrNested<R, N> {
    fn read_options(&self) -> Vec<Candidate> {
        match &self.referenced {
            Some(r) => r.read_options(),
            None => self.nested.read_options(),
        }
    }
}
