//! # tag_field
//!
//! Host-facing integration layer for tag collections.
//!
//! Where `tag_core` owns the pure editing semantics, this crate owns the
//! seams to the host:
//! - collaborator contracts for rendering ([`TagRenderer`]),
//!   form association ([`FormHost`]) and the options list
//!   ([`OptionsSource`])
//! - [`SyncBridge`]: bidirectional reconciliation between the store and
//!   the externally-owned structural nodes, plus the form-value
//!   projection and notification ordering
//! - [`TagEditor`]: the facade hosts drive — programmatic mutation API,
//!   keystroke routing, autocomplete, validity reporting
//!
//! The crate is deliberately free of any widget framework or document
//! model; hosts implement the collaborator traits over whatever structure
//! they own, and tests drive the editor against recording fakes.

mod bridge;
mod editor;
mod events;
mod traits;

pub use bridge::SyncBridge;
pub use editor::{EditorSettings, Key, TagEditor};
pub use events::{Notify, TagUpdate};
pub use traits::{
    FormHost, NodeHandle, OptionsSource, ReferencedOrNested, RenderedTag, TagRenderer,
};
