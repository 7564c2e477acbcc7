//! # tag_core
//!
//! UI-agnostic tag collection editing/state layer.
//!
//! This crate provides the fundamental building blocks for an ordered,
//! uniqueness-enforcing collection of text tokens:
//! - [`Tag`] / [`TagSettings`]: the value/label data model and text
//!   formatting rules
//! - [`TagStore`]: the central ordered store, the single source of truth
//! - [`CursorController`]: insertion-position tracking plus the two-press
//!   deletion protocol
//! - [`suggest`]: autocomplete filtering over an external options list
//! - [`evaluate`]: required-field validity derivation
//!
//! ## Design Principles
//!
//! This crate is intentionally UI-agnostic and does not depend on:
//! - Any rendering or widget framework
//! - A host document representation (structural nodes live behind traits
//!   in the integration layer)
//! - Keyboard-event capture plumbing
//!
//! It depends only on `std` (plus `log` for tracing) and provides pure
//! editing semantics that can be tested independently and reused across
//! different host integrations.

mod autocomplete;
mod cursor;
mod store;
mod tag;
mod validity;

pub use autocomplete::{Candidate, Suggestion, suggest};
pub use cursor::{CursorController, DeleteArm, DeleteKind};
pub use store::TagStore;
pub use tag::{Tag, TagSettings};
pub use validity::{VALUE_MISSING_MESSAGE, Validity, evaluate};
