//! Cross-layer notification vocabulary.

/// Item-level notification detail for one accepted mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagUpdate {
    Added {
        value: String,
        /// Whether the value pre-existed in the options source at the time
        /// of the addition (i.e. it was not a new, free-typed value).
        known_option: bool,
    },
    Removed {
        value: String,
    },
}

/// Scoped notification policy for a single mutation call.
///
/// Suppression is passed explicitly into each mutating call rather than
/// living as mutable state on the engine, so reentrancy reasoning stays
/// local. Suppressed mutations still change state and still refresh the
/// form projection; they skip the update/change notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notify {
    Emit,
    Suppress,
}
