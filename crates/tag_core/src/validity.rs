//! Required-field satisfaction derived from the store size.

/// Message reported when a required collection is empty.
pub const VALUE_MISSING_MESSAGE: &str = "Please fill out this field.";

/// Outcome of a validity evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validity {
    pub valid: bool,
    /// Human-readable failure message; empty when valid.
    pub message: &'static str,
}

impl Validity {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: "",
        }
    }

    pub fn value_missing() -> Self {
        Self {
            valid: false,
            message: VALUE_MISSING_MESSAGE,
        }
    }
}

/// Evaluate required-field satisfaction.
///
/// Invalid iff `required` is set and the store is empty. Must be
/// re-evaluated after every store mutation and after every
/// requiredness/cardinality configuration change.
pub fn evaluate(required: bool, store_len: usize) -> Validity {
    if required && store_len == 0 {
        Validity::value_missing()
    } else {
        Validity::ok()
    }
}
