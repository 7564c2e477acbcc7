//! Insertion-position tracking and the two-press deletion state machine.
//!
//! The cursor is a logical index into the tag sequence, clamped to
//! `[0, len]` at all times. It marks where a newly confirmed tag is
//! inserted and which neighbouring tag a delete-class keystroke targets.
//!
//! Deletion is deliberately throttled: the first delete-class press with an
//! empty edit buffer only *arms* the adjacent tag; a second consecutive
//! press confirms and removes it. Without this, key repeat on backspace
//! would cascade through the whole collection.

fn clamp(val: usize, max: usize) -> usize {
    val.min(max)
}

/// Which neighbour a delete-class keystroke targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteKind {
    /// Backspace: the tag immediately before the cursor.
    Backward,
    /// Forward delete: the tag at/after the cursor.
    Forward,
}

/// State of the arm/confirm deletion protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeleteArm {
    #[default]
    Idle,
    /// A tag index is highlighted for deletion; the next consecutive
    /// delete-class press removes it.
    Armed(usize),
}

/// Tracks the logical insertion index plus the deletion state machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorController {
    index: usize,
    arm: DeleteArm,
}

impl CursorController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current insertion index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the cursor to `index`, clamped to `[0, len]`.
    pub fn set(&mut self, index: usize, len: usize) {
        self.index = clamp(index, len);
    }

    /// A tag was inserted at `at`; `len` is the new sequence length.
    ///
    /// Insertions at or before the cursor push it one step right.
    pub fn on_insert(&mut self, at: usize, len: usize) {
        if at <= self.index {
            self.index = clamp(self.index + 1, len);
        } else {
            self.index = clamp(self.index, len);
        }
        self.arm = DeleteArm::Idle;
    }

    /// A tag was removed from `at`; `len` is the new sequence length.
    ///
    /// Removals before the cursor pull it one step left.
    pub fn on_remove(&mut self, at: usize, len: usize) {
        if at < self.index {
            self.index = self.index.saturating_sub(1);
        }
        self.index = clamp(self.index, len);
        self.arm = DeleteArm::Idle;
    }

    /// The whole sequence was cleared.
    pub fn on_clear(&mut self) {
        self.index = 0;
        self.arm = DeleteArm::Idle;
    }

    /// The tag index a delete-class press would target, if any.
    pub fn delete_target(&self, kind: DeleteKind, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let target = match kind {
            DeleteKind::Backward => self.index.saturating_sub(1),
            DeleteKind::Forward => self.index,
        };
        Some(clamp(target, len - 1))
    }

    /// Register a delete-class press with an empty edit buffer.
    ///
    /// Returns `Some(index)` when the press confirms a previously armed
    /// tag, which the caller must then remove. Returns `None` when the
    /// press only armed a tag (or there was nothing to target).
    pub fn press_delete(&mut self, kind: DeleteKind, len: usize) -> Option<usize> {
        let target = self.delete_target(kind, len)?;
        match self.arm {
            DeleteArm::Armed(armed) if armed == target => {
                self.arm = DeleteArm::Idle;
                log::trace!(target: "tagfield.cursor", "delete confirmed at {target}");
                Some(target)
            }
            _ => {
                self.arm = DeleteArm::Armed(target);
                log::trace!(target: "tagfield.cursor", "delete armed at {target}");
                None
            }
        }
    }

    /// Any non-delete keystroke or a focus change cancels the protocol.
    pub fn disarm(&mut self) {
        self.arm = DeleteArm::Idle;
    }

    /// Index currently highlighted for deletion, if any.
    pub fn armed(&self) -> Option<usize> {
        match self.arm {
            DeleteArm::Armed(i) => Some(i),
            DeleteArm::Idle => None,
        }
    }
}
