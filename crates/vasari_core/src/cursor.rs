//! Rotation cursor state and advancement arithmetic.

use crate::{GRID_SUBTOPICS, GRID_TOPICS, Slot};
use serde::{Deserialize, Serialize};

/// Persisted pointer to the next slot a scheduler should request.
///
/// One cursor row exists per (tenant, location); the scope itself is
/// carried by the repository key, not by this value. The cursor is
/// rewritten only after a fully successful pipeline run and is never
/// advanced on a failure path.
///
/// # Examples
///
/// ```
/// use vasari_core::{RotationCursor, Slot};
///
/// let cursor = RotationCursor::after(Slot::new(3, 10));
/// assert_eq!(cursor.next_topic, 4);
/// assert_eq!(cursor.next_subtopic, 1);
/// assert!(cursor.ready);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationCursor {
    /// Topic coordinate of the next slot to request
    pub next_topic: i32,
    /// Subtopic coordinate of the next slot to request
    pub next_subtopic: i32,
    /// Whether any slot remains; false once the grid is exhausted
    pub ready: bool,
}

impl RotationCursor {
    /// The cursor state for the slot that follows `produced` in row-major
    /// order.
    ///
    /// When `produced` is the last slot of the grid the coordinates clamp
    /// to the grid boundary and `ready` drops to false, signalling
    /// exhaustion to the scheduler.
    pub fn after(produced: Slot) -> Self {
        match produced.successor() {
            Some(next) => Self {
                next_topic: next.topic,
                next_subtopic: next.subtopic,
                ready: true,
            },
            None => Self {
                next_topic: GRID_TOPICS,
                next_subtopic: GRID_SUBTOPICS,
                ready: false,
            },
        }
    }

    /// The slot this cursor points at.
    pub fn slot(&self) -> Slot {
        Slot::new(self.next_topic, self.next_subtopic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_within_a_row() {
        let cursor = RotationCursor::after(Slot::new(1, 1));
        assert_eq!(cursor.slot(), Slot::new(1, 2));
        assert!(cursor.ready);
    }

    #[test]
    fn wraps_to_next_topic_at_row_end() {
        let cursor = RotationCursor::after(Slot::new(3, 10));
        assert_eq!(cursor.slot(), Slot::new(4, 1));
        assert!(cursor.ready);
    }

    #[test]
    fn clamps_and_clears_ready_on_exhaustion() {
        let cursor = RotationCursor::after(Slot::new(10, 10));
        assert_eq!(cursor.slot(), Slot::new(10, 10));
        assert!(!cursor.ready);
    }
}
