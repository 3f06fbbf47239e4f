//! Content slot coordinates within the fixed topic/subtopic grid.

use serde::{Deserialize, Serialize};

/// Number of topics in the content grid.
pub const GRID_TOPICS: i32 = 10;

/// Number of subtopics per topic in the content grid.
pub const GRID_SUBTOPICS: i32 = 10;

/// One (topic, subtopic) coordinate in the content grid.
///
/// Coordinates are 1-based on both axes. At most one persisted article
/// exists per (tenant, location, topic, subtopic).
///
/// # Examples
///
/// ```
/// use vasari_core::Slot;
///
/// let slot = Slot::new(1, 1);
/// assert_eq!(slot.successor(), Some(Slot::new(1, 2)));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_new::new,
)]
pub struct Slot {
    /// Topic coordinate, 1-based
    pub topic: i32,
    /// Subtopic coordinate, 1-based
    pub subtopic: i32,
}

impl Slot {
    /// The first slot in row-major order.
    pub const FIRST: Slot = Slot {
        topic: 1,
        subtopic: 1,
    };

    /// Iterate every slot in row-major order: topic is the outer loop,
    /// subtopic the inner one.
    pub fn row_major() -> impl Iterator<Item = Slot> {
        (1..=GRID_TOPICS)
            .flat_map(|topic| (1..=GRID_SUBTOPICS).map(move |subtopic| Slot { topic, subtopic }))
    }

    /// The next slot in row-major order, or `None` when this is the last
    /// slot of the grid.
    pub fn successor(&self) -> Option<Slot> {
        if self.subtopic < GRID_SUBTOPICS {
            Some(Slot {
                topic: self.topic,
                subtopic: self.subtopic + 1,
            })
        } else if self.topic < GRID_TOPICS {
            Some(Slot {
                topic: self.topic + 1,
                subtopic: 1,
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.topic, self.subtopic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_covers_grid_in_order() {
        let slots: Vec<Slot> = Slot::row_major().collect();
        assert_eq!(slots.len(), (GRID_TOPICS * GRID_SUBTOPICS) as usize);
        assert_eq!(slots[0], Slot::FIRST);
        assert_eq!(slots[1], Slot::new(1, 2));
        assert_eq!(slots[GRID_SUBTOPICS as usize], Slot::new(2, 1));
        assert_eq!(
            slots.last().copied(),
            Some(Slot::new(GRID_TOPICS, GRID_SUBTOPICS))
        );
    }

    #[test]
    fn successor_wraps_rows() {
        assert_eq!(Slot::new(3, 10).successor(), Some(Slot::new(4, 1)));
        assert_eq!(Slot::new(1, 1).successor(), Some(Slot::new(1, 2)));
    }

    #[test]
    fn successor_ends_at_grid_boundary() {
        assert_eq!(Slot::new(10, 10).successor(), None);
    }
}
