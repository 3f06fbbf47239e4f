//! Slot allocation.

use std::collections::HashSet;
use vasari_core::Slot;

/// The first unclaimed slot in row-major order, or `None` once every
/// slot of the grid is taken.
///
/// Exhaustion is an expected terminal condition for a scope, not a
/// failure; callers surface it as an empty outcome. Deterministic and
/// side-effect free: the same claimed set always yields the same answer.
///
/// # Examples
///
/// ```
/// use vasari_core::Slot;
/// use vasari_pipeline::first_open_slot;
///
/// assert_eq!(first_open_slot(&[]), Some(Slot::new(1, 1)));
/// assert_eq!(first_open_slot(&[Slot::new(1, 1)]), Some(Slot::new(1, 2)));
/// ```
pub fn first_open_slot(claimed: &[Slot]) -> Option<Slot> {
    let taken: HashSet<Slot> = claimed.iter().copied().collect();
    Slot::row_major().find(|slot| !taken.contains(slot))
}
