//! Pre-seeded slot templates.

use crate::Slot;
use serde::{Deserialize, Serialize};

/// The immutable template for one slot of the content grid.
///
/// Templates are seeded once per deployment and read-only from the
/// pipeline's perspective. Their name and link strings carry
/// `{client_*}` tokens that are interpolated per tenant before
/// generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTemplate {
    /// Topic coordinate this template belongs to
    pub topic: i32,
    /// Subtopic coordinate this template belongs to
    pub subtopic: i32,
    /// Token-bearing topic display name
    pub topic_name: String,
    /// Token-bearing subtopic display name
    pub subtopic_name: String,
    /// Token-bearing related-link strings
    pub related_links: Vec<String>,
}

impl SlotTemplate {
    /// The slot coordinate this template describes.
    pub fn slot(&self) -> Slot {
        Slot::new(self.topic, self.subtopic)
    }
}
