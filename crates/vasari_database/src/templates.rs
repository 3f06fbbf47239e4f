//! TemplateStore trait implementation.

use crate::PgPool;
use crate::models::TemplateRow;
use crate::schema::slot_templates;
use async_trait::async_trait;
use diesel::prelude::*;
use tracing::instrument;
use vasari_core::{Slot, SlotTemplate};
use vasari_error::{DatabaseError, DatabaseErrorKind, VasariResult};
use vasari_interface::TemplateStore;

/// Database-backed slot template store.
///
/// The grid is seeded once per deployment by migration; a missing
/// template means the seed is incomplete, which is surfaced as a
/// not-found error rather than silently skipping the slot.
#[derive(Clone)]
pub struct DatabaseTemplateStore {
    pool: PgPool,
}

impl DatabaseTemplateStore {
    /// Create a new template store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStore for DatabaseTemplateStore {
    #[instrument(skip(self), fields(topic = slot.topic, subtopic = slot.subtopic))]
    async fn template(&self, slot: Slot) -> VasariResult<SlotTemplate> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
            })?;

            let row: Option<TemplateRow> = slot_templates::table
                .find((slot.topic, slot.subtopic))
                .first(&mut conn)
                .optional()
                .map_err(DatabaseError::from)?;

            match row {
                Some(row) => Ok(SlotTemplate::try_from(row)?),
                None => Err(DatabaseError::new(DatabaseErrorKind::NotFound(format!(
                    "slot template {slot}"
                )))
                .into()),
            }
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }
}
