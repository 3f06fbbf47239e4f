//! CursorRepository trait implementation.

use crate::PgPool;
use crate::models::{CursorRow, NewCursorRow};
use crate::schema::rotation_cursors;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::on_constraint;
use tracing::{info, instrument};
use vasari_core::RotationCursor;
use vasari_error::{DatabaseError, DatabaseErrorKind, VasariResult};
use vasari_interface::CursorRepository;

/// Database-backed rotation cursor repository.
#[derive(Clone)]
pub struct DatabaseCursorRepository {
    pool: PgPool,
}

impl DatabaseCursorRepository {
    /// Create a new cursor repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CursorRepository for DatabaseCursorRepository {
    #[instrument(skip(self), fields(tenant = %tenant_id, location = ?location_id))]
    async fn cursor(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
    ) -> VasariResult<Option<RotationCursor>> {
        let tenant_id = tenant_id.to_string();
        let location_id = location_id.map(|l| l.to_string());
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
            })?;

            let mut query = rotation_cursors::table
                .filter(rotation_cursors::tenant_id.eq(&tenant_id))
                .into_boxed();
            query = match &location_id {
                Some(location) => query.filter(rotation_cursors::location_id.eq(location)),
                None => query.filter(rotation_cursors::location_id.is_null()),
            };

            let row: Option<CursorRow> = query
                .first(&mut conn)
                .optional()
                .map_err(DatabaseError::from)?;

            Ok(row.map(RotationCursor::from))
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }

    #[instrument(
        skip(self, cursor),
        fields(
            tenant = %tenant_id,
            location = ?location_id,
            next_topic = cursor.next_topic,
            next_subtopic = cursor.next_subtopic,
            ready = cursor.ready,
        )
    )]
    async fn store_cursor(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
        cursor: RotationCursor,
    ) -> VasariResult<()> {
        let row = NewCursorRow {
            tenant_id: tenant_id.to_string(),
            location_id: location_id.map(|l| l.to_string()),
            next_topic: cursor.next_topic,
            next_subtopic: cursor.next_subtopic,
            ready: cursor.ready,
            updated_at: Utc::now().naive_utc(),
        };
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
            })?;

            diesel::insert_into(rotation_cursors::table)
                .values(&row)
                .on_conflict(on_constraint("rotation_cursors_scope_key"))
                .do_update()
                .set((
                    rotation_cursors::next_topic.eq(row.next_topic),
                    rotation_cursors::next_subtopic.eq(row.next_subtopic),
                    rotation_cursors::ready.eq(row.ready),
                    rotation_cursors::updated_at.eq(row.updated_at),
                ))
                .execute(&mut conn)
                .map_err(DatabaseError::from)?;

            Ok(())
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
        .map(|()| {
            info!("Advanced rotation cursor");
        })
    }
}
