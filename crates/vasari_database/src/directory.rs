//! TenantDirectory trait implementation.

use crate::PgPool;
use crate::models::{LocationRow, TenantRow};
use crate::schema::{locations, tenants};
use async_trait::async_trait;
use diesel::prelude::*;
use tracing::instrument;
use vasari_core::{Location, Tenant};
use vasari_error::{DatabaseError, DatabaseErrorKind, VasariResult};
use vasari_interface::TenantDirectory;

/// Database-backed tenant directory.
#[derive(Clone)]
pub struct DatabaseDirectory {
    pool: PgPool,
}

impl DatabaseDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantDirectory for DatabaseDirectory {
    #[instrument(skip(self), fields(tenant = %tenant_id))]
    async fn tenant(&self, tenant_id: &str) -> VasariResult<Tenant> {
        let tenant_id = tenant_id.to_string();
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
            })?;

            let row: Option<TenantRow> = tenants::table
                .find(&tenant_id)
                .first(&mut conn)
                .optional()
                .map_err(DatabaseError::from)?;

            match row {
                Some(row) => Ok(Tenant::from(row)),
                None => Err(DatabaseError::new(DatabaseErrorKind::NotFound(format!(
                    "tenant {tenant_id}"
                )))
                .into()),
            }
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }

    #[instrument(skip(self), fields(tenant = %tenant_id, location = %location_id))]
    async fn location(&self, tenant_id: &str, location_id: &str) -> VasariResult<Location> {
        let tenant_id = tenant_id.to_string();
        let location_id = location_id.to_string();
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
            })?;

            let row: Option<LocationRow> = locations::table
                .find(&location_id)
                .filter(locations::tenant_id.eq(&tenant_id))
                .first(&mut conn)
                .optional()
                .map_err(DatabaseError::from)?;

            match row {
                Some(row) => Ok(Location::from(row)),
                None => Err(DatabaseError::new(DatabaseErrorKind::NotFound(format!(
                    "location {location_id} of tenant {tenant_id}"
                )))
                .into()),
            }
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }
}
