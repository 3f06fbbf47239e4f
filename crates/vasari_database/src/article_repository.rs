//! ArticleRepository trait implementation.

use crate::PgPool;
use crate::models::NewArticleRow;
use crate::schema::articles;
use async_trait::async_trait;
use diesel::prelude::*;
use tracing::{info, instrument};
use vasari_core::{Article, Slot};
use vasari_error::{DatabaseError, DatabaseErrorKind, VasariResult};
use vasari_interface::ArticleRepository;

/// Database-backed article repository.
#[derive(Clone)]
pub struct DatabaseArticleRepository {
    pool: PgPool,
}

impl DatabaseArticleRepository {
    /// Create a new article repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for DatabaseArticleRepository {
    #[instrument(skip(self), fields(tenant = %tenant_id, location = ?location_id))]
    async fn claimed_slots(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
    ) -> VasariResult<Vec<Slot>> {
        let tenant_id = tenant_id.to_string();
        let location_id = location_id.map(|l| l.to_string());
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
            })?;

            let mut query = articles::table
                .filter(articles::tenant_id.eq(&tenant_id))
                .into_boxed();
            query = match &location_id {
                Some(location) => query.filter(articles::location_id.eq(location)),
                None => query.filter(articles::location_id.is_null()),
            };

            let coords: Vec<(i32, i32)> = query
                .select((articles::topic_number, articles::subtopic_number))
                .load(&mut conn)
                .map_err(DatabaseError::from)?;

            Ok(coords
                .into_iter()
                .map(|(topic, subtopic)| Slot::new(topic, subtopic))
                .collect())
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }

    #[instrument(
        skip(self, article),
        fields(
            tenant = %article.tenant_id,
            topic = article.topic_number,
            subtopic = article.subtopic_number,
        )
    )]
    async fn insert(&self, article: &Article) -> VasariResult<()> {
        let row = NewArticleRow::try_from(article)?;
        let slot = Slot::new(article.topic_number, article.subtopic_number);
        let tenant_id = article.tenant_id.clone();
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()))
            })?;

            diesel::insert_into(articles::table)
                .values(&row)
                .execute(&mut conn)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _,
                    ) => DatabaseError::new(DatabaseErrorKind::Conflict(format!(
                        "tenant {tenant_id} slot {slot}"
                    ))),
                    other => DatabaseError::from(other),
                })?;

            Ok(())
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
        .map(|()| {
            info!("Inserted article record");
        })
    }
}
