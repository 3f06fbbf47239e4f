//! Row structs and conversions between database rows and core types.

use crate::schema::{articles, rotation_cursors};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;
use vasari_core::{Article, Location, RotationCursor, SlotTemplate, Tenant};
use vasari_error::{DatabaseError, DatabaseErrorKind};

#[derive(Debug, Queryable)]
pub(crate) struct TenantRow {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub canonical_url: String,
    #[allow(dead_code)]
    pub created_at: NaiveDateTime,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            state: row.state,
            phone: row.phone,
            canonical_url: row.canonical_url,
        }
    }
}

#[derive(Debug, Queryable)]
pub(crate) struct LocationRow {
    pub id: String,
    pub tenant_id: String,
    pub city: Option<String>,
    pub state: Option<String>,
    #[allow(dead_code)]
    pub created_at: NaiveDateTime,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location {
            id: row.id,
            tenant_id: row.tenant_id,
            city: row.city,
            state: row.state,
        }
    }
}

#[derive(Debug, Queryable)]
pub(crate) struct TemplateRow {
    pub topic: i32,
    pub subtopic: i32,
    pub topic_name: String,
    pub subtopic_name: String,
    pub related_links: JsonValue,
}

impl TryFrom<TemplateRow> for SlotTemplate {
    type Error = DatabaseError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        let related_links: Vec<String> = serde_json::from_value(row.related_links)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Serialization(e.to_string())))?;
        Ok(SlotTemplate {
            topic: row.topic,
            subtopic: row.subtopic,
            topic_name: row.topic_name,
            subtopic_name: row.subtopic_name,
            related_links,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow {
    pub id: Uuid,
    pub tenant_id: String,
    pub location_id: Option<String>,
    pub topic_number: i32,
    pub subtopic_number: i32,
    pub title: String,
    pub slug: String,
    pub content_summary: String,
    pub hero: Option<JsonValue>,
    pub structured_sections: JsonValue,
    pub related_links: JsonValue,
    pub structured_data: JsonValue,
    pub image_url: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
}

impl TryFrom<&Article> for NewArticleRow {
    type Error = DatabaseError;

    fn try_from(article: &Article) -> Result<Self, Self::Error> {
        Ok(Self {
            id: article.id,
            tenant_id: article.tenant_id.clone(),
            location_id: article.location_id.clone(),
            topic_number: article.topic_number,
            subtopic_number: article.subtopic_number,
            title: article.title.clone(),
            slug: article.slug.clone(),
            content_summary: article.content_summary.clone(),
            hero: article
                .hero
                .as_ref()
                .map(serde_json::to_value)
                .transpose()
                .map_err(json_err)?,
            structured_sections: serde_json::to_value(&article.structured_sections)
                .map_err(json_err)?,
            related_links: serde_json::to_value(&article.related_links).map_err(json_err)?,
            structured_data: serde_json::to_value(&article.structured_data).map_err(json_err)?,
            image_url: article.image_url.clone(),
            published: article.published,
            created_at: article.created_at,
        })
    }
}

fn json_err(e: serde_json::Error) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Serialization(e.to_string()))
}

#[derive(Debug, Queryable)]
pub(crate) struct CursorRow {
    #[allow(dead_code)]
    pub id: i32,
    #[allow(dead_code)]
    pub tenant_id: String,
    #[allow(dead_code)]
    pub location_id: Option<String>,
    pub next_topic: i32,
    pub next_subtopic: i32,
    pub ready: bool,
    #[allow(dead_code)]
    pub updated_at: NaiveDateTime,
}

impl From<CursorRow> for RotationCursor {
    fn from(row: CursorRow) -> Self {
        RotationCursor {
            next_topic: row.next_topic,
            next_subtopic: row.next_subtopic,
            ready: row.ready,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = rotation_cursors)]
pub(crate) struct NewCursorRow {
    pub tenant_id: String,
    pub location_id: Option<String>,
    pub next_topic: i32,
    pub next_subtopic: i32,
    pub ready: bool,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vasari_core::{ArticleSection, StructuredData};

    #[test]
    fn article_converts_to_row_and_back_preserves_links() {
        let article = Article {
            id: Uuid::new_v4(),
            tenant_id: "acme-id".into(),
            location_id: None,
            topic_number: 1,
            subtopic_number: 1,
            title: "Whats New".into(),
            slug: "whats-new".into(),
            content_summary: "Summary.".into(),
            hero: None,
            structured_sections: vec![ArticleSection {
                heading: "H".into(),
                body: "B".into(),
            }],
            related_links: vec!["Contact Acme".into()],
            structured_data: StructuredData::default(),
            image_url: "https://assets.example.com/acme-id/whats-new.png".into(),
            published: true,
            created_at: Utc::now().naive_utc(),
        };

        let row = NewArticleRow::try_from(&article).unwrap();
        assert_eq!(row.slug, "whats-new");
        let links: Vec<String> = serde_json::from_value(row.related_links).unwrap();
        assert_eq!(links, vec!["Contact Acme".to_string()]);
    }

    #[test]
    fn template_row_rejects_malformed_links() {
        let row = TemplateRow {
            topic: 1,
            subtopic: 1,
            topic_name: "T".into(),
            subtopic_name: "S".into(),
            related_links: serde_json::json!({"not": "a list"}),
        };
        assert!(SlotTemplate::try_from(row).is_err());
    }
}
