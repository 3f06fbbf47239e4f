//! Article draft and persisted record types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One structured body section of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSection {
    /// Section heading
    pub heading: String,
    /// Section body text
    pub body: String,
}

/// The above-the-fold hero block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroBlock {
    /// Hero heading
    pub heading: String,
    /// Supporting tagline
    #[serde(default)]
    pub tagline: String,
}

/// The schema.org-style structured-data block embedded in each page.
///
/// The `url` and `date_published` fields are routing- and
/// freshness-significant and are always overwritten by the sanitizer;
/// whatever the generator put there is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StructuredData {
    /// Article headline
    #[serde(default)]
    pub headline: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Canonical page URL, rebuilt server-side
    #[serde(default)]
    pub url: String,
    /// ISO-8601 publication date, rewritten server-side
    #[serde(default)]
    pub date_published: String,
}

/// The generator's parsed output for one article, before sanitization.
///
/// This is the parse-then-trust boundary: the raw assistant text is
/// deserialized into this shape, and only then do the sanitizer and
/// pipeline operate on it. Everything except the title tolerates absence,
/// since generator output is best-effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    /// Article title
    pub title: String,
    /// Generator-proposed slug; replaced by the canonical slug
    #[serde(default)]
    pub slug: String,
    /// Content summary shown in listings
    #[serde(default)]
    pub summary: String,
    /// Optional hero block
    #[serde(default)]
    pub hero: Option<HeroBlock>,
    /// Structured body sections
    #[serde(default)]
    pub sections: Vec<ArticleSection>,
    /// Structured-data block
    #[serde(default)]
    pub structured_data: StructuredData,
}

/// The persisted article record.
///
/// Created exactly once per slot by the pipeline and never mutated by it
/// afterwards; content edits belong to a separate authoring flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Record identifier
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: String,
    /// Owning location, when the grid is location-scoped
    pub location_id: Option<String>,
    /// Topic coordinate
    pub topic_number: i32,
    /// Subtopic coordinate
    pub subtopic_number: i32,
    /// Article title
    pub title: String,
    /// Canonical slug
    pub slug: String,
    /// Content summary
    pub content_summary: String,
    /// Optional hero block
    pub hero: Option<HeroBlock>,
    /// Structured body sections
    pub structured_sections: Vec<ArticleSection>,
    /// Interpolated related links, byte-identical to what generation saw
    pub related_links: Vec<String>,
    /// Sanitized structured-data block
    pub structured_data: StructuredData,
    /// Durable public image URL
    pub image_url: String,
    /// Publication flag
    pub published: bool,
    /// Insertion timestamp
    pub created_at: NaiveDateTime,
}
