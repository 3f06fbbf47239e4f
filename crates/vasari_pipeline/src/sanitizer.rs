//! Output sanitization.
//!
//! The generator is an untrusted collaborator; routing- and
//! freshness-significant fields are recomputed from trusted inputs
//! rather than taken from its output.

use chrono::NaiveDate;
use vasari_core::{ArticleDraft, Tenant, canonical_slug};

/// Recompute the draft's canonical slug, structured-data URL, and
/// publication date from trusted inputs.
///
/// The slug is derived from the generated title; whatever slug the
/// generator proposed is discarded. The structured-data URL is rebuilt
/// from the tenant's canonical domain, the topic slug, and the corrected
/// slug, and the publish date is overwritten with `today`. Empty
/// headline/description fall back to the title and summary.
///
/// Total: defective input degrades to best-effort output (an empty title
/// yields an empty slug) instead of failing.
pub fn correct_draft(
    mut draft: ArticleDraft,
    tenant: &Tenant,
    topic_name: &str,
    today: NaiveDate,
) -> ArticleDraft {
    let slug = canonical_slug(&draft.title);
    let topic_slug = canonical_slug(topic_name);
    let base = tenant.canonical_url.trim_end_matches('/');

    draft.structured_data.url = format!("{base}/{topic_slug}/{slug}");
    draft.structured_data.date_published = today.format("%Y-%m-%d").to_string();
    if draft.structured_data.headline.is_empty() {
        draft.structured_data.headline = draft.title.clone();
    }
    if draft.structured_data.description.is_empty() {
        draft.structured_data.description = draft.summary.clone();
    }
    draft.slug = slug;
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use vasari_core::StructuredData;

    fn tenant() -> Tenant {
        Tenant {
            id: "acme-id".into(),
            name: "Acme".into(),
            canonical_url: "https://acme.example.com/".into(),
            ..Tenant::default()
        }
    }

    fn draft() -> ArticleDraft {
        ArticleDraft {
            title: "What's New? Auto & Home!".into(),
            slug: "../../etc/passwd".into(),
            summary: "A summary.".into(),
            hero: None,
            sections: vec![],
            structured_data: StructuredData {
                headline: String::new(),
                description: String::new(),
                url: "https://evil.example.com/phishing".into(),
                date_published: "1999-01-01".into(),
            },
        }
    }

    #[test]
    fn replaces_generator_slug_with_canonical_form() {
        let out = correct_draft(draft(), &tenant(), "Auto Insurance", date());
        assert_eq!(out.slug, "whats-new-auto-home");
    }

    #[test]
    fn rebuilds_url_ignoring_generator_value() {
        let out = correct_draft(draft(), &tenant(), "Auto Insurance", date());
        assert_eq!(
            out.structured_data.url,
            "https://acme.example.com/auto-insurance/whats-new-auto-home"
        );
    }

    #[test]
    fn overwrites_publish_date() {
        let out = correct_draft(draft(), &tenant(), "Auto Insurance", date());
        assert_eq!(out.structured_data.date_published, "2026-08-06");
    }

    #[test]
    fn fills_empty_headline_and_description() {
        let out = correct_draft(draft(), &tenant(), "Auto Insurance", date());
        assert_eq!(out.structured_data.headline, "What's New? Auto & Home!");
        assert_eq!(out.structured_data.description, "A summary.");
    }

    #[test]
    fn total_on_empty_title() {
        let mut empty = draft();
        empty.title = String::new();
        let out = correct_draft(empty, &tenant(), "", date());
        assert_eq!(out.slug, "");
        assert_eq!(out.structured_data.url, "https://acme.example.com//");
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }
}
