//! Diesel table definitions.
//!
//! Mirrors `migrations/`; regenerate with `diesel print-schema` after
//! editing the SQL.

diesel::table! {
    /// Tenant directory records.
    tenants (id) {
        /// Stable tenant identifier
        id -> Text,
        /// Display name
        name -> Text,
        /// Street address
        address -> Nullable<Text>,
        /// City
        city -> Nullable<Text>,
        /// State or region
        state -> Nullable<Text>,
        /// Contact phone
        phone -> Nullable<Text>,
        /// Canonical site domain
        canonical_url -> Text,
        /// Row creation time
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Tenant sub-locations.
    locations (id) {
        /// Stable location identifier
        id -> Text,
        /// Owning tenant
        tenant_id -> Text,
        /// Location city
        city -> Nullable<Text>,
        /// Location state
        state -> Nullable<Text>,
        /// Row creation time
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Pre-seeded slot template grid.
    slot_templates (topic, subtopic) {
        /// Topic coordinate
        topic -> Int4,
        /// Subtopic coordinate
        subtopic -> Int4,
        /// Token-bearing topic display name
        topic_name -> Text,
        /// Token-bearing subtopic display name
        subtopic_name -> Text,
        /// Token-bearing related-link strings
        related_links -> Jsonb,
    }
}

diesel::table! {
    /// Generated article records.
    articles (id) {
        /// Record identifier
        id -> Uuid,
        /// Owning tenant
        tenant_id -> Text,
        /// Owning location, when location-scoped
        location_id -> Nullable<Text>,
        /// Topic coordinate
        topic_number -> Int4,
        /// Subtopic coordinate
        subtopic_number -> Int4,
        /// Article title
        title -> Text,
        /// Canonical slug
        slug -> Text,
        /// Content summary
        content_summary -> Text,
        /// Optional hero block
        hero -> Nullable<Jsonb>,
        /// Structured body sections
        structured_sections -> Jsonb,
        /// Interpolated related links
        related_links -> Jsonb,
        /// Sanitized structured-data block
        structured_data -> Jsonb,
        /// Durable public image URL
        image_url -> Text,
        /// Publication flag
        published -> Bool,
        /// Insertion time
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Per-scope rotation cursors.
    rotation_cursors (id) {
        /// Surrogate key
        id -> Int4,
        /// Owning tenant
        tenant_id -> Text,
        /// Owning location, when location-scoped
        location_id -> Nullable<Text>,
        /// Topic coordinate of the next slot
        next_topic -> Int4,
        /// Subtopic coordinate of the next slot
        next_subtopic -> Int4,
        /// Whether any slot remains
        ready -> Bool,
        /// Last rewrite time
        updated_at -> Timestamp,
    }
}

diesel::joinable!(locations -> tenants (tenant_id));

diesel::allow_tables_to_appear_in_same_query!(
    tenants,
    locations,
    slot_templates,
    articles,
    rotation_cursors,
);
