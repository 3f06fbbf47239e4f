//! Core data types for the Vasari content generation engine.
//!
//! This crate provides the foundation data types and pure functions used
//! across the Vasari workspace: the slot grid, the rotation cursor, tenant
//! and template records, token interpolation, slug canonicalization, and
//! the article draft/record shapes exchanged with the generation pipeline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod article;
mod cursor;
mod media;
mod request;
mod slot;
mod slug;
mod telemetry;
mod template;
mod tenant;
mod tokens;

pub use article::{Article, ArticleDraft, ArticleSection, HeroBlock, StructuredData};
pub use cursor::RotationCursor;
pub use media::ImageSource;
pub use request::{
    GenerationRequest, GenerationRequestBuilder, GenerationRequestBuilderError, ImagePromptRequest,
};
pub use slot::{GRID_SUBTOPICS, GRID_TOPICS, Slot};
pub use slug::canonical_slug;
pub use telemetry::init_telemetry;
pub use template::SlotTemplate;
pub use tenant::{Location, Tenant};
pub use tokens::{interpolate, interpolate_all};
