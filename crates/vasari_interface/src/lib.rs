//! Trait definitions for the Vasari content generation engine.
//!
//! This crate provides the seams between the pipeline orchestrator and
//! its external collaborators: the generative text service, the image
//! synthesis service, durable object storage, and the relational
//! repositories. The pipeline depends only on these traits; concrete
//! implementations live in `vasari_models`, `vasari_storage`, and
//! `vasari_database`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{
    ArticleRepository, AssetStore, CursorRepository, ImageSynthesizer, TemplateStore,
    TenantDirectory, TextGenerator,
};
