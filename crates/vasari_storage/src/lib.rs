//! Durable asset publishing for Vasari.
//!
//! The image synthesis service hands back transient content; this crate
//! republishes it into durable object storage under a deterministic,
//! slug-addressed path and returns the stable public URL that gets
//! persisted with the article. Two [`vasari_interface::AssetStore`]
//! backends are provided: an HTTP bucket store for hosted object storage
//! and a filesystem store for self-hosted deployments and tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bucket;
mod filesystem;
mod publisher;

pub use bucket::HttpBucketStore;
pub use filesystem::FileSystemStore;
pub use publisher::AssetPublisher;
