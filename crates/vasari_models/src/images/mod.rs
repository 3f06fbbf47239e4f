//! Image synthesis.

mod client;
mod dto;

pub use client::ImageClient;
pub use dto::{ImageRequest, ImageResponse, ImageResult};
