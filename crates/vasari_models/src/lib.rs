//! External generation service clients for Vasari.
//!
//! This crate implements the HTTP protocol adapters behind the
//! `vasari_interface` seams: the conversation-style structured text
//! generation client (create conversation → post message → start run →
//! poll → retrieve) and the single-shot image synthesis client. Both are
//! thin adapters over `reqwest` with parse-then-trust DTOs at the wire
//! boundary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod conversation;
mod images;

pub use conversation::{
    ConversationClient, ConversationMessage, MessagePart, PollConfig, RunSnapshot, RunStatus,
    RunStatusSource, TextPart, await_terminal,
};
pub use images::{ImageClient, ImageRequest, ImageResponse, ImageResult};
