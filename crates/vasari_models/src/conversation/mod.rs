//! Conversation-style structured text generation.

mod client;
mod dto;
mod poll;

pub use client::ConversationClient;
pub use dto::{ConversationMessage, MessagePart, RunSnapshot, RunStatus, TextPart};
pub use poll::{PollConfig, RunStatusSource, await_terminal};
