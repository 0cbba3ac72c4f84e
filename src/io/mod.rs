//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `feed` - HTTP client for the raw snapshot endpoint
//! - `chat` - chat-completions integration for the building assistant
//! - `egress` - classification report output to file (JSONL format)

pub mod chat;
pub mod egress;
pub mod feed;

// Re-export commonly used types
pub use chat::{build_context, AssistantClient};
pub use egress::{ClassificationReport, DirectoryEntry, Egress};
pub use feed::FeedClient;
