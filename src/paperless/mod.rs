//! Paperless-ngx REST API integration.

pub mod client;
pub mod types;

pub use client::{PaperlessClient, SearchQuery};
pub use types::{Document, ListEnvelope, PaperlessError, Tag, TagCache};
