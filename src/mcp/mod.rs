//! Model Context Protocol (MCP) integration for the Paperless archive.
//!
//! This module wires the Paperless REST client into an MCP server so agent hosts
//! can query a document archive over stdio. The surface area consists of three
//! tools: `search_documents`, `get_document`, and `download_document`.
//!
//! Handlers, schemas, and formatting helpers are kept in focused submodules to
//! make tests and reviews small and targeted.

mod format;
pub mod handlers;
mod registry;
mod schemas;
mod server;

pub use server::PaperlessMcpServer;
