#![deny(missing_docs)]

//! Core library for the Paperless MCP server.

/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Model Context Protocol server implementation.
pub mod mcp;
/// Paperless-ngx REST API integration.
pub mod paperless;
