//! # SpeicherBaum Backend Library
//!
//! Core library for SpeicherBaum, a storage service that keeps a tree of
//! files and folders consistent while clients import, delete and browse it
//! over a REST API.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: HTTP server and routing
//! - **SQLx**: Asynchronous database operations with SQLite
//! - **Tokio**: Async runtime
//! - **Serde**: Serialization/deserialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`config`]: Application configuration management
//! - [`db`]: Database schema initialization
//! - [`error`]: Centralized error handling and HTTP error responses
//! - [`metrics`]: Operation counters
//! - [`middleware`]: HTTP middleware for request validation
//! - [`routes`]: HTTP API endpoint handlers
//! - [`state`]: Shared application state
//! - [`tree`]: Node repository, batch validation, mutations and queries
//! - [`types`]: Data transfer objects shared by the API
//!
//! ## Features
//!
//! - Atomic batch imports with full referential validation
//! - Cascading deletes that refresh every ancestor's timestamp
//! - Recursive node views with derived folder sizes
//! - 24-hour change feed and `home/...` path browsing

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tree;
pub mod types;

#[cfg(test)]
mod tests;
