//! Middleware components for HTTP request processing.

pub mod validation;
