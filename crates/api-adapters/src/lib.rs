//! # api-adapters
//!
//! The HTTP surface of rusty-blog: thin handlers mapping verbs and paths to
//! the services, plus the bearer-token extractor and the error-to-status
//! mapping. Gated so non-web builds never pull the web stack.

#[cfg(feature = "web-axum")]
pub mod web;
