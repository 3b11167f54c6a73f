//! HTTP API
//!
//! Routes, handlers, extractors and hypermedia links.

pub mod extractors;
pub mod handlers;
pub mod hateoas;
pub mod routes;
