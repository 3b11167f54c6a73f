//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod certificate;
pub mod health;
pub mod order;
pub mod tag;
pub mod user;
