//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **PageRequest / Page**: 1-based pagination request and result slice
//! - **CertificateFilter**: Tag, text and ordering criteria for certificate listings

mod certificate_filter;
mod page;

pub use certificate_filter::*;
pub use page::*;
