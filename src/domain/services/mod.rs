//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity.
//!
//! - **AccessPolicy**: Role and ownership checks for API callers

mod access_policy;

pub use access_policy::*;
