//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the store.
//! All entities map directly to their corresponding database tables.
//!
//! - **Tag**: A unique label assignable to certificates
//! - **Certificate**: A purchasable gift certificate with a tag set
//! - **User**: A customer or administrator account
//! - **UserOrder**: A purchase of a certificate by a user
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod certificate;
mod order;
mod tag;
mod user;

pub use certificate::{Certificate, CertificateRepository, NewCertificate};
pub use order::{NewUserOrder, OrderRepository, UserOrder};
pub use tag::{Tag, TagRepository};
pub use user::{NewUser, Role, User, UserRepository};

#[cfg(test)]
pub use certificate::MockCertificateRepository;
#[cfg(test)]
pub use order::MockOrderRepository;
#[cfg(test)]
pub use tag::MockTagRepository;
#[cfg(test)]
pub use user::MockUserRepository;
