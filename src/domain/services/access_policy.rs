//! Role-based access rules.

use crate::domain::entities::Role;

/// Domain service deciding what a caller may do.
///
/// Admins may do everything. Users may read the public catalog, order
/// certificates, and read their own account and orders.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Changing the catalog, and listing every order or user.
    pub fn can_manage_catalog(role: Role) -> bool {
        role == Role::Admin
    }

    /// Reading a resource owned by `owner_id`.
    pub fn can_access_owned(actor_id: i64, role: Role, owner_id: i64) -> bool {
        role == Role::Admin || actor_id == owner_id
    }
}
