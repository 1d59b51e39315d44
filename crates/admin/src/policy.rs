//! Role predicates and per-screen permission policies.
//!
//! The backend enforces authorization on every request. These predicates
//! mirror its decisions so back-office screens can reject an action
//! locally, before any request goes out, with the same answer the
//! backend would give.

use minimarket_core::Role;

/// Predicate over the signed-in role.
pub type RolePredicate = fn(Role) -> bool;

/// Back-office staff: administrators and sellers.
#[must_use]
pub fn staff(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Seller)
}

/// Administrators only.
#[must_use]
pub fn admin_only(role: Role) -> bool {
    role == Role::Admin
}

/// Who may view, create, and mutate one back-office screen.
///
/// `mutate` covers update and delete; the backend treats them as one
/// tier.
#[derive(Debug, Clone, Copy)]
pub struct ScreenPolicy {
    pub view: RolePredicate,
    pub create: RolePredicate,
    pub mutate: RolePredicate,
}

impl ScreenPolicy {
    /// Catalog-style screens: staff list and create, administrators
    /// update and delete.
    pub const STANDARD: Self = Self {
        view: staff,
        create: staff,
        mutate: admin_only,
    };

    /// The roles screen: administrators for everything, listing
    /// included.
    pub const ADMIN_ONLY: Self = Self {
        view: admin_only,
        create: admin_only,
        mutate: admin_only,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_admits_admin_and_seller() {
        assert!(staff(Role::Admin));
        assert!(staff(Role::Seller));
        assert!(!staff(Role::Customer));
    }

    #[test]
    fn test_admin_only_rejects_seller() {
        assert!(admin_only(Role::Admin));
        assert!(!admin_only(Role::Seller));
        assert!(!admin_only(Role::Customer));
    }

    #[test]
    fn test_standard_policy_reserves_mutation_for_admin() {
        assert!((ScreenPolicy::STANDARD.view)(Role::Seller));
        assert!((ScreenPolicy::STANDARD.create)(Role::Seller));
        assert!(!(ScreenPolicy::STANDARD.mutate)(Role::Seller));
        assert!((ScreenPolicy::STANDARD.mutate)(Role::Admin));
    }

    #[test]
    fn test_admin_only_policy_hides_listing_from_seller() {
        assert!(!(ScreenPolicy::ADMIN_ONLY.view)(Role::Seller));
        assert!((ScreenPolicy::ADMIN_ONLY.view)(Role::Admin));
    }
}
