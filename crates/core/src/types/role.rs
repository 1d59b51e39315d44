//! Permission tiers for store accounts.

use serde::{Deserialize, Serialize};

/// Account role with different permission levels.
///
/// The backend names these in Spanish on the wire (`ADMIN`, `VENDEDOR`,
/// `CLIENTE`); the serde renames keep that format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access to every back-office screen including users and roles.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Can create records in the back-office but not modify or delete them.
    #[serde(rename = "VENDEDOR")]
    Seller,
    /// Storefront only: catalog, cart, checkout, own orders.
    #[serde(rename = "CLIENTE")]
    Customer,
}

impl Role {
    /// The backend's name for this role.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Seller => "VENDEDOR",
            Self::Customer => "CLIENTE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Seller => write!(f, "VENDEDOR"),
            Self::Customer => write!(f, "CLIENTE"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "VENDEDOR" => Ok(Self::Seller),
            "CLIENTE" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_names_match_backend() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"VENDEDOR\"");
        let role: Role = serde_json::from_str("\"CLIENTE\"").unwrap();
        assert_eq!(role, Role::Customer);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for role in [Role::Admin, Role::Seller, Role::Customer] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(Role::from_str("GERENTE").is_err());
    }
}
