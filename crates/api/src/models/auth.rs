//! Authentication, user, and role wire types.

use minimarket_core::{Role, RoleId, UserId};
use serde::{Deserialize, Serialize};

/// Role id the backend seeds for customer self-registration (`CLIENTE`).
pub const CUSTOMER_ROLE_ID: RoleId = RoleId::new(2);

/// Body for `POST auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST auth/register`. Self-registration always creates a
/// customer account; see [`CUSTOMER_ROLE_ID`].
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellidos")]
    pub last_name: String,
    pub email: String,
    pub dni: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "contrasena")]
    pub password: String,
    #[serde(rename = "rolId")]
    pub role_id: RoleId,
    #[serde(rename = "imagen")]
    pub image: String,
}

/// Response from login, register, and profile update: the account plus a
/// fresh bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// A user account as the backend serves it.
///
/// Also persisted locally as part of the session document, so it derives
/// `Serialize` as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellidos")]
    pub last_name: String,
    pub email: String,
    pub dni: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "rol")]
    pub role: RoleRecord,
}

impl User {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A role record ({ id, nombreRol }), both as nested inside a [`User`]
/// and as the entity managed on the roles screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: RoleId,
    #[serde(rename = "nombreRol")]
    pub name: String,
}

impl RoleRecord {
    /// Parse the role name into the known permission tiers.
    ///
    /// Roles are user-manageable, so names outside the three seeded tiers
    /// can exist; those return `None` and grant no back-office access.
    #[must_use]
    pub fn as_role(&self) -> Option<Role> {
        self.name.parse().ok()
    }
}

/// Body for `POST roles`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRole {
    #[serde(rename = "nombreRol")]
    pub name: String,
}

/// Body for `PUT roles`, keyed on `id` like the category update.
#[derive(Debug, Serialize)]
pub(crate) struct RoleUpdate<'a> {
    pub id: RoleId,
    #[serde(flatten)]
    pub draft: &'a NewRole,
}

/// Body for `PUT usuarios` (profile edit). The backend answers with a
/// fresh [`AuthResponse`] that replaces the current session.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellidos")]
    pub last_name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "rol")]
    pub role_id: RoleId,
    #[serde(rename = "contrasena")]
    pub password: String,
    pub dni: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body for `PUT usuarios/rol` (admin role change).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleChange {
    #[serde(rename = "idUsuario")]
    pub user_id: UserId,
    #[serde(rename = "idRol")]
    pub role_id: RoleId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user_json() -> &'static str {
        r#"{
            "id": 5,
            "nombre": "Rosa",
            "apellidos": "Quispe",
            "email": "rosa@example.com",
            "dni": "45678912",
            "telefono": "987654321",
            "imagen": "rosa.png",
            "rol": { "id": 2, "nombreRol": "CLIENTE" }
        }"#
    }

    #[test]
    fn test_user_deserializes_wire_names() {
        let user: User = serde_json::from_str(sample_user_json()).unwrap();
        assert_eq!(user.id.as_i32(), 5);
        assert_eq!(user.first_name, "Rosa");
        assert_eq!(user.full_name(), "Rosa Quispe");
        assert_eq!(user.role.as_role(), Some(Role::Customer));
    }

    #[test]
    fn test_unknown_role_name_parses_to_none() {
        let record = RoleRecord {
            id: RoleId::new(9),
            name: "ALMACENERO".to_string(),
        };
        assert_eq!(record.as_role(), None);
    }

    #[test]
    fn test_register_request_wire_names() {
        let request = RegisterRequest {
            first_name: "Rosa".to_string(),
            last_name: "Quispe".to_string(),
            email: "rosa@example.com".to_string(),
            dni: "45678912".to_string(),
            phone: "987654321".to_string(),
            password: "secreta".to_string(),
            role_id: CUSTOMER_ROLE_ID,
            image: "default.png".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["nombre"], "Rosa");
        assert_eq!(value["apellidos"], "Quispe");
        assert_eq!(value["contrasena"], "secreta");
        assert_eq!(value["rolId"], 2);
        assert_eq!(value["imagen"], "default.png");
    }

    #[test]
    fn test_role_change_wire_names() {
        let change = RoleChange {
            user_id: UserId::new(5),
            role_id: RoleId::new(1),
        };
        let value = serde_json::to_value(change).unwrap();
        assert_eq!(value["idUsuario"], 5);
        assert_eq!(value["idRol"], 1);
    }

    #[test]
    fn test_profile_update_uses_correo() {
        let update = ProfileUpdate {
            id: UserId::new(5),
            first_name: "Rosa".to_string(),
            last_name: "Quispe".to_string(),
            email: "rosa@example.com".to_string(),
            role_id: CUSTOMER_ROLE_ID,
            password: "nueva".to_string(),
            dni: "45678912".to_string(),
            phone: "987654321".to_string(),
            image: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["correo"], "rosa@example.com");
        assert_eq!(value["rol"], 2);
        assert!(value.get("imagen").is_none());
    }
}
