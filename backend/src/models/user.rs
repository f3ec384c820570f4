//! Models that represent users and role metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

use crate::{models::UnknownVariant, types::UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of an employee account.
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,
    /// Login e-mail, unique across accounts.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Role describing the user's privileges.
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    /// Currently granted share of remote work, 0-100.
    pub remote_percentage: f64,
    /// Deactivated accounts can no longer authenticate.
    pub is_deactivated: bool,
    /// Creation timestamp for auditing.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp for auditing.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
/// Supported user roles stored in the database.
pub enum UserRole {
    /// Central administrator; approves remote-work requests.
    Admin,
    /// Administrator of exactly one office; approves desk requests there.
    OfficeAdmin,
    /// Standard employee role.
    #[default]
    Employee,
}

impl UserRole {
    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::OfficeAdmin => "office_admin",
            UserRole::Employee => "employee",
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "admin" => Ok(UserRole::Admin),
            "office_admin" => Ok(UserRole::OfficeAdmin),
            "employee" => Ok(UserRole::Employee),
            _ => Err(UnknownVariant(value)),
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl User {
    /// Constructs a new user with freshly generated identifiers.
    pub fn new(email: String, first_name: String, last_name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            first_name,
            last_name,
            role,
            remote_percentage: 0.0,
            is_deactivated: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` when the user holds the `Admin` role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Returns `true` when the account may still authenticate.
    pub fn is_active(&self) -> bool {
        !self.is_deactivated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn user_role_serde_accepts_and_emits_snake_case() {
        let e: UserRole = serde_json::from_str("\"employee\"").unwrap();
        let oa: UserRole = serde_json::from_str("\"office_admin\"").unwrap();
        let a: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(e, UserRole::Employee);
        assert_eq!(oa, UserRole::OfficeAdmin);
        assert_eq!(a, UserRole::Admin);

        let so = serde_json::to_value(UserRole::OfficeAdmin).unwrap();
        assert_eq!(so, Value::String("office_admin".into()));
    }

    #[test]
    fn user_role_rejects_unknown_values() {
        assert!(serde_json::from_str::<UserRole>("\"superuser\"").is_err());
        assert!(serde_json::from_str::<UserRole>("\"Office Admin\"").is_err());
        assert!(UserRole::try_from("superuser".to_string()).is_err());
    }

    #[test]
    fn user_role_db_values_round_trip() {
        for role in [UserRole::Admin, UserRole::OfficeAdmin, UserRole::Employee] {
            assert_eq!(UserRole::try_from(role.as_str().to_string()).unwrap(), role);
        }
    }

    #[test]
    fn new_user_defaults_to_active_without_remote_share() {
        let user = User::new(
            "alice@example.com".into(),
            "Alice".into(),
            "Example".into(),
            UserRole::Employee,
        );
        assert!(user.is_active());
        assert!(!user.is_admin());
        assert_eq!(user.remote_percentage, 0.0);
    }
}
