//! The authenticated caller as seen by request handling code.
//!
//! An [`Actor`] is resolved once by the auth middleware and injected into
//! handlers; nothing below the middleware looks at tokens or headers.

use crate::{
    models::user::{User, UserRole},
    types::{OfficeId, UserId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRole {
    Admin,
    /// `office_id` is `None` until an office has been assigned to the admin.
    OfficeAdmin { office_id: Option<OfficeId> },
    Employee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: ActorRole,
}

impl Actor {
    pub fn admin(user_id: UserId) -> Self {
        Self {
            user_id,
            role: ActorRole::Admin,
        }
    }

    pub fn office_admin(user_id: UserId, office_id: Option<OfficeId>) -> Self {
        Self {
            user_id,
            role: ActorRole::OfficeAdmin { office_id },
        }
    }

    pub fn employee(user_id: UserId) -> Self {
        Self {
            user_id,
            role: ActorRole::Employee,
        }
    }

    /// Builds the actor for `user`, attaching the administered office when the
    /// user is an office admin.
    pub fn from_user(user: &User, administered_office: Option<OfficeId>) -> Self {
        match user.role {
            UserRole::Admin => Self::admin(user.id),
            UserRole::OfficeAdmin => Self::office_admin(user.id, administered_office),
            UserRole::Employee => Self::employee(user.id),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, ActorRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_user_keeps_office_only_for_office_admins() {
        let office = OfficeId::new();
        let mut user = User::new(
            "oa@example.com".into(),
            "Olga".into(),
            "Admin".into(),
            UserRole::OfficeAdmin,
        );
        let actor = Actor::from_user(&user, Some(office));
        assert_eq!(
            actor.role,
            ActorRole::OfficeAdmin {
                office_id: Some(office)
            }
        );

        user.role = UserRole::Employee;
        let actor = Actor::from_user(&user, Some(office));
        assert_eq!(actor.role, ActorRole::Employee);
        assert_eq!(actor.user_id, user.id);
    }
}
