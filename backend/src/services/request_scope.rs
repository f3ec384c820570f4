//! Role-derived visibility and decision rules for requests.
//!
//! Every rule is a pure function of the [`Actor`] and the request, so the
//! three role branches can be tested without a database.

use crate::{
    error::AppError,
    models::{
        actor::{Actor, ActorRole},
        request::{Request, RequestKind, RequestStatus},
    },
    repositories::RequestListFilters,
    types::{OfficeId, UserId},
};

/// The slice of the request table an actor is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    /// Pending remote-work requests (`remote_percentage > 0`) from everyone.
    PendingRemote,
    /// Pending requests of any kind targeting one office.
    PendingForOffice(OfficeId),
    /// Every request filed by one user, whatever its status.
    OwnedBy(UserId),
}

impl RequestScope {
    pub fn for_actor(actor: &Actor) -> Result<Self, AppError> {
        match actor.role {
            ActorRole::Admin => Ok(RequestScope::PendingRemote),
            ActorRole::OfficeAdmin {
                office_id: Some(office_id),
            } => Ok(RequestScope::PendingForOffice(office_id)),
            ActorRole::OfficeAdmin { office_id: None } => Err(no_office_assigned()),
            ActorRole::Employee => Ok(RequestScope::OwnedBy(actor.user_id)),
        }
    }

    pub fn filters(&self) -> RequestListFilters {
        match *self {
            RequestScope::PendingRemote => RequestListFilters {
                status: Some(RequestStatus::Pending),
                remote_only: true,
                ..Default::default()
            },
            RequestScope::PendingForOffice(office_id) => RequestListFilters {
                status: Some(RequestStatus::Pending),
                target_office_id: Some(office_id),
                ..Default::default()
            },
            RequestScope::OwnedBy(user_id) => RequestListFilters {
                requester_id: Some(user_id),
                ..Default::default()
            },
        }
    }

    pub fn permits(&self, request: &Request) -> bool {
        match *self {
            RequestScope::PendingRemote => {
                request.is_pending() && request.kind() == RequestKind::Remote
            }
            RequestScope::PendingForOffice(office_id) => {
                request.is_pending() && request.target_office_id == office_id
            }
            RequestScope::OwnedBy(user_id) => request.requester_id == user_id,
        }
    }
}

/// Checks the role half of a decision before anything is loaded.
pub fn ensure_may_decide(actor: &Actor) -> Result<(), AppError> {
    match actor.role {
        ActorRole::Admin
        | ActorRole::OfficeAdmin {
            office_id: Some(_),
        } => Ok(()),
        ActorRole::OfficeAdmin { office_id: None } => Err(no_office_assigned()),
        ActorRole::Employee => Err(AppError::Forbidden(
            "Employees cannot approve or reject requests".into(),
        )),
    }
}

/// Admins decide remote-work requests; office admins decide desk requests
/// for their own office.
pub fn may_decide(actor: &Actor, request: &Request) -> bool {
    match actor.role {
        ActorRole::Admin => request.kind() == RequestKind::Remote,
        ActorRole::OfficeAdmin {
            office_id: Some(office_id),
        } => request.kind() == RequestKind::Desk && request.target_office_id == office_id,
        ActorRole::OfficeAdmin { office_id: None } | ActorRole::Employee => false,
    }
}

fn no_office_assigned() -> AppError {
    AppError::Forbidden("Office admin has no office assigned".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(requester: UserId, office: OfficeId, pct: f64, status: RequestStatus) -> Request {
        let mut request = Request::new(requester, office, pct, "reason".into());
        request.status = status;
        request
    }

    #[test]
    fn admin_scope_is_pending_remote_only() {
        let scope = RequestScope::for_actor(&Actor::admin(UserId::new())).unwrap();
        assert_eq!(scope, RequestScope::PendingRemote);

        let office = OfficeId::new();
        let remote = request(UserId::new(), office, 40.0, RequestStatus::Pending);
        let desk = request(UserId::new(), office, 0.0, RequestStatus::Pending);
        let approved = request(UserId::new(), office, 40.0, RequestStatus::Approved);
        assert!(scope.permits(&remote));
        assert!(!scope.permits(&desk));
        assert!(!scope.permits(&approved));

        let filters = scope.filters();
        assert_eq!(filters.status, Some(RequestStatus::Pending));
        assert!(filters.remote_only);
        assert!(filters.requester_id.is_none());
        assert!(filters.target_office_id.is_none());
    }

    #[test]
    fn office_admin_scope_is_pending_for_own_office() {
        let o1 = OfficeId::new();
        let o2 = OfficeId::new();
        let scope = RequestScope::for_actor(&Actor::office_admin(UserId::new(), Some(o1))).unwrap();
        assert_eq!(scope, RequestScope::PendingForOffice(o1));

        assert!(scope.permits(&request(UserId::new(), o1, 0.0, RequestStatus::Pending)));
        assert!(scope.permits(&request(UserId::new(), o1, 30.0, RequestStatus::Pending)));
        assert!(!scope.permits(&request(UserId::new(), o2, 0.0, RequestStatus::Pending)));
        assert!(!scope.permits(&request(UserId::new(), o1, 0.0, RequestStatus::Rejected)));

        let filters = scope.filters();
        assert_eq!(filters.target_office_id, Some(o1));
        assert_eq!(filters.status, Some(RequestStatus::Pending));
        assert!(!filters.remote_only);
    }

    #[test]
    fn office_admin_without_office_is_forbidden() {
        let err = RequestScope::for_actor(&Actor::office_admin(UserId::new(), None)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn employee_scope_is_full_personal_history() {
        let me = UserId::new();
        let scope = RequestScope::for_actor(&Actor::employee(me)).unwrap();
        let office = OfficeId::new();

        assert!(scope.permits(&request(me, office, 0.0, RequestStatus::Pending)));
        assert!(scope.permits(&request(me, office, 50.0, RequestStatus::Approved)));
        assert!(scope.permits(&request(me, office, 50.0, RequestStatus::Rejected)));
        assert!(!scope.permits(&request(UserId::new(), office, 50.0, RequestStatus::Pending)));

        let filters = scope.filters();
        assert_eq!(filters.requester_id, Some(me));
        assert!(filters.status.is_none());
    }

    #[test]
    fn decision_authority_follows_request_kind() {
        let office = OfficeId::new();
        let remote = request(UserId::new(), office, 25.0, RequestStatus::Pending);
        let desk = request(UserId::new(), office, 0.0, RequestStatus::Pending);

        let admin = Actor::admin(UserId::new());
        assert!(may_decide(&admin, &remote));
        assert!(!may_decide(&admin, &desk));

        let own_oa = Actor::office_admin(UserId::new(), Some(office));
        assert!(may_decide(&own_oa, &desk));
        assert!(!may_decide(&own_oa, &remote));

        let other_oa = Actor::office_admin(UserId::new(), Some(OfficeId::new()));
        assert!(!may_decide(&other_oa, &desk));

        let employee = Actor::employee(UserId::new());
        assert!(!may_decide(&employee, &desk));
        assert!(ensure_may_decide(&employee).is_err());
        assert!(ensure_may_decide(&admin).is_ok());
        assert!(ensure_may_decide(&Actor::office_admin(UserId::new(), None)).is_err());
    }
}
