//! Remote-work and desk-assignment requests awaiting approval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    models::UnknownVariant,
    types::{OfficeId, RequestId, UserId},
    validation::rules,
};

/// Stored in `reject_reason` until a request is actually rejected.
pub const DEFAULT_REJECT_REASON: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
/// Workflow status of a request.
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn db_value(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            _ => Err(UnknownVariant(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Who a request is routed to, derived from its remote percentage.
pub enum RequestKind {
    /// `remote_percentage > 0`; decided by an admin.
    Remote,
    /// `remote_percentage == 0`; decided by the target office's admin.
    Desk,
}

#[derive(Debug, Clone, FromRow)]
pub struct Request {
    pub id: RequestId,
    pub requester_id: UserId,
    pub target_office_id: OfficeId,
    pub remote_percentage: f64,
    pub reason: String,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub reject_reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Request {
    pub fn new(
        requester_id: UserId,
        target_office_id: OfficeId,
        remote_percentage: f64,
        reason: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RequestId::new(),
            requester_id,
            target_office_id,
            remote_percentage,
            reason,
            status: RequestStatus::Pending,
            reject_reason: DEFAULT_REJECT_REASON.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> RequestKind {
        if self.remote_percentage > 0.0 {
            RequestKind::Remote
        } else {
            RequestKind::Desk
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
/// Payload submitted to open a new request.
pub struct CreateRequestPayload {
    /// Defaults to the caller. Only admins may file on behalf of someone else.
    #[serde(default)]
    pub requester: Option<UserId>,
    #[validate(required)]
    pub target_office: Option<OfficeId>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub remote_percentage: f64,
    #[serde(default)]
    #[validate(custom(function = "rules::validate_reason"))]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
/// Payload carrying the explanation for a rejection.
pub struct RejectRequestPayload {
    #[serde(default)]
    #[validate(custom(function = "rules::validate_reject_reason"))]
    pub reject_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Public-facing representation of a request returned by the API.
pub struct RequestResponse {
    pub id: RequestId,
    pub requester: UserId,
    pub target_office: OfficeId,
    pub remote_percentage: f64,
    pub reason: String,
    pub status: RequestStatus,
    pub reject_reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Request> for RequestResponse {
    fn from(request: Request) -> Self {
        RequestResponse {
            id: request.id,
            requester: request.requester_id,
            target_office: request.target_office_id,
            remote_percentage: request.remote_percentage,
            reason: request.reason,
            status: request.status,
            reject_reason: request.reject_reason,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}
