//! Request repository trait for dependency injection and testing.
//!
//! The pending-request invariant lives in the schema
//! (`uq_requests_one_pending_per_requester`); [`RequestRepositoryTrait::insert_pending`]
//! relies on it instead of checking first and writing second.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::AppError;
use crate::models::request::{Request, RequestStatus};
use crate::repositories::common::push_clause;
use crate::types::{OfficeId, RequestId, UserId};

const TABLE_NAME: &str = "requests";
const SELECT_COLUMNS: &str = "id, requester_id, target_office_id, remote_percentage, reason, \
     status, reject_reason, created_at, updated_at";

/// Filters for querying request lists. Every populated field narrows the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestListFilters {
    pub status: Option<RequestStatus>,
    pub requester_id: Option<UserId>,
    pub target_office_id: Option<OfficeId>,
    /// Only requests with `remote_percentage > 0`.
    pub remote_only: bool,
}

/// Repository trait for Request operations.
///
/// Use `MockRequestRepositoryTrait` in tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepositoryTrait: Send + Sync {
    /// Find a request by ID
    async fn find_by_id(&self, db: &PgPool, id: RequestId) -> Result<Option<Request>, AppError>;

    /// List requests matching `filters`, most recent first
    async fn list(
        &self,
        db: &PgPool,
        filters: &RequestListFilters,
    ) -> Result<Vec<Request>, AppError>;

    /// Insert a pending request.
    ///
    /// Returns `None` without writing when the requester already has a
    /// pending request.
    async fn insert_pending(&self, db: &PgPool, item: &Request)
        -> Result<Option<Request>, AppError>;

    /// Move a pending request to `status`.
    ///
    /// Returns `None` when the request is no longer pending.
    async fn decide(
        &self,
        db: &PgPool,
        id: RequestId,
        status: RequestStatus,
        reject_reason: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<Request>, AppError>;
}

/// Concrete implementation of RequestRepositoryTrait
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestRepository;

impl RequestRepository {
    pub fn new() -> Self {
        Self
    }
}

/// Builds the SELECT for `filters`; split out so the SQL can be unit tested.
pub fn build_list_query(filters: &RequestListFilters) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME));
    let mut has_clause = false;

    if let Some(status) = filters.status {
        push_clause(&mut builder, &mut has_clause);
        builder.push("status = ").push_bind(status.db_value());
    }
    if let Some(requester_id) = filters.requester_id {
        push_clause(&mut builder, &mut has_clause);
        builder.push("requester_id = ").push_bind(requester_id);
    }
    if let Some(office_id) = filters.target_office_id {
        push_clause(&mut builder, &mut has_clause);
        builder.push("target_office_id = ").push_bind(office_id);
    }
    if filters.remote_only {
        push_clause(&mut builder, &mut has_clause);
        builder.push("remote_percentage > 0");
    }

    builder.push(" ORDER BY created_at DESC, id DESC");
    builder
}

#[async_trait]
impl RequestRepositoryTrait for RequestRepository {
    async fn find_by_id(&self, db: &PgPool, id: RequestId) -> Result<Option<Request>, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", SELECT_COLUMNS, TABLE_NAME);
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn list(
        &self,
        db: &PgPool,
        filters: &RequestListFilters,
    ) -> Result<Vec<Request>, AppError> {
        let mut builder = build_list_query(filters);
        let rows = builder.build_query_as::<Request>().fetch_all(db).await?;
        Ok(rows)
    }

    async fn insert_pending(
        &self,
        db: &PgPool,
        item: &Request,
    ) -> Result<Option<Request>, AppError> {
        let query = format!(
            "INSERT INTO {} (id, requester_id, target_office_id, remote_percentage, reason, \
             status, reject_reason, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (requester_id) WHERE status = 'pending' DO NOTHING \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(item.id)
            .bind(item.requester_id)
            .bind(item.target_office_id)
            .bind(item.remote_percentage)
            .bind(&item.reason)
            .bind(RequestStatus::Pending.db_value())
            .bind(&item.reject_reason)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn decide(
        &self,
        db: &PgPool,
        id: RequestId,
        status: RequestStatus,
        reject_reason: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<Request>, AppError> {
        let query = format!(
            "UPDATE {} SET status = $1, reject_reason = $2, updated_at = $3 \
             WHERE id = $4 AND status = 'pending' RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(status.db_value())
            .bind(reject_reason)
            .bind(timestamp)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }
}
