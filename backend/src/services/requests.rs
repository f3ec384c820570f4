//! Request admission, visibility, and decisions.
//!
//! Callers hand in an already-resolved [`Actor`]; this module never inspects
//! credentials.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use crate::validation::Validate;

use crate::{
    error::AppError,
    models::{
        actor::Actor,
        request::{
            CreateRequestPayload, RejectRequestPayload, Request, RequestStatus,
            DEFAULT_REJECT_REASON,
        },
    },
    repositories::{
        OfficeRepository, OfficeRepositoryTrait, RequestRepository, RequestRepositoryTrait,
        UserRepository, UserRepositoryTrait,
    },
    services::request_scope::{ensure_may_decide, may_decide, RequestScope},
    types::{RequestId, UserId},
};

#[derive(Clone)]
pub struct RequestService {
    pool: PgPool,
    requests: Arc<dyn RequestRepositoryTrait>,
    offices: Arc<dyn OfficeRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
}

impl RequestService {
    pub fn new(pool: PgPool) -> Self {
        Self::with_repositories(
            pool,
            Arc::new(RequestRepository::new()),
            Arc::new(OfficeRepository::new()),
            Arc::new(UserRepository::new()),
        )
    }

    pub fn with_repositories(
        pool: PgPool,
        requests: Arc<dyn RequestRepositoryTrait>,
        offices: Arc<dyn OfficeRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self {
            pool,
            requests,
            offices,
            users,
        }
    }

    /// Lists the requests visible to `actor`, most recent first.
    pub async fn list(&self, actor: &Actor) -> Result<Vec<Request>, AppError> {
        let scope = RequestScope::for_actor(actor)?;
        let rows = self.requests.list(&self.pool, &scope.filters()).await?;
        Ok(rows.into_iter().filter(|r| scope.permits(r)).collect())
    }

    /// Fetches one request; requests outside the actor's scope read as missing.
    pub async fn get(&self, actor: &Actor, id: RequestId) -> Result<Request, AppError> {
        let scope = RequestScope::for_actor(actor)?;
        self.requests
            .find_by_id(&self.pool, id)
            .await?
            .filter(|r| scope.permits(r))
            .ok_or_else(|| AppError::NotFound("Request not found".into()))
    }

    /// Admits a new pending request.
    ///
    /// Field validation runs first, then requester/office resolution, then the
    /// single-pending-request check, which is enforced by the insert itself.
    pub async fn create(
        &self,
        actor: &Actor,
        payload: CreateRequestPayload,
    ) -> Result<Request, AppError> {
        payload.validate()?;

        let requester_id = self.resolve_requester(actor, payload.requester).await?;
        let office_id = payload
            .target_office
            .ok_or_else(|| AppError::Validation(vec!["target_office: required".into()]))?;
        if self.offices.find_by_id(&self.pool, office_id).await?.is_none() {
            return Err(AppError::NotFound("Office not found".into()));
        }

        let request = Request::new(
            requester_id,
            office_id,
            payload.remote_percentage,
            payload.reason.trim().to_string(),
        );

        match self.requests.insert_pending(&self.pool, &request).await? {
            Some(saved) => {
                tracing::info!(
                    request_id = %saved.id,
                    requester_id = %saved.requester_id,
                    office_id = %saved.target_office_id,
                    remote_percentage = saved.remote_percentage,
                    "request admitted"
                );
                Ok(saved)
            }
            None => {
                tracing::warn!(
                    requester_id = %requester_id,
                    actor_id = %actor.user_id,
                    "request refused: requester already has a pending request"
                );
                Err(AppError::PendingRequestExists)
            }
        }
    }

    pub async fn approve(&self, actor: &Actor, id: RequestId) -> Result<Request, AppError> {
        self.decide(actor, id, RequestStatus::Approved, DEFAULT_REJECT_REASON)
            .await
    }

    pub async fn reject(
        &self,
        actor: &Actor,
        id: RequestId,
        payload: RejectRequestPayload,
    ) -> Result<Request, AppError> {
        ensure_may_decide(actor)?;
        payload.validate()?;
        self.decide(actor, id, RequestStatus::Rejected, payload.reject_reason.trim())
            .await
    }

    async fn decide(
        &self,
        actor: &Actor,
        id: RequestId,
        status: RequestStatus,
        reject_reason: &str,
    ) -> Result<Request, AppError> {
        ensure_may_decide(actor)?;

        let request = self
            .requests
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".into()))?;
        if !may_decide(actor, &request) {
            return Err(AppError::Forbidden(
                "Not allowed to decide this request".into(),
            ));
        }
        if !request.is_pending() {
            return Err(AppError::Conflict("Request has already been decided".into()));
        }

        let decided = self
            .requests
            .decide(&self.pool, id, status, reject_reason, Utc::now())
            .await?
            .ok_or_else(|| AppError::Conflict("Request has already been decided".into()))?;

        tracing::info!(
            request_id = %decided.id,
            decided_by = %actor.user_id,
            status = decided.status.db_value(),
            "request decided"
        );
        Ok(decided)
    }

    async fn resolve_requester(
        &self,
        actor: &Actor,
        requested: Option<UserId>,
    ) -> Result<UserId, AppError> {
        match requested {
            None => Ok(actor.user_id),
            Some(user_id) if user_id == actor.user_id => Ok(user_id),
            Some(user_id) => {
                if !actor.is_admin() {
                    return Err(AppError::Forbidden(
                        "Only admins may file requests for other users".into(),
                    ));
                }
                match self.users.find_by_id(&self.pool, user_id).await? {
                    Some(user) if user.is_active() => Ok(user.id),
                    _ => Err(AppError::NotFound("Requester not found".into())),
                }
            }
        }
    }
}
