//! Office lookups needed for request admission and actor resolution.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::office::Office;
use crate::types::{OfficeId, UserId};

const SELECT_COLUMNS: &str = "id, name, building_id, floor_number, office_admin_id, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfficeRepositoryTrait: Send + Sync {
    /// Find an office by ID
    async fn find_by_id(&self, db: &PgPool, id: OfficeId) -> Result<Option<Office>, AppError>;

    /// Find the office administered by `user_id`, if any
    async fn find_administered_by(
        &self,
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Option<Office>, AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OfficeRepository;

impl OfficeRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OfficeRepositoryTrait for OfficeRepository {
    async fn find_by_id(&self, db: &PgPool, id: OfficeId) -> Result<Option<Office>, AppError> {
        let query = format!("SELECT {} FROM offices WHERE id = $1", SELECT_COLUMNS);
        let office = sqlx::query_as::<_, Office>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(office)
    }

    async fn find_administered_by(
        &self,
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Option<Office>, AppError> {
        let query = format!(
            "SELECT {} FROM offices WHERE office_admin_id = $1",
            SELECT_COLUMNS
        );
        let office = sqlx::query_as::<_, Office>(&query)
            .bind(user_id)
            .fetch_optional(db)
            .await?;
        Ok(office)
    }
}
