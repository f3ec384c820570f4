//! Buildings and offices referenced by requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::{BuildingId, OfficeId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub address: String,
    pub floors_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Office {
    pub id: OfficeId,
    pub name: String,
    pub building_id: BuildingId,
    pub floor_number: i32,
    /// The single office admin responsible for this office, if assigned.
    pub office_admin_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Building {
    pub fn new(name: String, address: String, floors_count: i32) -> Self {
        Self {
            id: BuildingId::new(),
            name,
            address,
            floors_count,
            created_at: Utc::now(),
        }
    }
}

impl Office {
    pub fn new(
        name: String,
        building_id: BuildingId,
        floor_number: i32,
        office_admin_id: Option<UserId>,
    ) -> Self {
        Self {
            id: OfficeId::new(),
            name,
            building_id,
            floor_number,
            office_admin_id,
            created_at: Utc::now(),
        }
    }

    /// Returns `true` when `user_id` administers this office.
    pub fn is_administered_by(&self, user_id: UserId) -> bool {
        self.office_admin_id == Some(user_id)
    }
}
