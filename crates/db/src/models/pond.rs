use aquafarm_core::models::pond::Pond;
use aquafarm_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A live row from the `ponds` table.
#[derive(Debug, Clone, FromRow)]
pub struct PondRow {
    pub id: DbId,
    pub farm_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PondRow> for Pond {
    fn from(row: PondRow) -> Self {
        Self {
            id: row.id,
            farm_id: row.farm_id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
