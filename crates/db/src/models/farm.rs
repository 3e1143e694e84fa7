use aquafarm_core::models::farm::Farm;
use aquafarm_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A live row from the `farms` table.
#[derive(Debug, Clone, FromRow)]
pub struct FarmRow {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<FarmRow> for Farm {
    fn from(row: FarmRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
