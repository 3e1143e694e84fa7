//! Pond entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::farm::Farm;
use crate::types::{DbId, Timestamp};

/// A live pond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pond {
    pub id: DbId,
    pub farm_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating or updating a pond.
///
/// `farm_id` is kept as the client sent it; the usecase resolves it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PondBind {
    #[validate(length(
        min = 4,
        max = 100,
        message = "name must be between 4 and 100 characters"
    ))]
    pub name: String,
    pub farm_id: String,
}

/// DTO for inserting or overwriting a pond once its farm has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPond {
    pub name: String,
    pub farm_id: DbId,
}

/// A pond together with its parent farm.
///
/// `farm` is `None` only if the parent row disappeared outside the usecases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PondWithFarm {
    #[serde(flatten)]
    pub pond: Pond,
    pub farm: Option<Farm>,
}
