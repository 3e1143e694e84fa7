//! Pond business rules: unique names and an existing parent farm.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::CoreError;
use crate::models::pond::{NewPond, Pond, PondBind, PondWithFarm};
use crate::store::{FarmStore, PondStore, StoreError};
use crate::types::{parse_id, DbId};

const CREATE_FAILED: &str = "failed to create pond";
const UPDATE_FAILED: &str = "failed to update pond";
const LIST_FAILED: &str = "failed to get all pond";
const GET_FAILED: &str = "failed to get pond by id";
const DELETE_FAILED: &str = "failed to delete pond";

const NAME_TAKEN: &str = "pond name is already used";
const POND_NOT_FOUND: &str = "pond not found";
const FARM_NOT_FOUND: &str = "farm is not found";

fn write_error(message: &'static str, err: StoreError) -> CoreError {
    match err {
        StoreError::UniqueViolation { .. } => CoreError::conflict(message, NAME_TAKEN),
        other => CoreError::internal(message, other),
    }
}

pub struct PondUsecase {
    ponds: Arc<dyn PondStore>,
    farms: Arc<dyn FarmStore>,
}

impl PondUsecase {
    pub fn new(ponds: Arc<dyn PondStore>, farms: Arc<dyn FarmStore>) -> Self {
        Self { ponds, farms }
    }

    /// Shared pre-checks for create and update. Resolves the bind into the
    /// fields the store writes.
    ///
    /// `current` is the pond being updated, excluded from the name check.
    async fn check_bind(
        &self,
        message: &'static str,
        input: &PondBind,
        current: Option<DbId>,
    ) -> Result<NewPond, CoreError> {
        let holder = self
            .ponds
            .find_pond_by_name(&input.name)
            .await
            .map_err(|e| CoreError::internal(message, e))?;
        if holder.is_some_and(|pond| Some(pond.id) != current) {
            return Err(CoreError::conflict(message, NAME_TAKEN));
        }

        let farm_id = parse_id(&input.farm_id)
            .ok_or_else(|| CoreError::bad_request(message, FARM_NOT_FOUND))?;
        let farm = self
            .farms
            .find_farm_by_id(farm_id)
            .await
            .map_err(|e| CoreError::internal(message, e))?;
        if farm.is_none() {
            return Err(CoreError::bad_request(message, FARM_NOT_FOUND));
        }

        Ok(NewPond {
            name: input.name.clone(),
            farm_id,
        })
    }

    /// Create a pond under an existing farm.
    ///
    /// # Errors
    ///
    /// * `Conflict` - the name is taken
    /// * `BadRequest` - `farm_id` does not resolve to a live farm
    /// * `Internal` - the store failed
    #[instrument(skip(self, input), fields(name = %input.name, farm_id = %input.farm_id))]
    pub async fn create(&self, input: &PondBind) -> Result<Pond, CoreError> {
        let new_pond = self.check_bind(CREATE_FAILED, input, None).await?;

        let pond = self
            .ponds
            .create_pond(&new_pond)
            .await
            .map_err(|e| write_error(CREATE_FAILED, e))?;

        info!(pond_id = %pond.id, farm_id = %pond.farm_id, "Pond created");
        Ok(pond)
    }

    /// Rename a pond and/or move it to another farm.
    ///
    /// # Errors
    ///
    /// * `Conflict` - another live pond has the name
    /// * `BadRequest` - `farm_id` does not resolve to a live farm
    /// * `NotFound` - no live pond has `id`
    /// * `Internal` - the store failed
    #[instrument(skip(self, input), fields(name = %input.name, farm_id = %input.farm_id))]
    pub async fn update(&self, id: &str, input: &PondBind) -> Result<Pond, CoreError> {
        let id = parse_id(id);
        let new_pond = self.check_bind(UPDATE_FAILED, input, id).await?;

        let id = id.ok_or_else(|| CoreError::not_found(UPDATE_FAILED, POND_NOT_FOUND))?;
        self.ponds
            .find_pond_by_id(id)
            .await
            .map_err(|e| CoreError::internal(UPDATE_FAILED, e))?
            .ok_or_else(|| CoreError::not_found(UPDATE_FAILED, POND_NOT_FOUND))?;

        let pond = self
            .ponds
            .update_pond(id, &new_pond)
            .await
            .map_err(|e| write_error(UPDATE_FAILED, e))?
            .ok_or_else(|| CoreError::not_found(UPDATE_FAILED, POND_NOT_FOUND))?;

        info!(pond_id = %pond.id, farm_id = %pond.farm_id, "Pond updated");
        Ok(pond)
    }

    pub async fn list(&self) -> Result<Vec<Pond>, CoreError> {
        let ponds = self
            .ponds
            .list_ponds()
            .await
            .map_err(|e| CoreError::internal(LIST_FAILED, e))?;
        if ponds.is_empty() {
            return Err(CoreError::not_found(LIST_FAILED, POND_NOT_FOUND));
        }
        Ok(ponds)
    }

    /// A live pond and its farm. Ids that name no row are `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<PondWithFarm, CoreError> {
        let id = parse_id(id).ok_or_else(|| CoreError::not_found(GET_FAILED, POND_NOT_FOUND))?;
        self.ponds
            .find_pond_with_farm(id)
            .await
            .map_err(|e| CoreError::internal(GET_FAILED, e))?
            .ok_or_else(|| CoreError::not_found(GET_FAILED, POND_NOT_FOUND))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let id = parse_id(id).ok_or_else(|| CoreError::not_found(DELETE_FAILED, POND_NOT_FOUND))?;
        self.ponds
            .find_pond_by_id(id)
            .await
            .map_err(|e| CoreError::internal(DELETE_FAILED, e))?
            .ok_or_else(|| CoreError::not_found(DELETE_FAILED, POND_NOT_FOUND))?;

        let deleted = self
            .ponds
            .delete_pond(id)
            .await
            .map_err(|e| CoreError::internal(DELETE_FAILED, e))?;
        if !deleted {
            return Err(CoreError::not_found(DELETE_FAILED, POND_NOT_FOUND));
        }

        info!(pond_id = %id, "Pond deleted");
        Ok(())
    }
}
