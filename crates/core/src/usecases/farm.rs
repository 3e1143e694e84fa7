//! Farm business rules: unique names and cascading delete.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::CoreError;
use crate::models::farm::{Farm, FarmBind, FarmWithPonds};
use crate::store::{FarmStore, StoreError};
use crate::types::parse_id;

const CREATE_FAILED: &str = "failed to create farm";
const UPDATE_FAILED: &str = "failed to update farm";
const LIST_FAILED: &str = "failed to get all farm";
const GET_FAILED: &str = "failed to get farm by id";
const DELETE_FAILED: &str = "failed to delete farm";

const NAME_TAKEN: &str = "farm name is already used";
const FARM_NOT_FOUND: &str = "farm not found";

/// Map a write failure, treating a unique-index collision as a name conflict.
fn write_error(message: &'static str, err: StoreError) -> CoreError {
    match err {
        StoreError::UniqueViolation { .. } => CoreError::conflict(message, NAME_TAKEN),
        other => CoreError::internal(message, other),
    }
}

pub struct FarmUsecase {
    farms: Arc<dyn FarmStore>,
}

impl FarmUsecase {
    pub fn new(farms: Arc<dyn FarmStore>) -> Self {
        Self { farms }
    }

    /// Create a farm with a name no live farm uses.
    ///
    /// # Errors
    ///
    /// * `Conflict` - the name is taken (by the pre-check or the unique index)
    /// * `Internal` - the store failed
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &FarmBind) -> Result<Farm, CoreError> {
        let existing = self
            .farms
            .find_farm_by_name(&input.name)
            .await
            .map_err(|e| CoreError::internal(CREATE_FAILED, e))?;
        if existing.is_some() {
            return Err(CoreError::conflict(CREATE_FAILED, NAME_TAKEN));
        }

        let farm = self
            .farms
            .create_farm(input)
            .await
            .map_err(|e| write_error(CREATE_FAILED, e))?;

        info!(farm_id = %farm.id, name = %farm.name, "Farm created");
        Ok(farm)
    }

    /// Rename a live farm.
    ///
    /// The name check ignores the farm being updated, so re-submitting the
    /// current name succeeds.
    ///
    /// # Errors
    ///
    /// * `Conflict` - another live farm has the name
    /// * `NotFound` - no live farm has `id`
    /// * `Internal` - the store failed
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update(&self, id: &str, input: &FarmBind) -> Result<Farm, CoreError> {
        let id = parse_id(id);
        let holder = self
            .farms
            .find_farm_by_name(&input.name)
            .await
            .map_err(|e| CoreError::internal(UPDATE_FAILED, e))?;
        if holder.is_some_and(|farm| Some(farm.id) != id) {
            return Err(CoreError::conflict(UPDATE_FAILED, NAME_TAKEN));
        }

        let id = id.ok_or_else(|| CoreError::not_found(UPDATE_FAILED, FARM_NOT_FOUND))?;
        self.farms
            .find_farm_by_id(id)
            .await
            .map_err(|e| CoreError::internal(UPDATE_FAILED, e))?
            .ok_or_else(|| CoreError::not_found(UPDATE_FAILED, FARM_NOT_FOUND))?;

        let farm = self
            .farms
            .update_farm(id, input)
            .await
            .map_err(|e| write_error(UPDATE_FAILED, e))?
            // Deleted between the lookup and the write.
            .ok_or_else(|| CoreError::not_found(UPDATE_FAILED, FARM_NOT_FOUND))?;

        info!(farm_id = %farm.id, name = %farm.name, "Farm updated");
        Ok(farm)
    }

    /// All live farms. An empty store is reported as `NotFound`.
    pub async fn list(&self) -> Result<Vec<Farm>, CoreError> {
        let farms = self
            .farms
            .list_farms()
            .await
            .map_err(|e| CoreError::internal(LIST_FAILED, e))?;
        if farms.is_empty() {
            return Err(CoreError::not_found(LIST_FAILED, FARM_NOT_FOUND));
        }
        Ok(farms)
    }

    /// A live farm and its live ponds. Ids that name no row are `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<FarmWithPonds, CoreError> {
        let id = parse_id(id).ok_or_else(|| CoreError::not_found(GET_FAILED, FARM_NOT_FOUND))?;
        self.farms
            .find_farm_with_ponds(id)
            .await
            .map_err(|e| CoreError::internal(GET_FAILED, e))?
            .ok_or_else(|| CoreError::not_found(GET_FAILED, FARM_NOT_FOUND))
    }

    /// Delete a farm and all of its ponds in one transaction.
    ///
    /// # Errors
    ///
    /// * `NotFound` - no live farm has `id`
    /// * `Internal` - the cascade failed; nothing was removed
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let id = parse_id(id).ok_or_else(|| CoreError::not_found(DELETE_FAILED, FARM_NOT_FOUND))?;
        self.farms
            .find_farm_by_id(id)
            .await
            .map_err(|e| CoreError::internal(DELETE_FAILED, e))?
            .ok_or_else(|| CoreError::not_found(DELETE_FAILED, FARM_NOT_FOUND))?;

        let deleted = self
            .farms
            .delete_farm_cascading(id)
            .await
            .map_err(|e| CoreError::internal(DELETE_FAILED, e))?;
        if !deleted {
            return Err(CoreError::not_found(DELETE_FAILED, FARM_NOT_FOUND));
        }

        info!(farm_id = %id, "Farm deleted with its ponds");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::models::pond::NewPond;
    use crate::types::DbId;
    use crate::store::memory::MemoryStore;
    use crate::store::PondStore;

    fn bind(name: &str) -> FarmBind {
        FarmBind {
            name: name.to_string(),
        }
    }

    fn setup() -> (Arc<MemoryStore>, FarmUsecase) {
        let store = Arc::new(MemoryStore::new());
        let usecase = FarmUsecase::new(store.clone());
        (store, usecase)
    }

    /// Sees no farms on lookup but loses every write to a concurrent writer.
    struct RacingStore;

    #[async_trait]
    impl FarmStore for RacingStore {
        async fn find_farm_by_id(&self, _id: DbId) -> Result<Option<Farm>, StoreError> {
            Ok(None)
        }
        async fn find_farm_by_name(&self, _name: &str) -> Result<Option<Farm>, StoreError> {
            Ok(None)
        }
        async fn create_farm(&self, _input: &FarmBind) -> Result<Farm, StoreError> {
            Err(StoreError::UniqueViolation {
                constraint: "uq_farms_name".to_string(),
            })
        }
        async fn update_farm(
            &self,
            _id: DbId,
            _input: &FarmBind,
        ) -> Result<Option<Farm>, StoreError> {
            Ok(None)
        }
        async fn list_farms(&self) -> Result<Vec<Farm>, StoreError> {
            Ok(Vec::new())
        }
        async fn find_farm_with_ponds(
            &self,
            _id: DbId,
        ) -> Result<Option<FarmWithPonds>, StoreError> {
            Ok(None)
        }
        async fn delete_farm_cascading(&self, _id: DbId) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    /// Delegates to a `MemoryStore` but fails every cascade delete.
    struct FailingCascadeStore {
        inner: Arc<MemoryStore>,
    }

    #[async_trait]
    impl FarmStore for FailingCascadeStore {
        async fn find_farm_by_id(&self, id: DbId) -> Result<Option<Farm>, StoreError> {
            self.inner.find_farm_by_id(id).await
        }
        async fn find_farm_by_name(&self, name: &str) -> Result<Option<Farm>, StoreError> {
            self.inner.find_farm_by_name(name).await
        }
        async fn create_farm(&self, input: &FarmBind) -> Result<Farm, StoreError> {
            self.inner.create_farm(input).await
        }
        async fn update_farm(
            &self,
            id: DbId,
            input: &FarmBind,
        ) -> Result<Option<Farm>, StoreError> {
            self.inner.update_farm(id, input).await
        }
        async fn list_farms(&self) -> Result<Vec<Farm>, StoreError> {
            self.inner.list_farms().await
        }
        async fn find_farm_with_ponds(
            &self,
            id: DbId,
        ) -> Result<Option<FarmWithPonds>, StoreError> {
            self.inner.find_farm_with_ponds(id).await
        }
        async fn delete_farm_cascading(&self, _id: DbId) -> Result<bool, StoreError> {
            Err(StoreError::Backend("cascade aborted".into()))
        }
    }

    // -- create ----------------------------------------------------------

    #[tokio::test]
    async fn create_returns_persisted_farm() {
        let (_, usecase) = setup();
        let farm = usecase.create(&bind("Lake One")).await.unwrap();
        assert_eq!(farm.name, "Lake One");
        assert!(!farm.id.is_nil());
    }

    #[tokio::test]
    async fn create_duplicate_name_is_conflict_without_write() {
        let (store, usecase) = setup();
        usecase.create(&bind("Lake One")).await.unwrap();

        let err = usecase.create(&bind("Lake One")).await.unwrap_err();
        assert_matches!(err, CoreError::Conflict { message: "failed to create farm", .. });
        assert_eq!(err.cause().to_string(), "farm name is already used");
        assert_eq!(store.list_farms().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_losing_a_race_is_conflict() {
        let usecase = FarmUsecase::new(Arc::new(RacingStore));
        let err = usecase.create(&bind("Lake One")).await.unwrap_err();
        assert_matches!(err, CoreError::Conflict { message: "failed to create farm", .. });
    }

    #[tokio::test]
    async fn create_store_failure_is_internal() {
        let (store, usecase) = setup();
        store.set_offline(true);
        let err = usecase.create(&bind("Lake One")).await.unwrap_err();
        assert_matches!(err, CoreError::Internal { message: "failed to create farm", .. });
    }

    // -- update ----------------------------------------------------------

    #[tokio::test]
    async fn update_renames_farm() {
        let (_, usecase) = setup();
        let farm = usecase.create(&bind("Old Name")).await.unwrap();

        let updated = usecase.update(&farm.id.to_string(), &bind("New Name")).await.unwrap();
        assert_eq!(updated.id, farm.id);
        assert_eq!(updated.name, "New Name");
    }

    #[tokio::test]
    async fn update_to_own_name_succeeds() {
        let (_, usecase) = setup();
        let farm = usecase.create(&bind("Same Name")).await.unwrap();
        let updated = usecase.update(&farm.id.to_string(), &bind("Same Name")).await.unwrap();
        assert_eq!(updated.name, "Same Name");
    }

    #[tokio::test]
    async fn update_to_anothers_name_is_conflict() {
        let (_, usecase) = setup();
        let farm = usecase.create(&bind("First Farm")).await.unwrap();
        usecase.create(&bind("Second Farm")).await.unwrap();

        let err = usecase.update(&farm.id.to_string(), &bind("Second Farm")).await.unwrap_err();
        assert_matches!(err, CoreError::Conflict { message: "failed to update farm", .. });
    }

    #[tokio::test]
    async fn update_missing_farm_is_not_found() {
        let (store, usecase) = setup();
        let err = usecase
            .update(&DbId::new_v4().to_string(), &bind("Ghost Farm"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::NotFound { message: "failed to update farm", .. });
        assert!(store.list_farms().await.unwrap().is_empty());
    }

    // -- list / get_by_id -----------------------------------------------

    #[tokio::test]
    async fn list_on_empty_store_is_not_found() {
        let (_, usecase) = setup();
        let err = usecase.list().await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { message: "failed to get all farm", .. });
        assert_eq!(err.cause().to_string(), "farm not found");
    }

    #[tokio::test]
    async fn list_is_repeatable() {
        let (_, usecase) = setup();
        usecase.create(&bind("Farm Alpha")).await.unwrap();
        usecase.create(&bind("Farm Beta")).await.unwrap();

        let first = usecase.list().await.unwrap();
        let second = usecase.list().await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn list_store_failure_is_internal() {
        let (store, usecase) = setup();
        store.set_offline(true);
        assert_matches!(
            usecase.list().await,
            Err(CoreError::Internal { message: "failed to get all farm", .. })
        );
    }

    #[tokio::test]
    async fn get_by_id_includes_ponds() {
        let (store, usecase) = setup();
        let farm = usecase.create(&bind("Pond Farm")).await.unwrap();
        store
            .create_pond(&NewPond {
                name: "Pond A".to_string(),
                farm_id: farm.id,
            })
            .await
            .unwrap();

        let found = usecase.get_by_id(&farm.id.to_string()).await.unwrap();
        assert_eq!(found.farm, farm);
        assert_eq!(found.ponds.len(), 1);
        assert_eq!(found.ponds[0].name, "Pond A");
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() {
        let (_, usecase) = setup();
        assert_matches!(
            usecase.get_by_id(&DbId::new_v4().to_string()).await,
            Err(CoreError::NotFound { message: "failed to get farm by id", .. })
        );
    }

    // -- delete ----------------------------------------------------------

    #[tokio::test]
    async fn delete_cascades_to_ponds() {
        let (store, usecase) = setup();
        let farm = usecase.create(&bind("Cascade Farm")).await.unwrap();
        for name in ["Pond One", "Pond Two", "Pond Three"] {
            store
                .create_pond(&NewPond {
                    name: name.to_string(),
                    farm_id: farm.id,
                })
                .await
                .unwrap();
        }

        usecase.delete(&farm.id.to_string()).await.unwrap();

        assert!(store.list_ponds().await.unwrap().is_empty());
        assert_matches!(
            usecase.get_by_id(&farm.id.to_string()).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn delete_missing_farm_is_not_found() {
        let (_, usecase) = setup();
        assert_matches!(
            usecase.delete(&DbId::new_v4().to_string()).await,
            Err(CoreError::NotFound { message: "failed to delete farm", .. })
        );
    }

    #[tokio::test]
    async fn failed_cascade_is_internal_and_keeps_every_row() {
        let store = Arc::new(MemoryStore::new());
        let usecase = FarmUsecase::new(Arc::new(FailingCascadeStore {
            inner: store.clone(),
        }));
        let farm = usecase.create(&bind("Sturdy Farm")).await.unwrap();
        for name in ["Pond One", "Pond Two"] {
            store
                .create_pond(&NewPond {
                    name: name.to_string(),
                    farm_id: farm.id,
                })
                .await
                .unwrap();
        }

        let err = usecase.delete(&farm.id.to_string()).await.unwrap_err();
        assert_matches!(err, CoreError::Internal { message: "failed to delete farm", .. });
        assert_eq!(err.cause().to_string(), "cascade aborted");

        assert_eq!(store.list_ponds().await.unwrap().len(), 2);
        assert_eq!(usecase.list().await.unwrap(), vec![farm]);
    }

    #[tokio::test]
    async fn non_uuid_ids_are_not_found() {
        let (_, usecase) = setup();
        usecase.create(&bind("Real Farm")).await.unwrap();

        assert_matches!(
            usecase.get_by_id("missing").await,
            Err(CoreError::NotFound { message: "failed to get farm by id", .. })
        );
        assert_matches!(
            usecase.update("missing", &bind("Other Name")).await,
            Err(CoreError::NotFound { message: "failed to update farm", .. })
        );
        assert_matches!(
            usecase.delete("missing").await,
            Err(CoreError::NotFound { message: "failed to delete farm", .. })
        );
    }

    #[tokio::test]
    async fn delete_store_failure_removes_nothing() {
        let (store, usecase) = setup();
        let farm = usecase.create(&bind("Sturdy Farm")).await.unwrap();

        store.set_offline(true);
        assert_matches!(
            usecase.delete(&farm.id.to_string()).await,
            Err(CoreError::Internal { message: "failed to delete farm", .. })
        );
        store.set_offline(false);

        assert_eq!(usecase.list().await.unwrap(), vec![farm]);
    }
}
