//! In-memory implementation of every store port.
//!
//! Mirrors the PostgreSQL store: soft-deleted rows are invisible, names are
//! unique among live rows, and the farm cascade runs under a single write
//! lock so it is all-or-nothing.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::api_call::{EndpointCallStats, NewApiCall};
use crate::models::farm::{Farm, FarmBind, FarmWithPonds};
use crate::models::pond::{NewPond, Pond, PondWithFarm};
use crate::store::{ApiCallStore, FarmStore, HealthProbe, PondStore, StoreError};
use crate::types::{DbId, Timestamp};

#[derive(Debug)]
struct Record<T> {
    entity: T,
    deleted_at: Option<Timestamp>,
}

impl<T> Record<T> {
    fn live(entity: T) -> Self {
        Self {
            entity,
            deleted_at: None,
        }
    }

    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Debug, Default)]
struct Tables {
    farms: Vec<Record<Farm>>,
    ponds: Vec<Record<Pond>>,
    api_calls: Vec<NewApiCall>,
}

impl Tables {
    fn live_farm(&self, id: DbId) -> Option<&Farm> {
        self.farms
            .iter()
            .find(|r| r.is_live() && r.entity.id == id)
            .map(|r| &r.entity)
    }

    fn live_ponds_of(&self, farm_id: DbId) -> Vec<Pond> {
        self.ponds
            .iter()
            .filter(|r| r.is_live() && r.entity.farm_id == farm_id)
            .map(|r| r.entity.clone())
            .collect()
    }

    fn farm_name_taken(&self, name: &str, except: Option<DbId>) -> bool {
        self.farms
            .iter()
            .any(|r| r.is_live() && r.entity.name == name && Some(r.entity.id) != except)
    }

    fn pond_name_taken(&self, name: &str, except: Option<DbId>) -> bool {
        self.ponds
            .iter()
            .any(|r| r.is_live() && r.entity.name == name && Some(r.entity.id) != except)
    }
}

/// Process-local store used by tests and local runs without PostgreSQL.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline, every call fails with [`StoreError::Backend`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of audit rows recorded so far.
    pub async fn api_call_count(&self) -> usize {
        self.tables.read().await.api_calls.len()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("store is offline".into()));
        }
        Ok(())
    }
}

fn unique_violation(constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

#[async_trait]
impl FarmStore for MemoryStore {
    async fn find_farm_by_id(&self, id: DbId) -> Result<Option<Farm>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.live_farm(id).cloned())
    }

    async fn find_farm_by_name(&self, name: &str) -> Result<Option<Farm>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .farms
            .iter()
            .find(|r| r.is_live() && r.entity.name == name)
            .map(|r| r.entity.clone()))
    }

    async fn create_farm(&self, input: &FarmBind) -> Result<Farm, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if tables.farm_name_taken(&input.name, None) {
            return Err(unique_violation("uq_farms_name"));
        }
        let now = Utc::now();
        let farm = Farm {
            id: DbId::new_v4(),
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.farms.push(Record::live(farm.clone()));
        Ok(farm)
    }

    async fn update_farm(&self, id: DbId, input: &FarmBind) -> Result<Option<Farm>, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if tables.farm_name_taken(&input.name, Some(id)) {
            return Err(unique_violation("uq_farms_name"));
        }
        let Some(record) = tables
            .farms
            .iter_mut()
            .find(|r| r.is_live() && r.entity.id == id)
        else {
            return Ok(None);
        };
        record.entity.name = input.name.clone();
        record.entity.updated_at = Utc::now();
        Ok(Some(record.entity.clone()))
    }

    async fn list_farms(&self) -> Result<Vec<Farm>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .farms
            .iter()
            .filter(|r| r.is_live())
            .map(|r| r.entity.clone())
            .collect())
    }

    async fn find_farm_with_ponds(&self, id: DbId) -> Result<Option<FarmWithPonds>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables.live_farm(id).cloned().map(|farm| FarmWithPonds {
            ponds: tables.live_ponds_of(farm.id),
            farm,
        }))
    }

    async fn delete_farm_cascading(&self, id: DbId) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if tables.live_farm(id).is_none() {
            return Ok(false);
        }
        let now = Utc::now();
        for pond in tables
            .ponds
            .iter_mut()
            .filter(|r| r.is_live() && r.entity.farm_id == id)
        {
            pond.deleted_at = Some(now);
        }
        for farm in tables
            .farms
            .iter_mut()
            .filter(|r| r.is_live() && r.entity.id == id)
        {
            farm.deleted_at = Some(now);
        }
        Ok(true)
    }
}

#[async_trait]
impl PondStore for MemoryStore {
    async fn find_pond_by_id(&self, id: DbId) -> Result<Option<Pond>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .ponds
            .iter()
            .find(|r| r.is_live() && r.entity.id == id)
            .map(|r| r.entity.clone()))
    }

    async fn find_pond_by_name(&self, name: &str) -> Result<Option<Pond>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .ponds
            .iter()
            .find(|r| r.is_live() && r.entity.name == name)
            .map(|r| r.entity.clone()))
    }

    async fn create_pond(&self, input: &NewPond) -> Result<Pond, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if tables.pond_name_taken(&input.name, None) {
            return Err(unique_violation("uq_ponds_name"));
        }
        let now = Utc::now();
        let pond = Pond {
            id: DbId::new_v4(),
            farm_id: input.farm_id,
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.ponds.push(Record::live(pond.clone()));
        Ok(pond)
    }

    async fn update_pond(&self, id: DbId, input: &NewPond) -> Result<Option<Pond>, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if tables.pond_name_taken(&input.name, Some(id)) {
            return Err(unique_violation("uq_ponds_name"));
        }
        let Some(record) = tables
            .ponds
            .iter_mut()
            .find(|r| r.is_live() && r.entity.id == id)
        else {
            return Ok(None);
        };
        record.entity.name = input.name.clone();
        record.entity.farm_id = input.farm_id;
        record.entity.updated_at = Utc::now();
        Ok(Some(record.entity.clone()))
    }

    async fn list_ponds(&self) -> Result<Vec<Pond>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .ponds
            .iter()
            .filter(|r| r.is_live())
            .map(|r| r.entity.clone())
            .collect())
    }

    async fn find_pond_with_farm(&self, id: DbId) -> Result<Option<PondWithFarm>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let pond = tables
            .ponds
            .iter()
            .find(|r| r.is_live() && r.entity.id == id)
            .map(|r| r.entity.clone());
        Ok(pond.map(|pond| PondWithFarm {
            farm: tables.live_farm(pond.farm_id).cloned(),
            pond,
        }))
    }

    async fn delete_pond(&self, id: DbId) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let Some(record) = tables
            .ponds
            .iter_mut()
            .find(|r| r.is_live() && r.entity.id == id)
        else {
            return Ok(false);
        };
        record.deleted_at = Some(Utc::now());
        Ok(true)
    }
}

#[async_trait]
impl ApiCallStore for MemoryStore {
    async fn record_api_call(&self, input: &NewApiCall) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.tables.write().await.api_calls.push(input.clone());
        Ok(())
    }

    async fn aggregate_api_calls(&self) -> Result<Vec<EndpointCallStats>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;

        let mut groups: BTreeMap<(&str, &str), (i64, HashSet<&str>)> = BTreeMap::new();
        for call in &tables.api_calls {
            let (count, callers) = groups
                .entry((call.endpoint.as_str(), call.method.as_str()))
                .or_default();
            *count += 1;
            callers.insert(call.caller_address.as_str());
        }

        Ok(groups
            .into_iter()
            .map(|((endpoint, method), (count, callers))| EndpointCallStats {
                endpoint: endpoint.to_string(),
                method: method.to_string(),
                count,
                unique_callers: callers.len() as i64,
            })
            .collect())
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_online()
    }
}
