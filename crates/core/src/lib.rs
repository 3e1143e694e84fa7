//! Domain layer of the AquaFarm backend: models, store ports, the in-memory
//! store and the farm/pond/api-call usecases.

pub mod error;
pub mod models;
pub mod store;
pub mod types;
pub mod usecases;
