//! Business rules sitting between the HTTP handlers and the stores.
//!
//! Usecases are stateless apart from their injected store handles and are
//! shared across request tasks behind an `Arc`.

pub mod api_call;
pub mod farm;
pub mod pond;

pub use api_call::ApiCallUsecase;
pub use farm::FarmUsecase;
pub use pond::PondUsecase;
