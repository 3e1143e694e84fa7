//! Row structs read with `sqlx::query_as`.
//!
//! Each row converts into its `aquafarm_core` model; the soft-delete column is
//! never selected.

pub mod api_call;
pub mod farm;
pub mod pond;
