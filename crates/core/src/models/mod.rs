//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct
//! - A `Deserialize` + `Validate` bind DTO for request bodies
//! - Any read-side aggregates built from several rows

pub mod api_call;
pub mod farm;
pub mod pond;

