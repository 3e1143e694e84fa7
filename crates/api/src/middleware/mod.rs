//! Request middleware.
//!
//! - [`api_call::record_api_call`] -- Appends an audit row for every request.

pub mod api_call;
