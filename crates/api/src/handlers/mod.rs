//! HTTP handlers. Each binds its input, calls one usecase operation and wraps
//! the result in the response envelope.

pub mod api_call;
pub mod farm;
pub mod pond;
