//! Outbound HTTP.

pub mod api;
