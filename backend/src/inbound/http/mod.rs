//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod owners;
pub mod state;
pub mod validation;

pub use crate::domain::ApiResult;
pub use validation::{json_config, query_config};
