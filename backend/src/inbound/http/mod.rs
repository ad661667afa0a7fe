//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod events;
pub mod session;
pub mod state;
pub mod tiers;

pub use error::ApiResult;
