//! HTTP inbound adapter exposing the SOS endpoints and health probes.

pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod sos;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
