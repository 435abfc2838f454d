//! Back-office statistics.
//!
//! Every figure is computed from stored rows; nothing is simulated.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::StatsService;
