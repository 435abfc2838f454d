pub mod auth;
pub mod plans;
pub mod profile;
pub mod stats;
