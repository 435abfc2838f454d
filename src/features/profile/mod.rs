//! Admin profile management.
//!
//! Lets the authenticated admin read and edit their own account record,
//! swap their avatar, and change their password.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ProfileService;
