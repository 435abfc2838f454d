//! Modules layer - Infrastructure components
//!
//! Contains adapters the feature layer depends on, currently the content
//! store used for uploaded plan assets.

pub mod storage;
