//! Admin authentication feature.
//!
//! Email/password login issuing a short-lived HS256 bearer token. The auth
//! middleware verifies the signature and expiry, then re-resolves the admin
//! account from the database so revoked or deleted accounts lose access
//! immediately instead of at token expiry.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/login` | No | Exchange credentials for a token |
//! | GET | `/api/auth/me` | Yes | Current admin identity |

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AuthService;
