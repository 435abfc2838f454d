//! House-plan catalog feature.
//!
//! Covers the public catalog/detail endpoints, the download gate with its
//! bookkeeping, purchase-request intake for paid plans, and the
//! bearer-gated admin CRUD including the uploaded-file lifecycle.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/plans` | No | Paginated catalog with search/filter |
//! | GET | `/api/plans/{id}` | No | Single plan |
//! | POST | `/api/plans/{id}/download` | No | Download-gate resolution |
//! | POST | `/api/plans/purchase` | No | Purchase-request intake |
//! | POST | `/api/plans` | Yes | Create plan (multipart) |
//! | PUT | `/api/plans/{id}` | Yes | Full-field update (multipart) |
//! | DELETE | `/api/plans/{id}` | Yes | Delete plan, downloads cascade |
//! | GET | `/api/purchases` | Yes | Review submitted purchase requests |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{DownloadService, PlanService, PurchaseService};
