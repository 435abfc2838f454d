mod download_service;
mod plan_service;
mod purchase_service;

pub use download_service::DownloadService;
pub use plan_service::PlanService;
pub use purchase_service::PurchaseService;
