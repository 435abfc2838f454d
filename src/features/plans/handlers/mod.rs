pub mod download_handler;
pub mod plan_handler;
pub mod purchase_handler;

pub use download_handler::{__path_request_download, request_download};
pub use plan_handler::{
    __path_create_plan, __path_delete_plan, __path_get_plan, __path_list_plans,
    __path_update_plan, create_plan, delete_plan, get_plan, list_plans, update_plan,
};
pub use purchase_handler::{
    __path_list_purchases, __path_submit_purchase, list_purchases, submit_purchase,
};
