pub mod stats_handler;

pub use stats_handler::{
    __path_get_download_trends, __path_get_overview, __path_get_plan_categories,
    __path_get_recent_downloads, __path_get_top_plans, get_download_trends, get_overview,
    get_plan_categories, get_recent_downloads, get_top_plans,
};
