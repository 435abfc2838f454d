mod stats_dto;

pub use stats_dto::{
    DownloadTrendDto, OverviewDto, PlanCategoriesDto, RecentDownloadDto, TopPlanDto,
};
