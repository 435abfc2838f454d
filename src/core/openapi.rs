use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::plans::{dtos as plans_dtos, handlers as plans_handlers};
use crate::features::profile::{dtos as profile_dtos, handlers as profile_handlers};
use crate::features::stats::{dtos as stats_dtos, handlers as stats_handlers};
use crate::shared::types::{ApiResponse, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::me,
        // Plans (public)
        plans_handlers::list_plans,
        plans_handlers::get_plan,
        plans_handlers::request_download,
        plans_handlers::submit_purchase,
        // Plans (admin)
        plans_handlers::create_plan,
        plans_handlers::update_plan,
        plans_handlers::delete_plan,
        plans_handlers::list_purchases,
        // Profile
        profile_handlers::get_profile,
        profile_handlers::update_profile,
        profile_handlers::change_password,
        // Stats
        stats_handlers::get_overview,
        stats_handlers::get_recent_downloads,
        stats_handlers::get_download_trends,
        stats_handlers::get_plan_categories,
        stats_handlers::get_top_plans,
    ),
    components(
        schemas(
            // Shared
            PaginationMeta,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            auth_dtos::AdminSummaryDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            ApiResponse<auth_dtos::AdminSummaryDto>,
            // Plans
            plans_dtos::PlanFilter,
            plans_dtos::PlanResponseDto,
            plans_dtos::PlanMultipartDto,
            plans_dtos::DeletePlanResponseDto,
            plans_dtos::DownloadResponseDto,
            plans_dtos::SubmitPurchaseDto,
            plans_dtos::PurchaseReceiptDto,
            plans_dtos::PurchaseRequestResponseDto,
            ApiResponse<Vec<plans_dtos::PlanResponseDto>>,
            ApiResponse<plans_dtos::PlanResponseDto>,
            ApiResponse<plans_dtos::DeletePlanResponseDto>,
            ApiResponse<plans_dtos::DownloadResponseDto>,
            ApiResponse<plans_dtos::PurchaseReceiptDto>,
            ApiResponse<Vec<plans_dtos::PurchaseRequestResponseDto>>,
            // Profile
            profile_dtos::ProfileResponseDto,
            profile_dtos::ProfileMultipartDto,
            profile_dtos::ChangePasswordDto,
            ApiResponse<profile_dtos::ProfileResponseDto>,
            // Stats
            stats_dtos::OverviewDto,
            stats_dtos::RecentDownloadDto,
            stats_dtos::DownloadTrendDto,
            stats_dtos::PlanCategoriesDto,
            stats_dtos::TopPlanDto,
            ApiResponse<stats_dtos::OverviewDto>,
            ApiResponse<Vec<stats_dtos::RecentDownloadDto>>,
            ApiResponse<Vec<stats_dtos::DownloadTrendDto>>,
            ApiResponse<stats_dtos::PlanCategoriesDto>,
            ApiResponse<Vec<stats_dtos::TopPlanDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Admin authentication"),
        (name = "plans", description = "House-plan catalog, downloads, and purchase intake"),
        (name = "profile", description = "Admin profile management"),
        (name = "stats", description = "Back-office statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "EstatePlans API",
        version = "0.1.0",
        description = "API documentation for the EstatePlans marketplace backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
