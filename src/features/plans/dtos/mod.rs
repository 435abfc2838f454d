mod plan_dto;
mod purchase_dto;

pub use plan_dto::{
    DeletePlanResponseDto, DownloadResponseDto, ListPlansQuery, PlanFilter, PlanFormData,
    PlanMultipartDto, PlanResponseDto, PlanUpsertDto,
};
pub use purchase_dto::{PurchaseReceiptDto, PurchaseRequestResponseDto, SubmitPurchaseDto};
