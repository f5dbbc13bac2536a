use serde::Serialize;
use utoipa::ToSchema;

use crate::features::reports::models::ReportCategory;

/// Response DTO for a report category
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponseDto {
    /// Value to send as `category` when submitting
    pub value: ReportCategory,
    /// Display label
    pub label: String,
}

impl From<ReportCategory> for CategoryResponseDto {
    fn from(category: ReportCategory) -> Self {
        Self {
            value: category,
            label: category.label().to_string(),
        }
    }
}
