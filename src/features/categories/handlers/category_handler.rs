use axum::Json;

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::reports::models::ReportCategory;
use crate::shared::types::{ApiResponse, Meta};

/// List the categories a report can be filed under
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories() -> Json<ApiResponse<Vec<CategoryResponseDto>>> {
    let categories: Vec<CategoryResponseDto> = ReportCategory::ALL
        .iter()
        .copied()
        .map(CategoryResponseDto::from)
        .collect();
    let total = categories.len() as i64;

    Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    ))
}
