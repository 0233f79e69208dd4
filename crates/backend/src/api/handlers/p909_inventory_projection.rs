use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::projections::p909_inventory_projection::dto::{
    ColorStatsDto, DateColumnDto, ErrorResponse, GeneralStatsDto, GridDto, InventoryRecordDto,
    MetricsDto, ProjectionStatusDto, SelectDateRequest, SelectedDateResponse, SummaryDto,
    UpdateMakeToOrderRequest,
};
use contracts::shared::zones::ZonePalette;
use serde::Deserialize;

use crate::projections::p909_inventory_projection::service::{self, AppState};
use crate::projections::p909_inventory_projection::ProjectionError;

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct ColorStatsQuery {
    pub date: Option<String>,
}

/// Ошибка проекции -> HTTP статус + `{ "error": ... }`
fn map_error(context: &str, e: ProjectionError) -> ApiError {
    let status = match &e {
        ProjectionError::NotLoaded(_) => StatusCode::SERVICE_UNAVAILABLE,
        ProjectionError::UnknownRecord(_) => StatusCode::NOT_FOUND,
        ProjectionError::NoDateSelected => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("P909 {}: {}", context, e);
    } else {
        tracing::warn!("P909 {}: {}", context, e);
    }

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// GET /api/p909/inventory-projection/status
pub async fn status(State(state): State<AppState>) -> Json<ProjectionStatusDto> {
    Json(state.projection.status())
}

/// GET /api/p909/inventory-projection/records
pub async fn list_records(State(state): State<AppState>) -> ApiResult<Vec<InventoryRecordDto>> {
    service::list_records(&state.projection)
        .map(Json)
        .map_err(|e| map_error("list records", e))
}

/// GET /api/p909/inventory-projection/dates
pub async fn list_dates(State(state): State<AppState>) -> ApiResult<Vec<DateColumnDto>> {
    service::date_columns(&state.projection)
        .map(Json)
        .map_err(|e| map_error("list dates", e))
}

/// GET /api/p909/inventory-projection/grid
pub async fn get_grid(State(state): State<AppState>) -> ApiResult<GridDto> {
    service::grid(&state.projection)
        .map(Json)
        .map_err(|e| map_error("build grid", e))
}

/// POST /api/p909/inventory-projection/make-to-order
pub async fn update_make_to_order(
    State(state): State<AppState>,
    Json(request): Json<UpdateMakeToOrderRequest>,
) -> ApiResult<InventoryRecordDto> {
    let updated = service::update_make_to_order(&state.projection, &request)
        .map_err(|e| map_error("update make-to-order", e))?;

    tracing::info!(
        "P909: make-to-order of {} set to {}",
        updated.id,
        updated.make_to_order
    );
    Ok(Json(updated))
}

/// GET /api/p909/inventory-projection/selected-date
pub async fn get_selected_date(State(state): State<AppState>) -> ApiResult<SelectedDateResponse> {
    service::selected_date(&state.projection)
        .map(Json)
        .map_err(|e| map_error("get selected date", e))
}

/// POST /api/p909/inventory-projection/selected-date
pub async fn select_date(
    State(state): State<AppState>,
    Json(request): Json<SelectDateRequest>,
) -> ApiResult<SelectedDateResponse> {
    service::select_date(&state.projection, &request.date)
        .map(Json)
        .map_err(|e| map_error("select date", e))
}

/// GET /api/p909/inventory-projection/color-stats?date=...
pub async fn color_stats(
    State(state): State<AppState>,
    Query(query): Query<ColorStatsQuery>,
) -> ApiResult<ColorStatsDto> {
    service::color_stats(&state.projection, query.date.as_deref())
        .map(Json)
        .map_err(|e| map_error("color stats", e))
}

/// GET /api/p909/inventory-projection/summary
pub async fn summary(State(state): State<AppState>) -> ApiResult<SummaryDto> {
    service::summary(&state.projection, &state.palette)
        .map(Json)
        .map_err(|e| map_error("summary", e))
}

/// GET /api/p909/inventory-projection/general-stats
pub async fn general_stats(State(state): State<AppState>) -> ApiResult<GeneralStatsDto> {
    service::general_stats(&state.projection)
        .map(Json)
        .map_err(|e| map_error("general stats", e))
}

/// GET /api/p909/inventory-projection/metrics
pub async fn metrics(State(state): State<AppState>) -> ApiResult<MetricsDto> {
    service::metrics(&state.projection)
        .map(Json)
        .map_err(|e| map_error("metrics", e))
}

/// GET /api/p909/inventory-projection/palette
pub async fn palette(State(state): State<AppState>) -> Json<ZonePalette> {
    Json(state.palette.as_ref().clone())
}
