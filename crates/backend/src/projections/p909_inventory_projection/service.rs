use contracts::projections::p909_inventory_projection::dto::{
    ColorStatsDto, DateColumnDto, GeneralStatsDto, GridDto, InventoryRecordDto, MetricsDto,
    ProjectionStatusDto, SelectedDateResponse, SummaryDto, UpdateMakeToOrderRequest,
};
use contracts::shared::zones::ZonePalette;
use std::path::Path;
use std::sync::Arc;

use super::error::ProjectionError;
use super::grid_builder::to_date_columns;
use super::loader::{self, LoadReport};
use super::statistics;
use super::store::ProjectionStore;

/// Результат загрузки: либо данные, либо одна ошибка без частичных данных
#[derive(Debug)]
pub enum ProjectionState {
    Ready(ProjectionStore),
    Failed(String),
}

impl ProjectionState {
    pub fn load(path: &Path) -> Self {
        Self::from_result(loader::load_from_path(path))
    }

    pub fn from_result(result: Result<LoadReport, ProjectionError>) -> Self {
        match result {
            Ok(report) => Self::Ready(ProjectionStore::new(report.records)),
            Err(e) => {
                tracing::error!("P909: failed to load projection data: {}", e);
                Self::Failed(e.to_string())
            }
        }
    }

    pub fn store(&self) -> Result<&ProjectionStore, ProjectionError> {
        match self {
            Self::Ready(store) => Ok(store),
            Self::Failed(message) => Err(ProjectionError::NotLoaded(message.clone())),
        }
    }

    pub fn status(&self) -> ProjectionStatusDto {
        match self {
            Self::Ready(store) => {
                let snapshot = store.snapshot();
                ProjectionStatusDto {
                    loaded: true,
                    error: None,
                    record_count: snapshot.records.len(),
                    version: snapshot.version,
                }
            }
            Self::Failed(message) => ProjectionStatusDto {
                loaded: false,
                error: Some(message.clone()),
                record_count: 0,
                version: 0,
            },
        }
    }
}

/// Общее состояние HTTP-обработчиков
#[derive(Debug, Clone)]
pub struct AppState {
    pub projection: Arc<ProjectionState>,
    pub palette: Arc<ZonePalette>,
}

impl AppState {
    pub fn new(projection: ProjectionState, palette: ZonePalette) -> Self {
        Self {
            projection: Arc::new(projection),
            palette: Arc::new(palette),
        }
    }
}

pub fn list_records(state: &ProjectionState) -> Result<Vec<InventoryRecordDto>, ProjectionError> {
    let snapshot = state.store()?.snapshot();
    Ok(snapshot.records.as_ref().clone())
}

pub fn date_columns(state: &ProjectionState) -> Result<Vec<DateColumnDto>, ProjectionError> {
    let views = state.store()?.derived();
    Ok(to_date_columns(&views.dates))
}

pub fn grid(state: &ProjectionState) -> Result<GridDto, ProjectionError> {
    let views = state.store()?.derived();
    Ok(GridDto {
        version: views.version,
        dates: to_date_columns(&views.dates),
        rows: views.rows.clone(),
    })
}

pub fn update_make_to_order(
    state: &ProjectionState,
    request: &UpdateMakeToOrderRequest,
) -> Result<InventoryRecordDto, ProjectionError> {
    state
        .store()?
        .update(&request.id, &request.value)
        .ok_or_else(|| ProjectionError::UnknownRecord(request.id.clone()))
}

pub fn select_date(
    state: &ProjectionState,
    date: &str,
) -> Result<SelectedDateResponse, ProjectionError> {
    let store = state.store()?;
    store.select_date(date);
    Ok(SelectedDateResponse {
        date: store.selected_date(),
    })
}

pub fn selected_date(state: &ProjectionState) -> Result<SelectedDateResponse, ProjectionError> {
    Ok(SelectedDateResponse {
        date: state.store()?.selected_date(),
    })
}

/// Статистика цветов: явная дата из запроса, иначе выбранная колонка
pub fn color_stats(
    state: &ProjectionState,
    date: Option<&str>,
) -> Result<ColorStatsDto, ProjectionError> {
    let store = state.store()?;
    let date = match date {
        Some(d) => d.to_string(),
        None => store
            .selected_date()
            .ok_or(ProjectionError::NoDateSelected)?,
    };
    let snapshot = store.snapshot();
    Ok(statistics::color_stats(&snapshot.records, &date))
}

pub fn summary(state: &ProjectionState, palette: &ZonePalette) -> Result<SummaryDto, ProjectionError> {
    let store = state.store()?;
    let selected = store.selected_date();
    let snapshot = store.snapshot();
    Ok(statistics::summary(
        &snapshot.records,
        selected.as_deref(),
        palette,
    ))
}

pub fn general_stats(state: &ProjectionState) -> Result<GeneralStatsDto, ProjectionError> {
    let snapshot = state.store()?.snapshot();
    Ok(statistics::general_stats(&snapshot.records))
}

pub fn metrics(state: &ProjectionState) -> Result<MetricsDto, ProjectionError> {
    Ok(state.store()?.derived().metrics.clone())
}
