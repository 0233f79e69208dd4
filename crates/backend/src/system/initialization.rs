use std::path::{Path, PathBuf};

use crate::projections::p909_inventory_projection::service::{AppState, ProjectionState};
use crate::shared::config::{self, Config};

/// Поиск файла данных проекции для относительного пути
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом (production)
/// 2. Текущая директория (development)
/// 3. Корень проекта (запуск из target/)
///
/// Если ничего не найдено, путь возвращается как есть, и ошибка загрузки
/// называет путь из конфигурации.
pub fn resolve_data_path(configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        return configured.to_path_buf();
    }

    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join(configured));
        }
    }
    candidates.push(configured.to_path_buf());
    candidates.push(Path::new("../..").join(configured));

    for path in &candidates {
        if path.exists() {
            tracing::info!("Found projection data: {}", path.display());
            return path.clone();
        }
    }

    tracing::warn!("Projection data not found. Searched in:");
    for path in &candidates {
        tracing::warn!("  - {}", path.display());
    }
    configured.to_path_buf()
}

/// Однократная загрузка проекции до старта сервера.
///
/// Ошибка загрузки не фатальна: она становится состоянием, которое отдаёт `/status`.
pub fn initialize_projection(config: &Config) -> AppState {
    let data_path = resolve_data_path(&config::get_data_path(config));
    load_projection(&data_path, config)
}

/// Загрузка проекции из уже найденного файла
pub fn load_projection(data_path: &Path, config: &Config) -> AppState {
    let projection = ProjectionState::load(data_path);

    match &projection {
        ProjectionState::Ready(store) => tracing::info!(
            "P909 ready: {} records, version {}",
            store.snapshot().records.len(),
            store.version()
        ),
        ProjectionState::Failed(message) => {
            tracing::error!("P909 unavailable: {}", message)
        }
    }

    AppState::new(projection, config.palette())
}
