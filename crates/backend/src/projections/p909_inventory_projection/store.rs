use contracts::projections::p909_inventory_projection::dto::{
    InventoryRecordDto, MetricsDto, ProductRowDto,
};
use serde_json::Value;
use std::sync::{Arc, Mutex, RwLock};

use super::grid_builder::{to_product_rows, unique_dates};
use super::loader::number_from_value;
use super::metrics::calculate_metrics;

/// Неизменяемая версия коллекции записей.
#[derive(Debug)]
pub struct ProjectionSnapshot {
    pub version: u64,
    pub records: Arc<Vec<InventoryRecordDto>>,
}

/// Производные представления одной версии.
#[derive(Debug)]
pub struct DerivedViews {
    pub version: u64,
    pub dates: Vec<String>,
    pub rows: Vec<ProductRowDto>,
    pub metrics: MetricsDto,
}

/// Версионируемая коллекция записей в памяти.
///
/// Каждая правка копирует коллекцию и атомарно подменяет версию: читатель
/// со снимком никогда не видит частично применённое изменение.
#[derive(Debug)]
pub struct ProjectionStore {
    current: RwLock<Arc<ProjectionSnapshot>>,
    selected_date: RwLock<Option<String>>,
    derived: Mutex<Option<Arc<DerivedViews>>>,
}

impl ProjectionStore {
    pub fn new(records: Vec<InventoryRecordDto>) -> Self {
        Self {
            current: RwLock::new(Arc::new(ProjectionSnapshot {
                version: 1,
                records: Arc::new(records),
            })),
            selected_date: RwLock::new(None),
            derived: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> Arc<ProjectionSnapshot> {
        let current = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*current)
    }

    pub fn version(&self) -> u64 {
        self.snapshot().version
    }

    /// Замена `make_to_order` одной записи.
    ///
    /// Нечисловой ввод = 0, отрицательное обрезается до 0. Возвращает
    /// обновлённую запись или `None` для неизвестного `id` (без изменений).
    /// Запись того же значения версию не меняет.
    pub fn update(&self, id: &str, value: &Value) -> Option<InventoryRecordDto> {
        let make_to_order = sanitize_make_to_order(value);

        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        let position = current.records.iter().position(|r| r.id == id)?;

        if current.records[position].make_to_order == make_to_order {
            return Some(current.records[position].clone());
        }

        let mut records = current.records.as_ref().clone();
        records[position].make_to_order = make_to_order;
        let updated = records[position].clone();

        let version = current.version + 1;
        *current = Arc::new(ProjectionSnapshot {
            version,
            records: Arc::new(records),
        });

        tracing::debug!(
            "P909: {} make_to_order = {} (version {})",
            id,
            make_to_order,
            version
        );
        Some(updated)
    }

    pub fn select_date(&self, date: impl Into<String>) {
        let mut selected = self.selected_date.write().unwrap_or_else(|e| e.into_inner());
        *selected = Some(date.into());
    }

    pub fn selected_date(&self) -> Option<String> {
        self.selected_date
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Даты, строки и метрики текущей версии; кэш живёт до следующей правки.
    pub fn derived(&self) -> Arc<DerivedViews> {
        let snapshot = self.snapshot();
        let mut cached = self.derived.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(views) = cached.as_ref() {
            if views.version == snapshot.version {
                return Arc::clone(views);
            }
        }

        let views = Arc::new(DerivedViews {
            version: snapshot.version,
            dates: unique_dates(&snapshot.records),
            rows: to_product_rows(&snapshot.records),
            metrics: calculate_metrics(&snapshot.records),
        });
        *cached = Some(Arc::clone(&views));
        views
    }
}

/// `max(0, value)`; всё, что не конечное число, становится 0.
pub fn sanitize_make_to_order(value: &Value) -> f64 {
    match number_from_value(value) {
        Some(n) if n > 0.0 => n,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(id: &str, date: &str, net_flow: f64) -> InventoryRecordDto {
        InventoryRecordDto {
            id: id.to_string(),
            center_code: "BCV".to_string(),
            reference: id.to_string(),
            forecast_date: date.to_string(),
            net_flow,
            red_zone: 10.0,
            yellow_zone: 10.0,
            green_zone: 10.0,
            make_to_order: 0.0,
        }
    }

    fn store() -> ProjectionStore {
        ProjectionStore::new(vec![
            rec("a", "2025-01-01", 5.0),
            rec("b", "2025-01-01", 15.0),
            rec("c", "2025-01-02", 25.0),
        ])
    }

    fn mto(store: &ProjectionStore, id: &str) -> f64 {
        store
            .snapshot()
            .records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.make_to_order)
            .unwrap()
    }

    #[test]
    fn test_update_replaces_only_target() {
        let store = store();
        let before = store.snapshot();

        let updated = store.update("b", &json!(12.5)).unwrap();
        assert_eq!(updated.make_to_order, 12.5);

        let after = store.snapshot();
        assert_eq!(after.version, before.version + 1);
        assert_eq!(mto(&store, "b"), 12.5);
        assert_eq!(after.records[0], before.records[0]);
        assert_eq!(after.records[2], before.records[2]);
        // Старый снимок не изменился
        assert_eq!(before.records[1].make_to_order, 0.0);
    }

    #[test]
    fn test_update_clamps_and_coerces() {
        let store = store();
        store.update("a", &json!(-5)).unwrap();
        assert_eq!(mto(&store, "a"), 0.0);

        store.update("a", &json!("42")).unwrap();
        assert_eq!(mto(&store, "a"), 42.0);

        store.update("a", &json!("abc")).unwrap();
        assert_eq!(mto(&store, "a"), 0.0);

        store.update("a", &json!(7)).unwrap();
        store.update("a", &Value::Null).unwrap();
        assert_eq!(mto(&store, "a"), 0.0);

        store.update("a", &json!({ "x": 1 })).unwrap();
        assert_eq!(mto(&store, "a"), 0.0);

        // Строки, дающие NaN или бесконечность
        for raw in ["NaN", "inf", "-inf", "infinity", "1e400"] {
            store.update("a", &json!(5)).unwrap();
            let updated = store.update("a", &json!(raw)).unwrap();
            assert_eq!(updated.make_to_order, 0.0, "input {:?}", raw);
            assert_eq!(mto(&store, "a"), 0.0, "input {:?}", raw);
        }
    }

    #[test]
    fn test_sanitize_non_finite() {
        assert_eq!(sanitize_make_to_order(&json!("NaN")), 0.0);
        assert_eq!(sanitize_make_to_order(&json!(" inf ")), 0.0);
        assert_eq!(sanitize_make_to_order(&json!("1e400")), 0.0);
        assert_eq!(sanitize_make_to_order(&json!(f64::MAX)), f64::MAX);
        assert_eq!(sanitize_make_to_order(&json!(" 2.5 ")), 2.5);
    }

    #[test]
    fn test_update_is_idempotent() {
        let store = store();
        store.update("c", &json!(3)).unwrap();
        let once = store.snapshot();
        store.update("c", &json!(3)).unwrap();
        let twice = store.snapshot();

        assert_eq!(once.records, twice.records);
        assert_eq!(once.version, twice.version);
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let store = store();
        let before = store.snapshot();
        assert!(store.update("missing", &json!(10)).is_none());
        let after = store.snapshot();
        assert_eq!(before.version, after.version);
        assert_eq!(before.records, after.records);
    }

    #[test]
    fn test_select_date() {
        let store = store();
        assert_eq!(store.selected_date(), None);
        store.select_date("2025-01-02");
        assert_eq!(store.selected_date().as_deref(), Some("2025-01-02"));
        store.select_date("2099-01-01");
        assert_eq!(store.selected_date().as_deref(), Some("2099-01-01"));
    }

    #[test]
    fn test_derived_views_are_memoized_per_version() {
        let store = store();
        let first = store.derived();
        let again = store.derived();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.dates, vec!["2025-01-01", "2025-01-02"]);
        assert_eq!(first.rows.len(), 3);

        store.update("a", &json!(20)).unwrap();
        let fresh = store.derived();
        assert!(!Arc::ptr_eq(&first, &fresh));
        assert_eq!(fresh.version, store.version());
        assert_eq!(fresh.rows[0].cells["2025-01-01"].make_to_order, 20.0);
    }

    #[test]
    fn test_memoized_metrics_match_recomputation() {
        let store = store();
        store.update("b", &json!(1)).unwrap();
        let views = store.derived();
        assert_eq!(views.metrics, calculate_metrics(&store.snapshot().records));
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = Arc::new(store());
        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let id = if i % 2 == 0 { "a" } else { "b" };
                    store.update(id, &json!(i)).unwrap();
                    let snapshot = store.snapshot();
                    assert_eq!(snapshot.records.len(), 3);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(store.version() > 1);
        assert!(mto(&store, "a") > 0.0);
        assert!(mto(&store, "b") > 0.0);
    }
}
