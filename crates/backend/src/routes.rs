use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::p909_inventory_projection as p909;
use crate::projections::p909_inventory_projection::service::AppState;
use crate::system::middleware::request_logger::request_logger;

/// Роуты + CORS + логирование запросов
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    configure_routes(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // P909 INVENTORY PROJECTION
        // ========================================
        .route("/api/p909/inventory-projection/status", get(p909::status))
        .route(
            "/api/p909/inventory-projection/records",
            get(p909::list_records),
        )
        .route("/api/p909/inventory-projection/dates", get(p909::list_dates))
        .route("/api/p909/inventory-projection/grid", get(p909::get_grid))
        .route(
            "/api/p909/inventory-projection/make-to-order",
            post(p909::update_make_to_order),
        )
        .route(
            "/api/p909/inventory-projection/selected-date",
            get(p909::get_selected_date).post(p909::select_date),
        )
        .route(
            "/api/p909/inventory-projection/color-stats",
            get(p909::color_stats),
        )
        .route("/api/p909/inventory-projection/summary", get(p909::summary))
        .route(
            "/api/p909/inventory-projection/general-stats",
            get(p909::general_stats),
        )
        .route("/api/p909/inventory-projection/metrics", get(p909::metrics))
        .route("/api/p909/inventory-projection/palette", get(p909::palette))
        .with_state(state)
}
