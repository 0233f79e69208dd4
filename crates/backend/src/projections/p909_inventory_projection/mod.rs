pub mod error;
pub mod grid_builder;
pub mod loader;
pub mod metrics;
pub mod service;
pub mod statistics;
pub mod store;

pub use error::ProjectionError;
