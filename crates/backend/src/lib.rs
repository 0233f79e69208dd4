pub mod api;
pub mod projections;
pub mod routes;
pub mod shared;
pub mod system;
