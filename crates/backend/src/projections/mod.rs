// Projections (p909)
pub mod p909_inventory_projection;
