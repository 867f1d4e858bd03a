pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role held by guests who book stays.
pub const RENTER_ROLE: &str = "renter";
/// Role held by owners who list properties.
pub const VENDOR_ROLE: &str = "vendor";
/// Role with full access to every listing and booking.
pub const ADMIN_ROLE: &str = "admin";
