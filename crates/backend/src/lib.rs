pub mod api;
pub mod dashboards;
pub mod routes;
pub mod shared;
