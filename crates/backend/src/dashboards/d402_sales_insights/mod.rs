pub mod aggregations;
pub mod cross_table;
pub mod filter;
pub mod insights;
pub mod page;
pub mod service;
