pub mod dataset;
pub mod generator;
pub mod sales_csv;
