//! Business logic services for the Branch Sales Ledger

pub mod catalog;
pub mod inventory;
pub mod order;
pub mod period_report;
pub mod reporting;

pub use catalog::CatalogService;
pub use inventory::InventoryService;
pub use order::OrderService;
pub use period_report::PeriodReportService;
pub use reporting::ReportingService;
