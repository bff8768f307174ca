//! Route definitions for the Branch Sales Ledger

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/orders", order_routes())
        .nest("/inventory", inventory_routes())
        .nest("/reports", report_routes())
}

/// Sale order routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_order).get(handlers::list_orders))
        .route(
            "/:id",
            get(handlers::get_order).delete(handlers::delete_order),
        )
}

/// Inventory ledger routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/low-stock", get(handlers::get_low_stock))
        .route("/branch/:branch_id", get(handlers::list_branch_inventory))
        .route(
            "/:branch_id/:product_id",
            get(handlers::get_inventory)
                .patch(handlers::adjust_inventory)
                .put(handlers::set_inventory_count),
        )
}

/// Period report and aggregation routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/period",
            post(handlers::submit_period_report).get(handlers::list_reports_by_period),
        )
        .route("/period/:id", get(handlers::get_period_report))
        .route(
            "/period/scope/:scope_id",
            get(handlers::list_reports_by_scope),
        )
        .route("/by-branch", get(handlers::get_sales_by_branch))
        .route("/top-products", get(handlers::get_top_products))
        .route("/daily", get(handlers::get_daily_sales))
        .route("/monthly", get(handlers::get_monthly_summaries))
        .route("/monthly/:year/:month", get(handlers::get_period_summary))
        .route(
            "/monthly/:year/:month/branches",
            get(handlers::get_period_branches),
        )
        .route("/dashboard", get(handlers::get_dashboard))
}
