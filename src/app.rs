use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/transactions/add", post(handlers::add_transaction_form))
        .route("/transactions/clear-today", post(handlers::clear_today_form))
        .route("/transactions/:id/delete", post(handlers::remove_transaction_form))
        .route(
            "/api/transactions",
            get(handlers::list_transactions).post(handlers::add_transaction),
        )
        .route("/api/transactions/clear-today", post(handlers::clear_today))
        .route("/api/transactions/:id", delete(handlers::remove_transaction))
        .route("/api/summary", get(handlers::get_summary))
        .with_state(state)
}
