use crate::errors::AppError;
use crate::models::{
    AddTransactionForm, AddTransactionRequest, AddTransactionResponse, ClearTodayRequest,
    ClearTodayResponse, SummaryResponse, Transaction, TransactionId,
};
use crate::state::AppState;
use crate::stats::{build_summary, build_summary_at, start_of_day};
use crate::storage::persist_or_log;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Local;
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let ledger = state.ledger.lock().await;
    Html(render_index(&build_summary(&ledger)))
}

pub async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    let ledger = state.ledger.lock().await;
    Json(ledger.transactions().to_vec())
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let ledger = state.ledger.lock().await;
    Json(build_summary(&ledger))
}

pub async fn add_transaction(
    State(state): State<AppState>,
    Json(payload): Json<AddTransactionRequest>,
) -> Json<AddTransactionResponse> {
    Json(apply_add(&state, payload).await)
}

pub async fn remove_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<SummaryResponse> {
    Json(apply_remove(&state, &id).await)
}

pub async fn clear_today(
    State(state): State<AppState>,
    Json(payload): Json<ClearTodayRequest>,
) -> Result<Json<ClearTodayResponse>, AppError> {
    if !payload.confirmed {
        return Err(AppError::confirmation_required("clearing today"));
    }
    Ok(Json(apply_clear_today(&state).await))
}

pub async fn add_transaction_form(
    State(state): State<AppState>,
    Form(form): Form<AddTransactionForm>,
) -> Redirect {
    apply_add(&state, form.into()).await;
    Redirect::to("/")
}

pub async fn remove_transaction_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    apply_remove(&state, &id).await;
    Redirect::to("/")
}

pub async fn clear_today_form(
    State(state): State<AppState>,
    Form(form): Form<ClearTodayRequest>,
) -> Result<Redirect, AppError> {
    if !form.confirmed {
        return Err(AppError::confirmation_required("clearing today"));
    }
    apply_clear_today(&state).await;
    Ok(Redirect::to("/"))
}

async fn apply_add(state: &AppState, request: AddTransactionRequest) -> AddTransactionResponse {
    let mut ledger = state.ledger.lock().await;
    let now = Local::now();
    let added = match (request.quantity(), request.price()) {
        (Some(quantity), Some(price)) => ledger.add(request.name(), quantity, price, &now).cloned(),
        _ => None,
    };

    match &added {
        Some(tx) => {
            info!(id = %tx.id, name = %tx.name, quantity = tx.quantity, price = tx.price, "recorded sale");
            persist_or_log(&state.data_path, &ledger).await;
        }
        None => debug!(
            name = %request.name,
            quantity = %request.quantity,
            price = %request.price,
            "ignored invalid sale"
        ),
    }

    AddTransactionResponse {
        added,
        summary: build_summary_at(&ledger, &now),
    }
}

// Ids that do not parse cannot be in the ledger, so they are treated as absent.
async fn apply_remove(state: &AppState, id: &str) -> SummaryResponse {
    let mut ledger = state.ledger.lock().await;
    let removed = id
        .parse::<TransactionId>()
        .is_ok_and(|parsed| ledger.remove(parsed));
    if removed {
        info!(%id, "removed sale");
    } else {
        debug!(%id, "remove for unknown sale");
    }
    persist_or_log(&state.data_path, &ledger).await;
    build_summary(&ledger)
}

async fn apply_clear_today(state: &AppState) -> ClearTodayResponse {
    let mut ledger = state.ledger.lock().await;
    let now = Local::now();
    let cutoff = start_of_day(&now).timestamp_millis();
    let removed = ledger.clear_up_to(cutoff);
    info!(removed, "cleared today's sales");
    persist_or_log(&state.data_path, &ledger).await;

    ClearTodayResponse {
        removed,
        summary: build_summary_at(&ledger, &now),
    }
}
