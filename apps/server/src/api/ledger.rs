use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{
        AccountHistoryEntry, ConvertPayload, DepositPayload, DepositQuery, DepositRecord,
        TransactionRecord,
    },
};

#[utoipa::path(get, path = "/api/v1/currency-accounts/convert/{user_id}", responses((status = 200, body = [TransactionRecord])))]
pub async fn list_transactions(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TransactionRecord>>> {
    let transactions = state.ledger_service.list_transactions(&user_id)?;
    Ok(Json(
        transactions
            .into_iter()
            .map(TransactionRecord::from)
            .collect(),
    ))
}

#[utoipa::path(post, path = "/api/v1/currency-accounts/convert/{user_id}", request_body = ConvertPayload, responses((status = 201, body = TransactionRecord)))]
pub async fn convert(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConvertPayload>,
) -> ApiResult<(StatusCode, Json<TransactionRecord>)> {
    let request = payload.into_request(user_id)?;
    let transaction = state.ledger_service.convert(request).await?;
    Ok((StatusCode::CREATED, Json(TransactionRecord::from(transaction))))
}

#[utoipa::path(get, path = "/api/v1/currency-accounts/deposit/{user_id}", params(DepositQuery), responses((status = 200, body = [DepositRecord])))]
pub async fn list_deposits(
    Path(user_id): Path<String>,
    Query(query): Query<DepositQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<DepositRecord>>> {
    let currency = query
        .currency_code
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty());
    let deposits = state
        .ledger_service
        .list_deposits(&user_id, currency.as_deref())?;
    Ok(Json(deposits.into_iter().map(DepositRecord::from).collect()))
}

#[utoipa::path(post, path = "/api/v1/currency-accounts/deposit/{user_id}", request_body = DepositPayload, responses((status = 201, body = DepositRecord)))]
pub async fn deposit(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DepositPayload>,
) -> ApiResult<(StatusCode, Json<DepositRecord>)> {
    let request = payload.into_request(user_id)?;
    let record = state.ledger_service.deposit(request).await?;
    Ok((StatusCode::CREATED, Json(DepositRecord::from(record))))
}

#[utoipa::path(get, path = "/api/v1/currency-accounts/history/{user_id}", responses((status = 200, body = [AccountHistoryEntry])))]
pub async fn account_history(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AccountHistoryEntry>>> {
    let history = state.ledger_service.list_account_history(&user_id)?;
    Ok(Json(
        history.into_iter().map(AccountHistoryEntry::from).collect(),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/currency-accounts/convert/{user_id}",
            get(list_transactions).post(convert),
        )
        .route(
            "/currency-accounts/deposit/{user_id}",
            get(list_deposits).post(deposit),
        )
        .route(
            "/currency-accounts/history/{user_id}",
            get(account_history),
        )
}
