use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use kantor_core::accounts::CurrencyAccountUpdate as CoreAccountUpdate;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{CurrencyAccount, CurrencyAccountUpdate, NewCurrencyAccount},
};

#[utoipa::path(get, path = "/api/v1/currency-accounts", responses((status = 200, body = [CurrencyAccount])))]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CurrencyAccount>>> {
    let accounts = state.account_service.get_all_accounts()?;
    Ok(Json(accounts.into_iter().map(CurrencyAccount::from).collect()))
}

#[utoipa::path(post, path = "/api/v1/currency-accounts", request_body = NewCurrencyAccount, responses((status = 201, body = CurrencyAccount)))]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCurrencyAccount>,
) -> ApiResult<(StatusCode, Json<CurrencyAccount>)> {
    let created = state.account_service.create_account(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(CurrencyAccount::from(created))))
}

#[utoipa::path(get, path = "/api/v1/currency-accounts/{id}", responses((status = 200, body = CurrencyAccount)))]
pub async fn get_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CurrencyAccount>> {
    let account = state.account_service.get_account(&id)?;
    Ok(Json(CurrencyAccount::from(account)))
}

#[utoipa::path(put, path = "/api/v1/currency-accounts/{id}", request_body = CurrencyAccountUpdate, responses((status = 200, body = CurrencyAccount)))]
pub async fn update_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CurrencyAccountUpdate>,
) -> ApiResult<Json<CurrencyAccount>> {
    let updated = state
        .account_service
        .update_account(CoreAccountUpdate {
            id: Some(id),
            is_active: payload.is_active,
        })
        .await?;
    Ok(Json(CurrencyAccount::from(updated)))
}

/// Deletion goes through the ledger so the home-account and balance rules apply.
#[utoipa::path(delete, path = "/api/v1/currency-accounts/{id}", responses((status = 204)))]
pub async fn delete_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.ledger_service.delete_account(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/v1/currency-accounts/user/{user_id}", responses((status = 200, body = [CurrencyAccount])))]
pub async fn get_user_accounts(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CurrencyAccount>>> {
    let accounts = state.account_service.get_user_accounts(&user_id)?;
    Ok(Json(accounts.into_iter().map(CurrencyAccount::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/currency-accounts",
            get(list_accounts).post(create_account),
        )
        .route(
            "/currency-accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route("/currency-accounts/user/{user_id}", get(get_user_accounts))
}
