use std::sync::Arc;

use crate::{config::Config, main_lib::AppState, models};
use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub mod accounts;
pub mod ledger;
pub mod users;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        users::register,
        users::login,
        users::logout,
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        accounts::list_accounts,
        accounts::create_account,
        accounts::get_account,
        accounts::update_account,
        accounts::delete_account,
        accounts::get_user_accounts,
        ledger::list_transactions,
        ledger::convert,
        ledger::list_deposits,
        ledger::deposit,
        ledger::account_history,
    ),
    components(schemas(
        models::User,
        models::NewUser,
        models::UserUpdate,
        models::LoginRequest,
        models::MessageResponse,
        models::UserResponse,
        models::CurrencyAccount,
        models::NewCurrencyAccount,
        models::CurrencyAccountUpdate,
        models::DepositPayload,
        models::ConvertPayload,
        models::DepositRecord,
        models::TransactionRecord,
        models::AccountHistoryEntry,
    )),
    tags((name = "kantor"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();
    CorsLayer::new().allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .merge(users::router())
        .merge(accounts::router())
        .merge(ledger::router());

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
