use crate::AppState;
use account_metrics::TracingService;
use account_models::{
    Account, AccountError, AccountRequest, ErrorShape, HealthStatus, ServiceInfo,
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        OriginalUri, Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::Json,
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

pub const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Default, Deserialize)]
pub struct ListAccountsParams {
    pub name: Option<String>,
}

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

#[instrument(skip(state, headers, body))]
pub async fn create_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, HeaderMap, Json<Account>), (StatusCode, Json<ErrorShape>)> {
    info!("Request to create an Account");

    let new_account = check_content_type(&headers, JSON_MEDIA_TYPE)
        .and_then(|_| body_bytes(body))
        .and_then(|body| AccountRequest::from_slice(&body))
        .and_then(|request| request.validate(today()))
        .map_err(|e| reject(&state, "/accounts", e))?;

    match state.store.create(new_account).await {
        Ok(account) => {
            state.metrics.record_account_created(account.id);
            TracingService::log_account_created(&account);

            let mut response_headers = HeaderMap::new();
            if let Ok(location) = HeaderValue::from_str(&format!("/accounts/{}", account.id)) {
                response_headers.insert(header::LOCATION, location);
            }
            Ok((StatusCode::CREATED, response_headers, Json(account)))
        }
        Err(e) => {
            error!("Failed to create account: {}", e);
            Err(reject(&state, "/accounts", e))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_accounts(
    State(state): State<AppState>,
    params: Result<Query<ListAccountsParams>, QueryRejection>,
) -> Result<Json<Vec<Account>>, (StatusCode, Json<ErrorShape>)> {
    info!("Request to list accounts");

    let Query(params) = params.map_err(|rejection| {
        reject(
            &state,
            "/accounts",
            AccountError::InvalidQuery {
                reason: rejection.body_text(),
            },
        )
    })?;

    let result = match params.name.as_deref() {
        Some(name) => state.store.find_by_name(name).await,
        None => state.store.all().await,
    };

    match result {
        Ok(accounts) => {
            info!("Returning {} accounts", accounts.len());
            Ok(Json(accounts))
        }
        Err(e) => {
            error!("Failed to list accounts: {}", e);
            Err(reject(&state, "/accounts", e))
        }
    }
}

#[instrument(skip(state, uri))]
pub async fn read_account(
    State(state): State<AppState>,
    uri: Uri,
    account_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Account>, (StatusCode, Json<ErrorShape>)> {
    let path = uri.path();
    let account_id = account_id_param(account_id, &uri);
    info!("Request to read account {}", account_id);

    let id = parse_account_id(&account_id).map_err(|e| reject(&state, path, e))?;

    match state.store.find(id).await {
        Ok(Some(account)) => Ok(Json(account)),
        Ok(None) => Err(reject(&state, path, not_found(&account_id))),
        Err(e) => {
            error!("Failed to read account {}: {}", account_id, e);
            Err(reject(&state, path, e))
        }
    }
}

#[instrument(skip(state, uri, headers, body))]
pub async fn update_account(
    State(state): State<AppState>,
    uri: Uri,
    account_id: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Account>, (StatusCode, Json<ErrorShape>)> {
    let path = uri.path();
    let account_id = account_id_param(account_id, &uri);
    info!("Request to update account {}", account_id);

    let id = parse_account_id(&account_id).map_err(|e| reject(&state, path, e))?;
    let changes = check_content_type(&headers, JSON_MEDIA_TYPE)
        .and_then(|_| body_bytes(body))
        .and_then(|body| AccountRequest::from_slice(&body))
        .and_then(|request| request.validate(today()))
        .map_err(|e| reject(&state, path, e))?;

    match state.store.update(id, changes).await {
        Ok(Some(account)) => {
            state.metrics.record_account_updated(account.id);
            TracingService::log_account_updated(&account);
            Ok(Json(account))
        }
        Ok(None) => Err(reject(&state, path, not_found(&account_id))),
        Err(e) => {
            error!("Failed to update account {}: {}", account_id, e);
            Err(reject(&state, path, e))
        }
    }
}

/// Deleting an account that does not exist still answers 204.
#[instrument(skip(state, uri))]
pub async fn delete_account(
    State(state): State<AppState>,
    uri: Uri,
    account_id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, (StatusCode, Json<ErrorShape>)> {
    let account_id = account_id_param(account_id, &uri);
    info!("Request to delete account {}", account_id);

    let Ok(id) = parse_account_id(&account_id) else {
        return Ok(StatusCode::NO_CONTENT);
    };

    match state.store.delete(id).await {
        Ok(existed) => {
            if existed {
                state.metrics.record_account_deleted(id);
            }
            TracingService::log_account_deleted(id, existed);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            error!("Failed to delete account {}: {}", account_id, e);
            Err(reject(&state, uri.path(), e))
        }
    }
}

pub async fn metrics(State(state): State<AppState>) -> Result<String, StatusCode> {
    match state.metrics.get_prometheus_metrics() {
        Ok(metrics) => Ok(metrics),
        Err(e) => {
            error!("Failed to get metrics: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn method_not_allowed(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> (StatusCode, Json<ErrorShape>) {
    reject(
        &state,
        uri.path(),
        AccountError::MethodNotAllowed {
            method: method.to_string(),
        },
    )
}

pub async fn route_not_found(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> (StatusCode, Json<ErrorShape>) {
    reject(
        &state,
        uri.path(),
        AccountError::RouteNotFound {
            path: uri.path().to_string(),
        },
    )
}

/// Require the request's media type (ignoring parameters such as `charset`)
/// to be `media_type`.
pub fn check_content_type(headers: &HeaderMap, media_type: &str) -> Result<(), AccountError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let essence = content_type
        .and_then(|value| value.split(';').next())
        .map(str::trim);

    match essence {
        Some(essence) if essence.eq_ignore_ascii_case(media_type) => Ok(()),
        _ => {
            warn!("Invalid Content-Type: {:?}", content_type);
            Err(AccountError::UnsupportedMediaType {
                media_type: media_type.to_string(),
            })
        }
    }
}

/// The decoded `account_id` segment, or the raw last path segment when it
/// does not decode.
fn account_id_param(param: Result<Path<String>, PathRejection>, uri: &Uri) -> String {
    match param {
        Ok(Path(account_id)) => account_id,
        Err(rejection) => {
            warn!("Undecodable account id: {}", rejection.body_text());
            uri.path().rsplit('/').next().unwrap_or_default().to_string()
        }
    }
}

fn body_bytes(body: Result<Bytes, BytesRejection>) -> Result<Bytes, AccountError> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AccountError::PayloadTooLarge {
                reason: rejection.body_text(),
            }
        } else {
            AccountError::InvalidAccount {
                reason: rejection.body_text(),
            }
        }
    })
}

fn parse_account_id(raw: &str) -> Result<i64, AccountError> {
    raw.parse::<i64>().map_err(|_| not_found(raw))
}

fn not_found(account_id: &str) -> AccountError {
    AccountError::AccountNotFound {
        account_id: account_id.to_string(),
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

fn reject(state: &AppState, path: &str, e: AccountError) -> (StatusCode, Json<ErrorShape>) {
    let shape = e.to_error_shape();
    state.metrics.record_error(shape.status);
    TracingService::log_rejected_request(path, shape.status, &shape.message);
    (
        StatusCode::from_u16(shape.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(shape),
    )
}
