use crate::{handlers::*, middleware::apply_middleware, AppState};
use axum::{routing::get, Router};

pub fn create_router() -> Router<AppState> {
    Router::new()
        // Service info and health
        .route("/", get(index).fallback(method_not_allowed))
        .route("/health", get(health_check).fallback(method_not_allowed))
        .route("/metrics", get(metrics).fallback(method_not_allowed))
        // Account collection
        .route(
            "/accounts",
            get(list_accounts)
                .post(create_account)
                .fallback(method_not_allowed),
        )
        // Single account
        .route(
            "/accounts/:account_id",
            get(read_account)
                .put(update_account)
                .delete(delete_account)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
}

/// Full application: routes, middleware and state.
pub fn build_router(state: AppState) -> Router {
    apply_middleware(create_router(), &state.config).with_state(state)
}
