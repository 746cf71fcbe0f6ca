use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Handler for `GET /healthz`: the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`: the store can serve requests.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.store.ready().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
