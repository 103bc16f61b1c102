use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::server::AppState;

/// Service identification.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/`
pub async fn index() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Health check endpoint handler.
///
/// Reports whether storage answers. Used by load balancers and uptime
/// monitors, so it sits outside the authorization gate.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/status`
///
/// # HTTP Status Codes
/// - **200 OK**: `{"status":"ok","mensaje":"Todo funcionando correctamente"}`
/// - **503 Service Unavailable**: storage did not answer
pub async fn status(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "mensaje": "Todo funcionando correctamente" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "mensaje": "Base de datos no disponible" })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{send, TestApp};

    #[tokio::test]
    async fn public_endpoints_need_no_token() {
        let app = TestApp::new();

        let (status, body) = send(&app, "GET", "/status", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("ok"));

        let (status, body) = send(&app, "GET", "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], json!("psycare-api"));
    }
}
