//! HTTP server for the Resize API
//!
//! Serves the health check and forwards every other request to the
//! [`RequestRouter`].
// Copyright 2025 Francisco F. Pinochet
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::request::{ApiResponse, InboundRequest};
use crate::router::RequestRouter;

/// HTTP front end for the request router
pub struct ApiServer {
    port: u16,
    router: Arc<RequestRouter>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(port: u16, router: RequestRouter) -> Self {
        Self {
            port,
            router: Arc::new(router),
        }
    }

    /// Start the server and run until a shutdown signal arrives
    pub async fn start(self) -> anyhow::Result<()> {
        let app = app(self.router);

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr).await
            .map_err(|e| anyhow::anyhow!("Failed to bind API server to {}: {}", addr, e))?;

        info!(
            port = self.port,
            "API server started"
        );

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

        info!("API server stopped");
        Ok(())
    }
}

/// Build the axum application
///
/// `/health` is answered locally; any other path reaches the router, so
/// `/presigned-url`, `/resize` and `/job-status` all work.
pub fn app(router: Arc<RequestRouter>) -> Router {
    Router::new()
        .route("/health", get(health_check).fallback(health_other_method))
        .route("/api/health", get(health_check).fallback(health_other_method))
        .fallback(route_request)
        .with_state(router)
}

/// Forward a request to the router
async fn route_request(
    State(router): State<Arc<RequestRouter>>,
    method: Method,
    query: Option<Query<HashMap<String, String>>>,
    body: Bytes,
) -> ApiResponse {
    let body = if body.is_empty() {
        None
    } else {
        match String::from_utf8(body.to_vec()) {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(error = %e, "Rejected request body that is not UTF-8");
                return ApiResponse::error(400, "Request body is not valid UTF-8");
            }
        }
    };

    let request = InboundRequest {
        method: method.as_str().to_string(),
        query: query.map(|Query(q)| q).unwrap_or_default(),
        body,
    };

    router.dispatch(&request).await
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => warn!(header = name, "Dropping invalid response header"),
            }
        }

        response
    }
}

/// Non-GET requests on the health routes
async fn health_other_method(method: Method) -> ApiResponse {
    if method == Method::OPTIONS {
        ApiResponse::json(200, &json!({})).allowing_put()
    } else {
        ApiResponse::error(405, "Method not allowed")
    }
}

/// Health check handler
async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    let response = json!({
        "status": "ok",
        "service": "resize-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    });

    Ok(Json(response))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal (Ctrl+C) received");
        },
        _ = terminate => {
            info!("Shutdown signal (SIGTERM) received");
        },
    }
}
