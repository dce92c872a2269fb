use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use barcut_core::{
    recommend_waste, OptimizationRequest, OptimizationResponse, Optimizer, OptimizerError,
    WasteRecommendationRequest, WasteRecommendationResponse,
};
use serde::Serialize;
use serde_json::json;
use std::net::{IpAddr, SocketAddr};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const OPENAPI_SPEC: &str = include_str!("../../../openapi.yaml");
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Barcut API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            SwaggerUIBundle({
                url: '/openapi.yaml',
                dom_id: '#swagger-ui',
                presets: [SwaggerUIBundle.presets.apis],
                layout: 'BaseLayout',
            });
        };
    </script>
</body>
</html>"#;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Listen address, read from `BARCUT_ADDR` and `PORT`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServiceConfig {
    host: String,
    port: u16,
}

impl ServiceConfig {
    fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(
            std::env::var("BARCUT_ADDR").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> anyhow::Result<Self> {
        let port = match port {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip = self
            .host
            .trim()
            .parse::<IpAddr>()
            .with_context(|| format!("BARCUT_ADDR must be an IP address, got '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Barcut API");

    let config = ServiceConfig::from_env()?;
    let addr = config.socket_addr()?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("API server listening on http://{}", addr);
    info!("Try: curl http://localhost:{}/api/health", config.port);

    axum::serve(listener, app()).await.context("Server error")?;

    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/optimize/batch", post(optimize_batch))
        .route("/recommend/waste", post(recommend))
        .route("/openapi.yaml", get(serve_openapi_spec))
        .route("/docs", get(serve_swagger_ui))
        .layer(CorsLayer::permissive())
}

#[derive(Serialize)]
struct Status {
    status: &'static str,
    service: &'static str,
}

async fn root() -> Json<Status> {
    Json(Status {
        status: "online",
        service: "barcut",
    })
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "barcut-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Batch allocation endpoint
async fn optimize_batch(
    Json(request): Json<OptimizationRequest>,
) -> Result<Json<OptimizationResponse>, AppError> {
    info!(
        "Received batch with {} orders and {} waste items",
        request.orders.len(),
        request.available_waste.len()
    );

    let optimizer = Optimizer::new(request)?;
    let response = optimizer.optimize();

    info!(
        "Batch allocated: {} new bars, {} waste items used, {} mm scrap",
        response.total_new_bars_count,
        response.total_waste_used_count,
        response.total_scrap_generated_mm
    );

    Ok(Json(response))
}

/// Single-piece offcut lookup
async fn recommend(
    Json(request): Json<WasteRecommendationRequest>,
) -> Json<WasteRecommendationResponse> {
    let recommendation = recommend_waste(&request);

    info!(
        profile_code = %request.profile_code,
        color = %request.color,
        recommended = ?recommendation.recommended_item_id,
        "Waste recommendation"
    );

    Json(recommendation)
}

/// Application error type
struct AppError(anyhow::Error);

impl From<OptimizerError> for AppError {
    fn from(err: OptimizerError) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = if self.0.downcast_ref::<OptimizerError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

async fn serve_openapi_spec() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("Content-Type", "application/yaml")],
        OPENAPI_SPEC,
    )
}

async fn serve_swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
