//! REST API server for test card generation and classification.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! cardlab-server
//!
//! # With custom port (or PORT=8080 cardlab-server)
//! cardlab-server --port 8080
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    extract::Path,
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use cardlab::{
    generate::CardCount, validate, CardBrand, CardError, CardGenerator, GenerationEnvelope,
    LuhnStatus, NoDigitsReport, SyntheticCard, ValidationOutcome, ValidationReport,
};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "cardlab API",
        version = "0.1.0",
        description = "Synthetic test card generation and card number classification. Generated numbers pass the Luhn check only and are not real cards.",
        license(name = "MIT")
    ),
    tags(
        (name = "Generation", description = "Synthetic test card generation"),
        (name = "Validation", description = "Card number validation and classification"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        generate_path,
        generate_body,
        validate_path,
        validate_body,
        health,
    ),
    components(schemas(
        CardBrand,
        SyntheticCard,
        GenerationEnvelope,
        LuhnStatus,
        ValidationReport,
        NoDigitsReport,
        GenerateRequest,
        ValidateRequest,
        ErrorResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_type": "credit", "count": 3, "brand": "visa"}))]
struct GenerateRequest {
    /// Card type label (credit, debit, ...). Informational only.
    #[serde(default = "default_card_type")]
    card_type: String,
    /// Number of cards to generate, clamped to 1-20 (default: 1)
    #[serde(default = "default_count")]
    count: i64,
    /// Force a brand: amex, diners, discover, instapayment, jcb, maestro, mastercard, visa, visa electron
    #[serde(default)]
    brand: Option<String>,
}

fn default_card_type() -> String {
    "credit".to_string()
}

fn default_count() -> i64 {
    1
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "4111-1111-1111-1111"}))]
struct ValidateRequest {
    /// Card number to classify. Non-digit characters are ignored.
    card_number: String,
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    /// Always "error"
    status: String,
    /// Human-readable error message
    message: String,
}

impl From<CardError> for ErrorResponse {
    fn from(err: CardError) -> Self {
        Self {
            status: "error".to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Generate test cards from path parameters
#[utoipa::path(
    get,
    path = "/card/{card_type}/gen/{count}",
    params(
        ("card_type" = String, Path, description = "Card type label (informational)"),
        ("count" = String, Path, description = "Number of cards; non-numeric values count as 1, clamped to 1-20")
    ),
    responses(
        (status = 200, description = "Generated cards", body = GenerationEnvelope)
    ),
    tag = "Generation"
)]
async fn generate_path(
    Path((card_type, count)): Path<(String, String)>,
) -> Json<GenerationEnvelope> {
    let envelope = CardGenerator::new(card_type)
        .card_count(CardCount::parse(&count))
        .generate();
    tracing::info!(total = envelope.total, "generated cards");
    Json(envelope)
}

/// Generate test cards from a JSON body
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated cards", body = GenerationEnvelope),
        (status = 400, description = "Unknown brand", body = ErrorResponse)
    ),
    tag = "Generation"
)]
async fn generate_body(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerationEnvelope>, (StatusCode, Json<ErrorResponse>)> {
    let brand = req
        .brand
        .as_deref()
        .map(str::parse::<CardBrand>)
        .transpose()
        .map_err(|e| {
            tracing::warn!(error = %e, "rejected generate request");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(e)))
        })?;

    let envelope = CardGenerator::new(req.card_type)
        .maybe_brand(brand)
        .count(req.count)
        .generate();
    tracing::info!(total = envelope.total, "generated cards");
    Ok(Json(envelope))
}

/// Validate a card number given in the path
#[utoipa::path(
    get,
    path = "/valid/{number}/json",
    params(
        ("number" = String, Path, description = "Card number; non-digit characters are ignored")
    ),
    responses(
        (status = 200, description = "Validation report (or a short no-digits report)", body = ValidationReport)
    ),
    tag = "Validation"
)]
async fn validate_path(Path(number): Path<String>) -> Json<ValidationOutcome> {
    Json(validate(&number))
}

/// Validate a card number given in a JSON body
#[utoipa::path(
    post,
    path = "/validate",
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "Validation report (or a short no-digits report)", body = ValidationReport)
    ),
    tag = "Validation"
)]
async fn validate_body(Json(req): Json<ValidateRequest>) -> Json<ValidationOutcome> {
    Json(validate(&req.card_number))
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Configuration
// ============================================================================

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerConfig {
    host: IpAddr,
    port: u16,
}

impl ServerConfig {
    /// Reads `--host`/`--port` from the arguments, falling back to the
    /// `HOST`/`PORT` environment variables, then to 0.0.0.0:3000.
    fn from_env() -> Result<Self, CardError> {
        Self::from_sources(
            std::env::args().skip(1),
            std::env::var("HOST").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn from_sources(
        args: impl IntoIterator<Item = String>,
        env_host: Option<String>,
        env_port: Option<String>,
    ) -> Result<Self, CardError> {
        let args: Vec<String> = args.into_iter().collect();
        let flag = |name: &str| {
            args.iter()
                .skip_while(|a| a.as_str() != name)
                .nth(1)
                .cloned()
        };

        let host = match flag("--host").or(env_host) {
            Some(value) => value.parse().map_err(|_| CardError::InvalidConfig {
                key: "HOST",
                value,
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match flag("--port").or(env_port) {
            Some(value) => value.parse().map_err(|_| CardError::InvalidConfig {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// ============================================================================
// Main
// ============================================================================

fn app() -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/card/:card_type/gen/:count", get(generate_path))
        .route("/generate", post(generate_body))
        .route("/valid/:number/json", get(validate_path))
        .route("/validate", post(validate_body))
        .route("/health", get(health))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid server configuration");
        e
    })?;

    let addr = config.addr();
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!(
        "Swagger UI available at http://{}:{}/swagger-ui/",
        "localhost",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::from_sources(args(&[]), None, None).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn test_config_args_override_env() {
        let config = ServerConfig::from_sources(
            args(&["--port", "8080", "--host", "127.0.0.1"]),
            Some("0.0.0.0".to_string()),
            Some("9000".to_string()),
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_env_port() {
        let config = ServerConfig::from_sources(args(&[]), None, Some("9000".to_string())).unwrap();
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_config_rejects_bad_port() {
        let err = ServerConfig::from_sources(args(&["--port", "eighty"]), None, None).unwrap_err();
        assert_eq!(
            err,
            CardError::InvalidConfig {
                key: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_error_response_from_unknown_brand() {
        let err = "unionpay".parse::<CardBrand>().unwrap_err();
        let body = ErrorResponse::from(err);
        assert_eq!(body.status, "error");
        assert!(body.message.contains("unionpay"));
    }

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/card/{card_type}/gen/{count}"));
        assert!(paths.iter().any(|p| p.as_str() == "/valid/{number}/json"));
    }
}
