//! HTTP Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use vibe_advisor::{
    AdviceReport, AdvisorError, AnalyzeRequest, VibeSuggestion, model::MISSING_FIELDS_MESSAGE,
};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub llm_connected: bool,
    pub price_feed: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: AdviceReport,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub timestamp: DateTime<Utc>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &'static str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
            code,
            field: None,
            timestamp: Utc::now(),
        }),
    )
}

/// Map advisor failures onto the HTTP error taxonomy
fn advisor_error(err: &AdvisorError) -> ApiError {
    if err.is_validation() {
        return validation_error(err);
    }

    match err {
        AdvisorError::Generation(_) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_ERROR", err.to_string())
        }
        _ => {
            tracing::error!("Unexpected advisor error: {}", err);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "UNKNOWN_ERROR", err.to_string())
        }
    }
}

/// 400 for a request the client got wrong, naming the offending field
fn validation_error(err: &AdvisorError) -> ApiError {
    let (code, message, field) = match err {
        AdvisorError::MissingField(field) => {
            ("MISSING_FIELD", MISSING_FIELDS_MESSAGE.to_string(), Some(*field))
        }
        AdvisorError::InvalidField { field, .. } => {
            ("INVALID_FIELD", err.to_string(), Some(*field))
        }
        _ => ("INVALID_FIELD", err.to_string(), None),
    };
    tracing::warn!(field = field.unwrap_or("-"), "Rejected analysis request: {}", err);

    let (status, Json(mut body)) = api_error(StatusCode::BAD_REQUEST, code, message);
    body.field = field;
    (status, Json(body))
}

// ============================================================================
// Handlers
// ============================================================================

/// Greeting, with the current price when the exchange answers
pub async fn root(State(state): State<AppState>) -> String {
    state.advisor.greeting().await
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let llm_connected = state.advisor.provider_healthy().await;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.advisor.provider_name().to_string(),
        llm_connected,
        price_feed: state.advisor.exchange_name().to_string(),
    })
}

/// Free-form leverage suggestion
pub async fn position(
    State(state): State<AppState>,
) -> Result<Json<VibeSuggestion>, ApiError> {
    state
        .advisor
        .suggest_position()
        .await
        .map(Json)
        .map_err(|e| advisor_error(&e))
}

/// Risk analysis of a client-described position
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected analysis body: {}", rejection.body_text());
        api_error(
            StatusCode::BAD_REQUEST,
            "INVALID_BODY",
            format!("{MISSING_FIELDS_MESSAGE} ({})", rejection.body_text()),
        )
    })?;

    let query = request.validate().map_err(|e| advisor_error(&e))?;

    let analysis = state
        .advisor
        .analyze(&query)
        .await
        .map_err(|e| advisor_error(&e))?;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}
