//! HTTP surface of the analysis function.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use log::debug;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::analysis::AnalysisRequest;
use crate::error::ExpenseError;
use crate::llm::{outcome_for_error, AnalysisOutcome, AnalysisService};

pub fn router(service: AnalysisService) -> Router {
    Router::new()
        .route("/ai-analyze", post(analyze))
        .route("/functions/v1/ai-analyze", post(analyze))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(service))
}

async fn analyze(State(service): State<Arc<AnalysisService>>, body: Bytes) -> Response {
    let request: AnalysisRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return respond(outcome_for_error(&ExpenseError::from(e))),
    };

    debug!("Analysis requested for {} expenses", request.expenses.len());
    respond(service.handle(&request).await)
}

fn respond(outcome: AnalysisOutcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome.reply)).into_response()
}
