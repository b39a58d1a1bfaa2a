//! HTTP API for Cadence.

use crate::boundary::parse_instruction;
use crate::node::NodeState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cadence_store::{CountView, GapReport, ListView, Submission, SubmitError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

type AppState = Arc<NodeState>;

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/instruction", post(submit_instruction))
        .route("/count", get(count_instructions))
        .route("/instructions", get(list_instructions))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// --- Health endpoints ---

async fn health() -> &'static str {
    "OK"
}

async fn ready() -> &'static str {
    "OK"
}

// --- Instruction endpoints ---

async fn submit_instruction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = match parse_instruction(&headers, &body) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };
    submission_response(state.store.submit(request.seq, request.fragment))
}

#[derive(Debug, Serialize)]
struct IncompleteBody {
    status: &'static str,
    #[serde(flatten)]
    report: GapReport,
}

#[derive(Debug, Serialize)]
struct RejectedBody {
    status: &'static str,
    reason: &'static str,
    final_seq: i64,
}

/// Map a store outcome to a status code and JSON body.
pub fn submission_response(result: cadence_store::Result<Submission>) -> Response {
    if let Err(e) = &result {
        if e.is_recoverable() {
            tracing::debug!("Submission left run incomplete: {}", e);
        } else {
            tracing::warn!("Submission refused: {}", e);
        }
    }

    match result {
        Ok(accepted @ Submission::Accepted { .. }) => {
            (StatusCode::ACCEPTED, Json(accepted)).into_response()
        }
        Ok(complete @ Submission::Finalized(_)) => (StatusCode::OK, Json(complete)).into_response(),
        Err(SubmitError::SequenceGap(report)) => (
            StatusCode::CONFLICT,
            Json(IncompleteBody {
                status: "incomplete",
                report,
            }),
        )
            .into_response(),
        Err(e @ SubmitError::AlreadyFinalized { final_seq }) => (
            StatusCode::CONFLICT,
            Json(RejectedBody {
                status: "rejected",
                reason: e.reason(),
                final_seq,
            }),
        )
            .into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
struct CountParams {
    #[serde(default)]
    live: bool,
}

async fn count_instructions(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
) -> Json<CountView> {
    Json(state.store.count(params.live))
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    #[serde(default)]
    include_message: bool,
}

async fn list_instructions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<ListView> {
    Json(state.store.list(params.include_message))
}
