//! AI campaign planner REST endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use creator_planner::{PlanOutcome, PlanRequest, PlannerError};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::rest::AppState;

/// POST /v1/campaign-planner: Generate a campaign plan for a roster.
#[utoipa::path(
    post,
    path = "/v1/campaign-planner",
    tag = "Planner",
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Structured plan, or raw model text", body = PlanResponse),
        (status = 402, description = "AI workspace out of credits", body = ErrorBody),
        (status = 429, description = "Upstream rate limit", body = ErrorBody),
        (status = 500, description = "Unreadable request, upstream or parse failure", body = ErrorBody),
    )
)]
pub async fn handle_campaign_plan(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>, PlannerApiError> {
    metrics::counter!("planner.requests").increment(1);
    let Json(request) = payload
        .map_err(|rejection| PlannerApiError(PlannerError::BadRequest(rejection.body_text())))?;
    info!(
        node_id = %state.node_id,
        members = request.members.len(),
        has_goal = request.campaign_goal.is_some(),
        "campaign plan requested"
    );

    let outcome = state.gateway.generate_plan(&request).await.map_err(|e| {
        metrics::counter!("planner.upstream_errors", "status" => e.status().to_string())
            .increment(1);
        PlannerApiError(e)
    })?;

    Ok(Json(match outcome {
        PlanOutcome::Plan(plan) => PlanResponse {
            success: true,
            plan: Some(plan),
            raw_content: None,
        },
        PlanOutcome::RawContent(text) => {
            metrics::counter!("planner.fallback_raw").increment(1);
            PlanResponse {
                success: true,
                plan: None,
                raw_content: Some(text),
            }
        }
    }))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub plan: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps planner failures to `{ "error": ... }` with the matching status.
#[derive(Debug)]
pub struct PlannerApiError(pub PlannerError);

impl IntoResponse for PlannerApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "campaign plan failed");
        } else {
            warn!(error = %self.0, status = status.as_u16(), "campaign plan rejected upstream");
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
