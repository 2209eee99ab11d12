//! OpenAPI specification, served as JSON at `/api-docs/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Creator Studio API",
        version = "0.1.0",
        description = "Creator campaign services.\n\nGenerates AI campaign plans for a creator roster via a chat-completion gateway.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Planner", description = "AI campaign plan generation"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Planner
        crate::planner_rest::handle_campaign_plan,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        creator_planner::types::PlanRequest,
        creator_planner::types::Member,
        creator_planner::types::CampaignPlan,
        creator_planner::types::RecommendedMember,
        creator_planner::types::BudgetSplit,
        creator_planner::types::TimelinePhase,
        creator_planner::types::Kpi,
        crate::planner_rest::PlanResponse,
        crate::planner_rest::ErrorBody,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
