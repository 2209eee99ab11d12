use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PlannerError;

/// Planner input: the roster to plan around plus optional constraints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub members: Vec<Member>,
    #[serde(default)]
    pub campaign_goal: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub duration: Option<DurationHint>,
}

/// One creator on the roster.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub followers: u64,
    /// Percent, e.g. `4.2` for 4.2 %.
    pub engagement_rate: f64,
}

/// Campaign length as sent by the client: either free text ("4 weeks") or
/// a plain number of days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationHint {
    Days(u32),
    Text(String),
}

impl fmt::Display for DurationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationHint::Days(days) => write!(f, "{days} days"),
            DurationHint::Text(text) => f.write_str(text),
        }
    }
}

/// What the gateway produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Arguments of the `generate_campaign_plan` call, unmodified.
    Plan(serde_json::Value),
    /// The model answered in prose instead of calling the function.
    RawContent(String),
}

// ─── Typed plan view ───────────────────────────────────────────────────────

/// Typed reading of the `generate_campaign_plan` arguments.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPlan {
    pub campaign_name: String,
    pub summary: String,
    pub recommended_members: Vec<RecommendedMember>,
    pub budget_split: BudgetSplit,
    pub timeline: Vec<TimelinePhase>,
    pub content_angles: Vec<String>,
    pub kpis: Vec<Kpi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_reach: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_engagement: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedMember {
    pub member_id: String,
    pub name: String,
    pub role: String,
    pub rationale: String,
}

/// Percent of the total budget per bucket.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSplit {
    pub creator_fees: f64,
    pub content_production: f64,
    pub amplification: f64,
    pub contingency: f64,
}

impl BudgetSplit {
    pub fn total(&self) -> f64 {
        self.creator_fees + self.content_production + self.amplification + self.contingency
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePhase {
    pub phase: String,
    pub duration: String,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub metric: String,
    pub target: String,
}

impl CampaignPlan {
    /// Decode the verbatim plan returned by the gateway.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, PlannerError> {
        serde_json::from_value(value.clone())
            .map_err(|e| PlannerError::MalformedArguments(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_optional_fields() {
        let request: PlanRequest = serde_json::from_value(json!({
            "members": [
                {"id": "m1", "name": "Ava", "platform": "instagram", "followers": 12000, "engagementRate": 4.5}
            ]
        }))
        .unwrap();
        assert_eq!(request.members.len(), 1);
        assert_eq!(request.members[0].engagement_rate, 4.5);
        assert!(request.campaign_goal.is_none());
        assert!(request.budget.is_none());
        assert!(request.duration.is_none());
    }

    #[test]
    fn test_duration_hint_number_or_text() {
        let days: DurationHint = serde_json::from_value(json!(30)).unwrap();
        assert_eq!(days, DurationHint::Days(30));
        assert_eq!(days.to_string(), "30 days");

        let text: DurationHint = serde_json::from_value(json!("6 weeks")).unwrap();
        assert_eq!(text.to_string(), "6 weeks");
    }

    #[test]
    fn test_typed_plan_view() {
        let value = json!({
            "campaignName": "Glow Up",
            "summary": "Skincare launch",
            "recommendedMembers": [
                {"memberId": "m1", "name": "Ava", "role": "lead", "rationale": "highest engagement"}
            ],
            "budgetSplit": {"creatorFees": 50, "contentProduction": 20, "amplification": 25, "contingency": 5},
            "timeline": [{"phase": "Seeding", "duration": "1 week", "activities": ["ship product"]}],
            "contentAngles": ["morning routine"],
            "kpis": [{"metric": "CTR", "target": "2%"}]
        });
        let plan = CampaignPlan::from_value(&value).unwrap();
        assert_eq!(plan.campaign_name, "Glow Up");
        assert_eq!(plan.budget_split.total(), 100.0);
        assert!(plan.estimated_reach.is_none());

        let broken = json!({"campaignName": "Only a name"});
        assert!(matches!(
            CampaignPlan::from_value(&broken),
            Err(PlannerError::MalformedArguments(_))
        ));
    }
}
