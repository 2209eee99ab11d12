//! Fixed prompt text and the `generate_campaign_plan` function schema.

use serde_json::{json, Value};

use crate::types::PlanRequest;

pub const PLAN_FUNCTION_NAME: &str = "generate_campaign_plan";

const DEFAULT_GOAL: &str = "Brand awareness and engagement";
const DEFAULT_BUDGET: &str = "Flexible";
const DEFAULT_DURATION: &str = "4 weeks";

pub const SYSTEM_PROMPT: &str = "You are an expert influencer marketing strategist. \
You design creator campaigns that match each creator's platform and audience to the brand's goal, \
split the budget sensibly and set measurable KPIs. Always answer by calling the provided function.";

/// User message describing the roster and constraints.
pub fn build_user_prompt(request: &PlanRequest) -> String {
    let mut prompt = String::from(
        "Create an influencer marketing campaign plan for the following creators:\n\n",
    );

    for member in &request.members {
        prompt.push_str(&format!(
            "- {} (id: {}) on {}: {} followers, {:.1}% engagement rate\n",
            member.name, member.id, member.platform, member.followers, member.engagement_rate
        ));
    }

    let goal = request.campaign_goal.as_deref().unwrap_or(DEFAULT_GOAL);
    let budget = request
        .budget
        .map(|b| format!("${b:.0}"))
        .unwrap_or_else(|| DEFAULT_BUDGET.to_string());
    let duration = request
        .duration
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| DEFAULT_DURATION.to_string());

    prompt.push_str(&format!(
        "\nCampaign goal: {goal}\nBudget: {budget}\nDuration: {duration}\n\n\
Recommend which creators to use and in what role, split the budget across creator fees, \
content production, amplification and contingency (percentages summing to 100), lay out a \
phased timeline, propose content angles, define KPIs, and estimate reach and engagement."
    ));
    prompt
}

/// The single tool offered to the model.
pub fn plan_tool() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": PLAN_FUNCTION_NAME,
            "description": "Generate a structured influencer campaign plan",
            "parameters": {
                "type": "object",
                "properties": {
                    "campaignName": { "type": "string" },
                    "summary": { "type": "string" },
                    "recommendedMembers": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "memberId": { "type": "string" },
                                "name": { "type": "string" },
                                "role": { "type": "string" },
                                "rationale": { "type": "string" }
                            },
                            "required": ["memberId", "name", "role", "rationale"]
                        }
                    },
                    "budgetSplit": {
                        "type": "object",
                        "description": "Percent of the total budget per bucket",
                        "properties": {
                            "creatorFees": { "type": "number" },
                            "contentProduction": { "type": "number" },
                            "amplification": { "type": "number" },
                            "contingency": { "type": "number" }
                        },
                        "required": ["creatorFees", "contentProduction", "amplification", "contingency"]
                    },
                    "timeline": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "phase": { "type": "string" },
                                "duration": { "type": "string" },
                                "activities": { "type": "array", "items": { "type": "string" } }
                            },
                            "required": ["phase", "duration", "activities"]
                        }
                    },
                    "contentAngles": { "type": "array", "items": { "type": "string" } },
                    "kpis": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "metric": { "type": "string" },
                                "target": { "type": "string" }
                            },
                            "required": ["metric", "target"]
                        }
                    },
                    "estimatedReach": { "type": "string" },
                    "estimatedEngagement": { "type": "string" }
                },
                "required": [
                    "campaignName",
                    "summary",
                    "recommendedMembers",
                    "budgetSplit",
                    "timeline",
                    "contentAngles",
                    "kpis"
                ]
            }
        }
    })
}

/// Forces the model to call [`PLAN_FUNCTION_NAME`].
pub fn plan_tool_choice() -> Value {
    json!({ "type": "function", "function": { "name": PLAN_FUNCTION_NAME } })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DurationHint, Member};

    fn roster() -> Vec<Member> {
        vec![Member {
            id: "m1".to_string(),
            name: "Ava".to_string(),
            platform: "tiktok".to_string(),
            followers: 48_000,
            engagement_rate: 6.4,
        }]
    }

    #[test]
    fn test_prompt_defaults() {
        let request = PlanRequest {
            members: roster(),
            campaign_goal: None,
            budget: None,
            duration: None,
        };
        let prompt = build_user_prompt(&request);
        assert!(prompt.contains("- Ava (id: m1) on tiktok: 48000 followers, 6.4% engagement rate"));
        assert!(prompt.contains("Campaign goal: Brand awareness and engagement"));
        assert!(prompt.contains("Budget: Flexible"));
        assert!(prompt.contains("Duration: 4 weeks"));
    }

    #[test]
    fn test_prompt_with_constraints() {
        let request = PlanRequest {
            members: roster(),
            campaign_goal: Some("Drive app installs".to_string()),
            budget: Some(15000.0),
            duration: Some(DurationHint::Days(30)),
        };
        let prompt = build_user_prompt(&request);
        assert!(prompt.contains("Campaign goal: Drive app installs"));
        assert!(prompt.contains("Budget: $15000"));
        assert!(prompt.contains("Duration: 30 days"));
    }

    #[test]
    fn test_tool_schema_shape() {
        let tool = plan_tool();
        assert_eq!(tool["function"]["name"], PLAN_FUNCTION_NAME);
        let required = tool["function"]["parameters"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 7);
        let split = &tool["function"]["parameters"]["properties"]["budgetSplit"]["required"];
        assert_eq!(split.as_array().unwrap().len(), 4);
        assert_eq!(plan_tool_choice()["function"]["name"], PLAN_FUNCTION_NAME);
    }
}
