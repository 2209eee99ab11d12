//! AI campaign planner: turns a creator roster into a structured campaign
//! plan by asking a chat-completion gateway to call a fixed
//! `generate_campaign_plan` function.

pub mod error;
pub mod gateway;
pub mod prompt;
pub mod types;

pub use error::PlannerError;
pub use gateway::PlannerGateway;
pub use types::{CampaignPlan, Member, PlanOutcome, PlanRequest};
