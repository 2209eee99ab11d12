use thiserror::Error;

pub const RATE_LIMITED_MESSAGE: &str = "Rate limits exceeded, please try again later.";
pub const PAYMENT_REQUIRED_MESSAGE: &str =
    "Payment required, please add funds to your AI workspace.";

#[derive(Debug, Clone, Error)]
pub enum PlannerError {
    #[error("AI gateway API key is not configured")]
    MissingApiKey,

    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,

    #[error("{}", PAYMENT_REQUIRED_MESSAGE)]
    PaymentRequired,

    #[error("AI gateway error (status {status})")]
    Upstream { status: u16, body: String },

    #[error("AI gateway request failed: {0}")]
    Transport(String),

    /// The gateway answered 2xx but the body is not a chat completion.
    #[error("AI gateway returned an unreadable response: {0}")]
    Decode(String),

    /// The incoming plan request body could not be read.
    #[error("Invalid plan request: {0}")]
    BadRequest(String),

    /// The function-call arguments are not valid JSON for a plan.
    #[error("AI plan arguments could not be parsed: {0}")]
    MalformedArguments(String),
}

impl PlannerError {
    /// HTTP status the planner endpoint answers with for this error.
    pub fn status(&self) -> u16 {
        match self {
            PlannerError::RateLimited => 429,
            PlannerError::PaymentRequired => 402,
            _ => 500,
        }
    }
}
