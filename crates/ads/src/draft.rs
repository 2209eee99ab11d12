//! Immutable snapshot handed to the caller when an ad campaign launches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::allocator::{Variant, TOTAL_SHARE};
use crate::config::AdConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignDraft {
    pub id: Uuid,
    pub config: AdConfig,
    /// Empty when A/B testing is off; the campaign then runs a single
    /// implicit variant holding the whole budget.
    pub variants: Vec<Variant>,
    pub launched_at: DateTime<Utc>,
}

/// Currency split of a launched draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetBreakdown {
    pub total_budget: u32,
    pub daily_budget: u32,
    pub allocations: Vec<VariantAllocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantAllocation {
    /// `None` for the implicit single variant.
    pub variant_id: Option<Uuid>,
    pub name: String,
    pub percent: u32,
    pub amount: u32,
}

impl CampaignDraft {
    pub(crate) fn new(config: AdConfig, variants: Vec<Variant>) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            variants,
            launched_at: Utc::now(),
        }
    }

    /// Per-variant spend. Each variant gets `total * percent / 100`
    /// (floored); the last variant absorbs the rounding remainder.
    pub fn budget_breakdown(&self) -> BudgetBreakdown {
        let total = self.config.total_budget;

        let allocations = if self.variants.is_empty() {
            vec![VariantAllocation {
                variant_id: None,
                name: "Default".to_string(),
                percent: TOTAL_SHARE,
                amount: total,
            }]
        } else {
            let mut assigned = 0u32;
            let last = self.variants.len() - 1;
            self.variants
                .iter()
                .enumerate()
                .map(|(i, variant)| {
                    let amount = if i == last {
                        total.saturating_sub(assigned)
                    } else {
                        (u64::from(total) * u64::from(variant.budget_percent)
                            / u64::from(TOTAL_SHARE)) as u32
                    };
                    assigned = assigned.saturating_add(amount);
                    VariantAllocation {
                        variant_id: Some(variant.id),
                        name: variant.name.clone(),
                        percent: variant.budget_percent,
                        amount,
                    }
                })
                .collect()
        };

        BudgetBreakdown {
            total_budget: total,
            daily_budget: self.config.daily_budget(),
            allocations,
        }
    }
}
