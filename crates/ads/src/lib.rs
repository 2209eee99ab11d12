//! Paid-ad launch flow for approved creator content: A/B variant budget
//! allocation and the multi-step campaign draft wizard.

pub mod allocator;
pub mod config;
pub mod draft;
pub mod wizard;

pub use allocator::{Variant, VariantSet};
pub use config::AdConfig;
pub use draft::{BudgetBreakdown, CampaignDraft, VariantAllocation};
pub use wizard::{DraftAssembler, StepOutcome, WizardOverrides, WizardStep};
