//! Ad campaign draft wizard.
//!
//! Steps run `Platforms -> BudgetTargeting -> [AbTesting] -> Preview`; the
//! A/B step only exists while A/B testing is on, so the flow is three or
//! four steps long. The assembler is a plain value owned by whoever opened
//! the dialog: build one per open, drop it on close.

use creator_core::config::AdsConfig;
use creator_core::types::{Audience, CampaignDuration, Objective, Platform};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::allocator::{VariantSet, MIN_VARIANTS};
use crate::config::AdConfig;
use crate::draft::CampaignDraft;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Platforms,
    BudgetTargeting,
    AbTesting,
    Preview,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(WizardStep),
    /// The current step's entry condition for moving on does not hold.
    Blocked(WizardStep),
    /// `back` from the first step; the draft has been discarded.
    Closed,
}

/// Caller-supplied starting point, e.g. an AI recommendation that seeds
/// platforms, budget and objective and opens straight on the preview.
#[derive(Debug, Clone, Default)]
pub struct WizardOverrides {
    pub initial_config: Option<AdConfig>,
    pub initial_step: Option<WizardStep>,
}

impl WizardOverrides {
    pub fn recommendation(config: AdConfig) -> Self {
        Self {
            initial_config: Some(config),
            initial_step: Some(WizardStep::Preview),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DraftAssembler {
    settings: AdsConfig,
    config: AdConfig,
    variants: Option<VariantSet>,
    step: usize,
}

impl DraftAssembler {
    /// Open the wizard with defaults, optionally pre-seeded.
    pub fn open(settings: AdsConfig, overrides: WizardOverrides) -> Self {
        let config = overrides
            .initial_config
            .unwrap_or_else(|| AdConfig::from_settings(&settings));
        let variants = config.ab_testing.then(|| VariantSet::new(MIN_VARIANTS));
        let mut assembler = Self {
            settings,
            config,
            variants,
            step: 0,
        };
        if let Some(step) = overrides.initial_step {
            assembler.step = assembler.index_of(step).unwrap_or(0);
        }
        debug!(step = ?assembler.current_step(), "ad wizard opened");
        assembler
    }

    pub fn config(&self) -> &AdConfig {
        &self.config
    }

    pub fn variants(&self) -> Option<&VariantSet> {
        self.variants.as_ref()
    }

    /// Allocator operations for the A/B step. `None` while A/B is off.
    pub fn variants_mut(&mut self) -> Option<&mut VariantSet> {
        self.variants.as_mut()
    }

    pub fn steps(&self) -> Vec<WizardStep> {
        if self.config.ab_testing {
            vec![
                WizardStep::Platforms,
                WizardStep::BudgetTargeting,
                WizardStep::AbTesting,
                WizardStep::Preview,
            ]
        } else {
            vec![
                WizardStep::Platforms,
                WizardStep::BudgetTargeting,
                WizardStep::Preview,
            ]
        }
    }

    pub fn total_steps(&self) -> usize {
        self.steps().len()
    }

    /// Zero-based index of the current step.
    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn current_step(&self) -> WizardStep {
        let steps = self.steps();
        steps[self.step.min(steps.len() - 1)]
    }

    fn index_of(&self, step: WizardStep) -> Option<usize> {
        self.steps().iter().position(|s| *s == step)
    }

    // ─── Field edits ───────────────────────────────────────────────────────

    /// Flip a platform's selection. Returns whether it is now selected.
    pub fn toggle_platform(&mut self, platform: Platform) -> bool {
        if self.config.platforms.remove(&platform) {
            false
        } else {
            self.config.platforms.insert(platform);
            true
        }
    }

    pub fn set_total_budget(&mut self, budget: u32) {
        self.config.total_budget = budget;
    }

    pub fn set_duration(&mut self, duration: CampaignDuration) {
        self.config.duration = duration;
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.config.objective = objective;
    }

    pub fn set_audience(&mut self, audience: Audience) {
        self.config.audience = audience;
    }

    /// Turn A/B testing on (seeding two variants at 50/50) or off
    /// (dropping them). The current step index does not move unless it
    /// would fall past the shortened flow.
    pub fn set_ab_testing(&mut self, enabled: bool) {
        if self.config.ab_testing == enabled {
            return;
        }
        self.config.ab_testing = enabled;
        self.variants = enabled.then(|| VariantSet::new(MIN_VARIANTS));
        self.step = self.step.min(self.total_steps() - 1);
        debug!(enabled, total_steps = self.total_steps(), "A/B testing toggled");
    }

    // ─── Navigation ────────────────────────────────────────────────────────

    /// Whether the current step's condition for moving forward holds.
    pub fn can_advance(&self) -> bool {
        match self.current_step() {
            WizardStep::Platforms => !self.config.platforms.is_empty(),
            WizardStep::BudgetTargeting => self.config.total_budget >= self.settings.min_budget,
            WizardStep::AbTesting => self.variants.as_ref().is_some_and(VariantSet::is_balanced),
            WizardStep::Preview => false,
        }
    }

    pub fn next(&mut self) -> StepOutcome {
        if !self.can_advance() {
            return StepOutcome::Blocked(self.current_step());
        }
        self.step += 1;
        StepOutcome::Moved(self.current_step())
    }

    pub fn back(&mut self) -> StepOutcome {
        if self.step == 0 {
            self.close();
            return StepOutcome::Closed;
        }
        self.step -= 1;
        StepOutcome::Moved(self.current_step())
    }

    /// Discard everything and return to defaults.
    pub fn close(&mut self) {
        self.config = AdConfig::from_settings(&self.settings);
        self.variants = None;
        self.step = 0;
    }

    /// Whether every step's condition holds for the collected choices.
    pub fn is_launchable(&self) -> bool {
        !self.config.platforms.is_empty()
            && self.config.total_budget >= self.settings.min_budget
            && (!self.config.ab_testing
                || self.variants.as_ref().is_some_and(VariantSet::is_balanced))
    }

    /// Final action on the preview step: hand back the assembled draft and
    /// reset the wizard. `None` anywhere else or when the draft is invalid.
    pub fn launch(&mut self) -> Option<CampaignDraft> {
        if self.current_step() != WizardStep::Preview || !self.is_launchable() {
            return None;
        }
        let variants = self
            .variants
            .as_ref()
            .map(|set| set.variants().to_vec())
            .unwrap_or_default();
        let draft = CampaignDraft::new(self.config.clone(), variants);
        info!(
            draft_id = %draft.id,
            platforms = draft.config.platforms.len(),
            budget = draft.config.total_budget,
            variants = draft.variants.len(),
            "ad campaign draft launched"
        );
        self.close();
        Some(draft)
    }
}

impl Default for DraftAssembler {
    fn default() -> Self {
        Self::open(AdsConfig::default(), WizardOverrides::default())
    }
}
