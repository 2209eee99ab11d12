//! A/B variant budget allocation.
//!
//! A [`VariantSet`] holds 2 to 4 ad variants, each owning an integer
//! percentage of the campaign budget. Every public operation leaves the set
//! with shares summing to exactly 100 and each share within
//! [`MIN_SHARE`, `MAX_SHARE`]. Operations whose preconditions fail
//! (set full, set at minimum size, unknown id) leave the set untouched and
//! return `false`.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub const MIN_VARIANTS: usize = 2;
pub const MAX_VARIANTS: usize = 4;
pub const MIN_SHARE: u32 = 10;
pub const MAX_SHARE: u32 = 90;
pub const TOTAL_SHARE: u32 = 100;

const DEFAULT_CTA: &str = "Learn More";

/// One creative version in an A/B test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variant {
    pub id: Uuid,
    pub name: String,
    pub headline: String,
    pub description: String,
    pub cta_text: String,
    pub budget_percent: u32,
}

impl Variant {
    fn at_position(position: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: variant_name(position),
            headline: String::new(),
            description: String::new(),
            cta_text: DEFAULT_CTA.to_string(),
            budget_percent: 0,
        }
    }
}

/// "Variant A" for position 0, "Variant B" for 1, ...
fn variant_name(position: usize) -> String {
    let letter = char::from(b'A' + (position % 26) as u8);
    format!("Variant {letter}")
}

/// Ordered collection of ad variants sharing one budget.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VariantSet {
    variants: Vec<Variant>,
}

impl VariantSet {
    /// Seed `count` variants with an even split; the last variant absorbs
    /// the rounding remainder. `count` is clamped into 2..=4.
    pub fn new(count: usize) -> Self {
        let count = count.clamp(MIN_VARIANTS, MAX_VARIANTS);
        let mut set = Self {
            variants: (0..count).map(Variant::at_position).collect(),
        };
        set.apply_even_split();
        set
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Budget shares in position order.
    pub fn shares(&self) -> Vec<u32> {
        self.variants.iter().map(|v| v.budget_percent).collect()
    }

    pub fn total_percent(&self) -> u32 {
        self.variants.iter().map(|v| v.budget_percent).sum()
    }

    /// Whether the set satisfies cardinality, bounds and the 100 total.
    pub fn is_balanced(&self) -> bool {
        (MIN_VARIANTS..=MAX_VARIANTS).contains(&self.len())
            && self.total_percent() == TOTAL_SHARE
            && self
                .variants
                .iter()
                .all(|v| (MIN_SHARE..=MAX_SHARE).contains(&v.budget_percent))
    }

    /// Append a variant and re-split evenly. Returns the new variant's id.
    pub fn add_variant(&mut self) -> Option<Uuid> {
        if self.variants.len() >= MAX_VARIANTS {
            debug!(len = self.variants.len(), "add_variant ignored: variant set is full");
            return None;
        }
        let variant = Variant::at_position(self.variants.len());
        let id = variant.id;
        self.variants.push(variant);
        self.apply_even_split();
        Some(id)
    }

    /// Remove a variant and re-split evenly among the rest.
    pub fn remove_variant(&mut self, id: Uuid) -> bool {
        if self.variants.len() <= MIN_VARIANTS {
            debug!(len = self.variants.len(), "remove_variant ignored: at minimum size");
            return false;
        }
        let Some(pos) = self.position(id) else {
            debug!(%id, "remove_variant ignored: unknown variant");
            return false;
        };
        self.variants.remove(pos);
        self.apply_even_split();
        true
    }

    /// Reset every share to the even split. Idempotent.
    pub fn redistribute_evenly(&mut self) {
        self.apply_even_split();
    }

    /// Slider path: give variant `id` a share of `value` percent and take
    /// (or return) the difference from the other variants.
    ///
    /// `value` is clamped to [10, 90] and to what the other variants can
    /// absorb while each keeps at least 10. The difference is first spread
    /// evenly (floored) over the others, each floored at 10; any residue
    /// that leaves the total off 100 is then moved among the others in
    /// proportion to their remaining headroom.
    pub fn set_share(&mut self, id: Uuid, value: u32) -> bool {
        let Some(target) = self.position(id) else {
            debug!(%id, "set_share ignored: unknown variant");
            return false;
        };
        let n = self.variants.len();
        if n < MIN_VARIANTS {
            return false;
        }

        let ceiling = MAX_SHARE.min(TOTAL_SHARE - MIN_SHARE * (n as u32 - 1));
        let value = value.clamp(MIN_SHARE, ceiling);
        let diff = i64::from(value) - i64::from(self.variants[target].budget_percent);
        let per_other = diff.div_euclid(n as i64 - 1);

        for (i, variant) in self.variants.iter_mut().enumerate() {
            if i == target {
                variant.budget_percent = value;
            } else {
                let next = i64::from(variant.budget_percent) - per_other;
                variant.budget_percent =
                    next.clamp(i64::from(MIN_SHARE), i64::from(MAX_SHARE)) as u32;
            }
        }

        self.settle_residual(target);
        true
    }

    pub fn set_headline(&mut self, id: Uuid, headline: impl Into<String>) -> bool {
        self.update(id, |v| v.headline = headline.into())
    }

    pub fn set_description(&mut self, id: Uuid, description: impl Into<String>) -> bool {
        self.update(id, |v| v.description = description.into())
    }

    pub fn set_cta_text(&mut self, id: Uuid, cta_text: impl Into<String>) -> bool {
        self.update(id, |v| v.cta_text = cta_text.into())
    }

    fn update(&mut self, id: Uuid, f: impl FnOnce(&mut Variant)) -> bool {
        match self.variants.iter_mut().find(|v| v.id == id) {
            Some(variant) => {
                f(variant);
                true
            }
            None => false,
        }
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.variants.iter().position(|v| v.id == id)
    }

    /// `floor(100 / n)` for every variant but the last, which takes the rest.
    fn apply_even_split(&mut self) {
        let n = self.variants.len() as u32;
        if n == 0 {
            return;
        }
        let per_variant = TOTAL_SHARE / n;
        let last = TOTAL_SHARE - per_variant * (n - 1);
        let last_index = self.variants.len() - 1;
        for (i, variant) in self.variants.iter_mut().enumerate() {
            variant.budget_percent = if i == last_index { last } else { per_variant };
        }
    }

    /// Move whatever keeps the total off 100 among the variants other than
    /// `target`, proportionally to headroom, largest remainders first.
    fn settle_residual(&mut self, target: usize) {
        let residual = i64::from(TOTAL_SHARE) - i64::from(self.total_percent());
        if residual == 0 {
            return;
        }
        let raising = residual > 0;

        let others: Vec<usize> = (0..self.variants.len()).filter(|&i| i != target).collect();
        let rooms: Vec<u64> = others
            .iter()
            .map(|&i| {
                let share = self.variants[i].budget_percent;
                u64::from(if raising { MAX_SHARE - share } else { share - MIN_SHARE })
            })
            .collect();
        let total_room: u64 = rooms.iter().sum();
        if total_room == 0 {
            return;
        }
        let amount = residual.unsigned_abs().min(total_room);

        let mut moves: Vec<u64> = rooms.iter().map(|room| amount * room / total_room).collect();
        let mut leftover = amount - moves.iter().sum::<u64>();

        let mut order: Vec<usize> = (0..others.len()).collect();
        order.sort_by_key(|&k| (Reverse(amount * rooms[k] % total_room), k));
        for k in order {
            if leftover == 0 {
                break;
            }
            if moves[k] < rooms[k] {
                moves[k] += 1;
                leftover -= 1;
            }
        }

        for (k, &i) in others.iter().enumerate() {
            let step = moves[k] as u32;
            let share = &mut self.variants[i].budget_percent;
            if raising {
                *share += step;
            } else {
                *share -= step;
            }
        }
    }
}

impl Default for VariantSet {
    fn default() -> Self {
        Self::new(MIN_VARIANTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(set: &VariantSet) -> Vec<Uuid> {
        set.variants().iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_initialize_even_split() {
        let set = VariantSet::new(2);
        assert_eq!(set.shares(), vec![50, 50]);
        assert_eq!(set.variants()[0].name, "Variant A");
        assert_eq!(set.variants()[1].name, "Variant B");
        assert_eq!(set.variants()[0].cta_text, "Learn More");
    }

    #[test]
    fn test_initialize_clamps_count() {
        assert_eq!(VariantSet::new(0).len(), 2);
        assert_eq!(VariantSet::new(9).shares(), vec![25, 25, 25, 25]);
        assert_eq!(VariantSet::new(3).shares(), vec![33, 33, 34]);
    }

    #[test]
    fn test_add_variant_absorbs_remainder() {
        let mut set = VariantSet::new(2);
        let id = set.add_variant().unwrap();
        assert_eq!(set.shares(), vec![33, 33, 34]);
        assert_eq!(set.variants()[2].id, id);
        assert_eq!(set.variants()[2].name, "Variant C");

        set.add_variant().unwrap();
        assert_eq!(set.shares(), vec![25, 25, 25, 25]);
    }

    #[test]
    fn test_add_variant_noop_when_full() {
        let mut set = VariantSet::new(4);
        let before = set.clone();
        assert!(set.add_variant().is_none());
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove_variant_from_four() {
        let mut set = VariantSet::new(4);
        assert_eq!(set.shares(), vec![25, 25, 25, 25]);
        let victim = ids(&set)[1];
        assert!(set.remove_variant(victim));
        assert_eq!(set.shares(), vec![33, 33, 34]);
        assert!(set.get(victim).is_none());
    }

    #[test]
    fn test_remove_variant_noop_at_minimum() {
        let mut set = VariantSet::new(2);
        let before = set.clone();
        assert!(!set.remove_variant(ids(&set)[0]));
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove_unknown_variant_noop() {
        let mut set = VariantSet::new(3);
        let before = set.clone();
        assert!(!set.remove_variant(Uuid::new_v4()));
        assert_eq!(set, before);
    }

    #[test]
    fn test_name_follows_position_at_creation() {
        let mut set = VariantSet::new(3);
        let b = ids(&set)[1];
        set.remove_variant(b);
        set.add_variant();
        let names: Vec<&str> = set.variants().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Variant A", "Variant C", "Variant C"]);
    }

    #[test]
    fn test_redistribute_evenly_idempotent() {
        let mut set = VariantSet::new(3);
        let first = ids(&set)[0];
        set.set_share(first, 60);
        set.redistribute_evenly();
        let once = set.shares();
        set.redistribute_evenly();
        assert_eq!(set.shares(), once);
        assert_eq!(once, vec![33, 33, 34]);
    }

    #[test]
    fn test_set_share_two_variants() {
        let mut set = VariantSet::new(2);
        let a = ids(&set)[0];
        assert!(set.set_share(a, 70));
        assert_eq!(set.shares(), vec![70, 30]);
        assert!(set.set_share(a, 5));
        assert_eq!(set.shares(), vec![10, 90]);
    }

    #[test]
    fn test_set_share_corrects_floor_drift() {
        // Spreading 47 over two others floors at 23 each and pins B at 10,
        // which would leave the total at 101 without the residual pass.
        let mut set = VariantSet::new(3);
        let a = ids(&set)[0];
        assert!(set.set_share(a, 80));
        assert_eq!(set.shares(), vec![80, 10, 10]);
        assert!(set.is_balanced());
    }

    #[test]
    fn test_set_share_downward_settles_on_largest_headroom() {
        let mut set = VariantSet::new(3);
        let a = ids(&set)[0];
        assert!(set.set_share(a, 10));
        assert_eq!(set.shares(), vec![10, 45, 45]);
    }

    #[test]
    fn test_set_share_clamps_to_feasible_ceiling() {
        let mut set = VariantSet::new(4);
        let a = ids(&set)[0];
        assert!(set.set_share(a, 90));
        assert_eq!(set.shares(), vec![70, 10, 10, 10]);
    }

    #[test]
    fn test_set_share_unknown_id_noop() {
        let mut set = VariantSet::new(2);
        let before = set.clone();
        assert!(!set.set_share(Uuid::new_v4(), 60));
        assert_eq!(set, before);
    }

    #[test]
    fn test_creative_edits() {
        let mut set = VariantSet::new(2);
        let b = ids(&set)[1];
        assert!(set.set_headline(b, "Summer drop"));
        assert!(set.set_description(b, "Limited run"));
        assert!(set.set_cta_text(b, "Shop Now"));
        let variant = set.get(b).unwrap();
        assert_eq!(variant.headline, "Summer drop");
        assert_eq!(variant.description, "Limited run");
        assert_eq!(variant.cta_text, "Shop Now");
        assert_eq!(set.shares(), vec![50, 50]);
        assert!(!set.set_headline(Uuid::new_v4(), "nope"));
    }
}
