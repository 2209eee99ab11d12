use creator_ads::allocator::{VariantSet, MAX_SHARE, MAX_VARIANTS, MIN_SHARE, MIN_VARIANTS};
use proptest::prelude::*;
use proptest::test_runner::Config;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(usize),
    Redistribute,
    SetShare(usize, u32),
}

fn structural_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0_usize..8).prop_map(Op::Remove),
        Just(Op::Redistribute),
    ]
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0_usize..8).prop_map(Op::Remove),
        Just(Op::Redistribute),
        ((0_usize..8), (0_u32..=120)).prop_map(|(i, v)| Op::SetShare(i, v)),
    ]
}

fn apply(set: &mut VariantSet, op: &Op) {
    let ids: Vec<_> = set.variants().iter().map(|v| v.id).collect();
    match op {
        Op::Add => {
            set.add_variant();
        }
        Op::Remove(i) => {
            set.remove_variant(ids[i % ids.len()]);
        }
        Op::Redistribute => set.redistribute_evenly(),
        Op::SetShare(i, value) => {
            set.set_share(ids[i % ids.len()], *value);
        }
    }
}

fn assert_invariants(set: &VariantSet) -> Result<(), TestCaseError> {
    prop_assert!(set.len() >= MIN_VARIANTS && set.len() <= MAX_VARIANTS);
    prop_assert_eq!(set.total_percent(), 100);
    for share in set.shares() {
        prop_assert!((MIN_SHARE..=MAX_SHARE).contains(&share), "share {} out of bounds", share);
    }
    Ok(())
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn structural_ops_keep_sum_and_bounds(ops in prop::collection::vec(structural_op(), 0..40)) {
        let mut set = VariantSet::new(2);
        assert_invariants(&set)?;
        for op in &ops {
            apply(&mut set, op);
            assert_invariants(&set)?;
        }
    }

    #[test]
    fn slider_drags_conserve_total_exactly(ops in prop::collection::vec(any_op(), 0..60)) {
        let mut set = VariantSet::new(2);
        for op in &ops {
            apply(&mut set, op);
            assert_invariants(&set)?;
        }
    }

    #[test]
    fn set_share_hits_requested_value_when_feasible(
        count in MIN_VARIANTS..=MAX_VARIANTS,
        target in 0_usize..4,
        value in MIN_SHARE..=MAX_SHARE,
    ) {
        let mut set = VariantSet::new(count);
        let id = set.variants()[target % count].id;
        set.set_share(id, value);
        let ceiling = 100 - MIN_SHARE * (count as u32 - 1);
        let expected = value.min(ceiling);
        prop_assert_eq!(set.get(id).map(|v| v.budget_percent), Some(expected));
        assert_invariants(&set)?;
    }

    #[test]
    fn redistribute_is_idempotent(ops in prop::collection::vec(any_op(), 0..30)) {
        let mut set = VariantSet::new(2);
        for op in &ops {
            apply(&mut set, op);
        }
        set.redistribute_evenly();
        let once = set.clone();
        set.redistribute_evenly();
        prop_assert_eq!(set, once);
    }

    #[test]
    fn cardinality_ops_are_noops_at_limits(extra_adds in 0_usize..6) {
        let mut full = VariantSet::new(MAX_VARIANTS);
        for _ in 0..extra_adds {
            prop_assert!(full.add_variant().is_none());
        }
        prop_assert_eq!(full.len(), MAX_VARIANTS);

        let mut minimal = VariantSet::new(MIN_VARIANTS);
        let before = minimal.clone();
        let id = minimal.variants()[0].id;
        prop_assert!(!minimal.remove_variant(id));
        prop_assert_eq!(minimal, before);
    }
}
