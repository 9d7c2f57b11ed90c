use mixforge::api;
use mixforge::component::Component;
use mixforge::config::{Config, Method, PoolMode};
use mixforge::scorer::{OverlapScorer, DISTANCE_EPSILON};
use proptest::prelude::*;

// --- STRATEGIES ---

prop_compose! {
    fn arb_component()(
        peaks in proptest::collection::vec(0.5..10.0f64, 0..6),
        silent in proptest::bool::weighted(0.1)
    ) -> Vec<f64> {
        if silent { Vec::new() } else { peaks }
    }
}

prop_compose! {
    fn arb_library()(
        peak_lists in proptest::collection::vec(arb_component(), 2..25)
    ) -> Vec<Component> {
        peak_lists
            .into_iter()
            .enumerate()
            .map(|(i, p)| Component::new(format!("c{}", i), p))
            .collect()
    }
}

fn arb_method() -> impl Strategy<Value = Method> {
    prop_oneof![
        Just(Method::Greedy),
        Just(Method::Annealing),
        Just(Method::Refined),
    ]
}

fn configured(mode: PoolMode, n: usize, method: Method) -> Config {
    let mut cfg = Config::default();
    cfg.design.mode = mode;
    cfg.design.n = n;
    cfg.design.method = method;
    cfg.anneal.max_steps = 200;
    cfg
}

fn scoreable_names(comps: &[Component]) -> Vec<String> {
    let mut names: Vec<String> = comps
        .iter()
        .filter(|c| c.has_peaks())
        .map(|c| c.name.clone())
        .collect();
    names.sort();
    names
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pool_count_mode_keeps_membership(
        comps in arb_library(),
        n_seed in 0usize..100,
        method in arb_method(),
        seed in any::<u64>()
    ) {
        let n = 2 + n_seed % (comps.len() - 1);
        let cfg = configured(PoolMode::Mixtures, n, method);
        let design = api::design_mixtures(&comps, &cfg, Some(seed)).unwrap();

        prop_assert_eq!(design.pools.len(), n);

        let mut placed: Vec<String> = design
            .pools
            .iter()
            .flat_map(|p| p.components.iter().map(|c| c.name.clone()))
            .collect();
        placed.sort();
        prop_assert_eq!(placed, scoreable_names(&comps));
    }

    #[test]
    fn prop_pool_size_mode_balances(
        comps in arb_library(),
        size_seed in 0usize..100,
        seed in any::<u64>()
    ) {
        let size = 2 + size_seed % (comps.len() - 1);
        let cfg = configured(PoolMode::ComponentsPerMixture, size, Method::Greedy);
        let design = api::design_mixtures(&comps, &cfg, Some(seed)).unwrap();

        let expected = scoreable_names(&comps);
        let mut placed: Vec<String> = design
            .pools
            .iter()
            .flat_map(|p| p.components.iter().map(|c| c.name.clone()))
            .collect();
        placed.sort();
        prop_assert_eq!(&placed, &expected);

        if expected.len() > 1 {
            let pools = design.pools.len();
            let target = expected.len().div_ceil(pools);
            let sizes: Vec<usize> = design.pools.iter().map(|p| p.components.len()).collect();
            prop_assert!(
                sizes.iter().all(|&s| s + 1 >= target && s <= target + 1),
                "sizes {:?} target {}",
                sizes,
                target
            );
        }
    }

    #[test]
    fn prop_raw_distance_is_floored(
        a in proptest::collection::vec(0.5..10.0f64, 1..12),
        b in proptest::collection::vec(0.5..10.0f64, 1..12)
    ) {
        let scorer = OverlapScorer::default();
        let ca = Component::new("a", a);
        let cb = Component::new("b", b);
        let d = scorer.raw_distance(&ca, [&cb]).unwrap();
        prop_assert!(d >= DISTANCE_EPSILON);
        prop_assert!(d <= 9.5);
    }
}
