use mixforge::component::Component;
use mixforge::error::MixError;
use mixforge::partition::Partition;

fn library(peaks: &[&[f64]]) -> Vec<Component> {
    peaks
        .iter()
        .enumerate()
        .map(|(i, p)| Component::new(format!("c{}", i), p.to_vec()))
        .collect()
}

#[test]
fn test_initialise_round_robin_skips_unscoreable() {
    let comps = library(&[&[1.0], &[], &[2.0], &[0.0], &[3.0], &[4.0]]);
    let (p, placed) = Partition::initialise_clusters(&comps, 2).unwrap();
    assert_eq!(placed, 4);
    assert_eq!(p.pools(), &[vec![0, 4], vec![2, 5]]);
    assert_eq!(p.members(), vec![0, 2, 4, 5]);
}

#[test]
fn test_initialise_uses_every_pool() {
    let comps = library(&[&[1.0], &[2.0], &[3.0]]);
    let (p, _) = Partition::initialise_clusters(&comps, 3).unwrap();
    assert_eq!(p.pool_sizes(), vec![1, 1, 1]);
}

#[test]
fn test_initialise_zero_pools_is_an_error() {
    let comps = library(&[&[1.0]]);
    let err = Partition::initialise_clusters(&comps, 0).unwrap_err();
    assert!(matches!(err, MixError::Clustering(_)));
}

#[test]
fn test_contiguous_split_preserves_order() {
    let comps = library(&[&[1.0], &[2.0], &[3.0], &[4.0], &[5.0], &[6.0], &[7.0]]);
    let (p, placed) = Partition::contiguous(&comps, 3).unwrap();
    assert_eq!(placed, 7);
    assert_eq!(p.pools(), &[vec![0, 1], vec![2, 3], vec![4, 5, 6]]);
}

#[test]
fn test_move_item() {
    let mut p = Partition::from_pools(vec![vec![0, 1], vec![2]]).unwrap();
    assert!(p.move_item(0, 0, 1));
    assert_eq!(p.pools(), &[vec![1], vec![2, 0]]);
    assert_eq!(p.pool_of(0), Some(1));

    // not a member of the origin
    assert!(!p.move_item(0, 0, 1));
    assert_eq!(p.pools(), &[vec![1], vec![2, 0]]);
}

#[test]
fn test_from_pools_rejects_duplicates() {
    let err = Partition::from_pools(vec![vec![0, 1], vec![1]]).unwrap_err();
    assert!(matches!(err, MixError::Validation(_)));
}

#[test]
fn test_swap_members_keeps_sizes() {
    let mut p = Partition::from_pools(vec![vec![0, 1, 2], vec![3, 4]]).unwrap();
    p.swap_members(0, 1, 1, 0);
    assert_eq!(p.pools(), &[vec![0, 2, 3], vec![4, 1]]);
    assert_eq!(p.pool_sizes(), vec![3, 2]);
    assert_eq!(p.members(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_random_member_is_uniform_over_positions() {
    let p = Partition::from_pools(vec![vec![10, 11, 12, 13], vec![]]).unwrap();
    let mut rng = fastrand::Rng::with_seed(7);
    let mut hits = [0usize; 4];
    for _ in 0..4000 {
        let pos = p.random_member(0, &mut rng).unwrap();
        hits[pos] += 1;
    }
    for h in hits {
        assert!(h > 800 && h < 1200, "position drawn {} times", h);
    }
    assert_eq!(p.random_member(1, &mut rng), None);
}

#[test]
fn test_snapshots_do_not_alias() {
    let mut current = Partition::from_pools(vec![vec![0], vec![1]]).unwrap();
    let best = current.clone();
    current.swap_members(0, 0, 1, 0);
    assert_ne!(current, best);
    assert_eq!(best.pools(), &[vec![0], vec![1]]);
}
