use super::greedy::check_pool_size;
use crate::component::{scoreable_indices, Component};
use crate::error::MixResult;
use crate::partition::Partition;
use crate::scorer::OverlapCounter;
use tracing::debug;

/// Packs components in input order: each one joins the first pool that has
/// room and whose overlap score is unchanged by the addition. A new pool is
/// opened when no such pool exists, so the pool count is an output.
pub fn first_fit(
    components: &[Component],
    counter: &OverlapCounter,
    max_pool_size: usize,
) -> MixResult<Partition> {
    check_pool_size(max_pool_size, components.len())?;

    let mut partition = Partition::default();
    let mut pool_scores: Vec<f64> = Vec::new();

    for item in scoreable_indices(components) {
        let mut placed = false;
        for p in 0..partition.pool_count() {
            if partition.pool(p).len() >= max_pool_size {
                continue;
            }
            let mut trial = partition.pool(p).to_vec();
            trial.push(item);
            let trial_score = counter.score_pool(components, &trial);
            if trial_score <= pool_scores[p] {
                partition.pool_mut(p).push(item);
                pool_scores[p] = trial_score;
                placed = true;
                break;
            }
        }
        if !placed {
            partition.push_pool(vec![item]);
            pool_scores.push(0.0);
        }
    }

    debug!(
        "First-fit packed {} components into {} pools",
        partition.item_count(),
        partition.pool_count()
    );
    Ok(partition)
}

