use super::progress::{ProgressCallback, ProgressEvent};
use crate::component::Component;
use crate::error::{MixError, MixResult};
use crate::partition::Partition;
use crate::scorer::OverlapScorer;
use tracing::debug;

/// Origin score used for forced moves; any eligible pool beats it.
pub const FORCED_MOVE_SCORE: i32 = i32::MIN;

/// Identical consecutive move lists tolerated before a pass loop is declared
/// stuck in a cycle.
const COUNT_MODE_STABLE_PASSES: usize = 5;
const SIZE_MODE_STABLE_PASSES: usize = 10;

/// `(origin pool, destination pool)` for every move of one pass.
pub type MoveLog = Vec<(usize, usize)>;

/// Counts how many passes in a row repeated the previous pass's move list.
#[derive(Debug, Clone)]
pub struct CycleGuard {
    last: MoveLog,
    repeats: usize,
    limit: usize,
}

impl CycleGuard {
    pub fn new(limit: usize) -> Self {
        Self {
            last: MoveLog::new(),
            repeats: 0,
            limit,
        }
    }

    pub fn count_mode() -> Self {
        Self::new(COUNT_MODE_STABLE_PASSES)
    }

    pub fn size_mode() -> Self {
        Self::new(SIZE_MODE_STABLE_PASSES)
    }

    /// Records one pass. A pass without moves never counts as a repeat.
    pub fn record(&mut self, moves: MoveLog) {
        if !moves.is_empty() && moves == self.last {
            self.repeats += 1;
        } else {
            self.repeats = 0;
        }
        self.last = moves;
    }

    pub fn repeats(&self) -> usize {
        self.repeats
    }

    pub fn is_stuck(&self) -> bool {
        self.repeats >= self.limit
    }
}

/// Moves components towards the pool where they are most distinct from the
/// other members. Only strictly improving moves are made.
pub struct GreedyAssigner<'a> {
    components: &'a [Component],
    scorer: &'a OverlapScorer,
}

impl<'a> GreedyAssigner<'a> {
    pub fn new(components: &'a [Component], scorer: &'a OverlapScorer) -> Self {
        Self { components, scorer }
    }

    pub fn components(&self) -> &'a [Component] {
        self.components
    }

    pub fn score_in(&self, item: usize, pool: &[usize]) -> i32 {
        self.scorer.bucketed_score_in(self.components, item, pool)
    }

    /// Moves `item` out of `origin` into the best scoring other pool, if that
    /// pool scores strictly better. Pools holding `max_pool_size` members or
    /// more are not candidates. With `must_move` the origin score is ignored
    /// and the first eligible pool is accepted.
    pub fn assign_item(
        &self,
        partition: &mut Partition,
        item: usize,
        origin: usize,
        log: &mut MoveLog,
        must_move: bool,
        max_pool_size: Option<usize>,
    ) -> bool {
        let mut best_score = if must_move {
            FORCED_MOVE_SCORE
        } else {
            self.score_in(item, partition.pool(origin))
        };

        if !must_move && self.scorer.is_saturated(best_score) {
            return false;
        }

        let mut best_pool = origin;
        for (idx, pool) in partition.pools().iter().enumerate() {
            if idx == origin {
                continue;
            }
            if max_pool_size.is_some_and(|max| pool.len() >= max) {
                continue;
            }
            let score = self.score_in(item, pool);
            if score > best_score {
                best_score = score;
                best_pool = idx;
            }
        }

        if best_pool != origin && partition.move_item(item, origin, best_pool) {
            log.push((origin, best_pool));
            true
        } else {
            false
        }
    }

    /// The member with the lowest score against its own pool-mates.
    pub fn worst_member(&self, partition: &Partition, pool: usize) -> Option<usize> {
        let members = partition.pool(pool);
        let mut worst: Option<(usize, i32)> = None;
        for &item in members {
            let score = self.score_in(item, members);
            if worst.map_or(true, |(_, w)| score < w) {
                worst = Some((item, score));
            }
        }
        worst.map(|(item, _)| item)
    }

    /// One visit of every member of every pool.
    fn free_pass(&self, partition: &mut Partition, log: &mut MoveLog) -> bool {
        let mut moved = false;
        for p in 0..partition.pool_count() {
            let snapshot = partition.pool(p).to_vec();
            for item in snapshot {
                if self.assign_item(partition, item, p, log, false, None) {
                    moved = true;
                }
            }
        }
        moved
    }
}

/// A pool-building strategy, resolved once per run.
pub trait Assigner {
    fn assign(
        &self,
        greedy: &GreedyAssigner<'_>,
        progress: &dyn ProgressCallback,
    ) -> MixResult<Partition>;
}

/// A requested number of pools.
#[derive(Debug, Clone, Copy)]
pub struct FixedPoolCount {
    pub pool_count: usize,
}

/// A requested number of components per pool.
#[derive(Debug, Clone, Copy)]
pub struct FixedPoolSize {
    pub pool_size: usize,
}

pub fn check_pool_count(pool_count: usize, total: usize) -> MixResult<()> {
    if pool_count <= 1 {
        return Err(MixError::Clustering(format!(
            "When creating mixtures, you need to ask for at least two mixtures! You asked for {}.",
            pool_count
        )));
    }
    if total == 0 {
        return Err(MixError::Clustering("No components supplied".to_string()));
    }
    if pool_count > total {
        return Err(MixError::Clustering(format!(
            "Unable to generate more mixtures than components available. You supplied {} components, and asked for {} mixtures.",
            total, pool_count
        )));
    }
    Ok(())
}

pub fn check_pool_size(pool_size: usize, total: usize) -> MixResult<()> {
    if pool_size <= 1 {
        return Err(MixError::Clustering(format!(
            "When creating mixtures, you need to ask for at least two components per mixture! You asked for {}.",
            pool_size
        )));
    }
    if total == 0 {
        return Err(MixError::Clustering("No components supplied".to_string()));
    }
    if pool_size > total {
        return Err(MixError::Clustering(format!(
            "Unable to generate more components per mixture than components available. You supplied {} components, and asked for {} components per mixture.",
            total, pool_size
        )));
    }
    Ok(())
}

/// Pool count for a requested size over `placed` scoreable components.
pub fn pools_for_size(placed: usize, pool_size: usize) -> usize {
    placed.div_ceil(pool_size).max(1)
}

/// Members above `target` plus members missing below `target - 1`, summed
/// over pools. Zero when every pool holds `target - 1` or `target` members.
pub fn size_imbalance(sizes: &[usize], target: usize) -> usize {
    let low = target.saturating_sub(1);
    sizes
        .iter()
        .map(|&s| s.saturating_sub(target) + low.saturating_sub(s))
        .sum()
}

impl Assigner for FixedPoolCount {
    fn assign(
        &self,
        greedy: &GreedyAssigner<'_>,
        progress: &dyn ProgressCallback,
    ) -> MixResult<Partition> {
        let total = greedy.components().len();
        check_pool_count(self.pool_count, total)?;

        let (mut partition, placed) =
            Partition::initialise_clusters(greedy.components(), self.pool_count)?;
        debug!(
            "Initialised {} pools with {} scoreable components",
            self.pool_count, placed
        );

        // One component per pool is already the best possible split.
        if self.pool_count == total {
            return Ok(partition);
        }

        let mut guard = CycleGuard::count_mode();
        let mut iterations = 0;
        let mut moved = true;

        while moved && !guard.is_stuck() && iterations < self.pool_count {
            let mut this_moves = MoveLog::new();
            moved = greedy.free_pass(&mut partition, &mut this_moves);
            iterations += 1;

            let keep_going = progress.on_progress(&ProgressEvent::GreedyPass {
                stage: 1,
                iteration: iterations,
                moves: this_moves.len(),
            });
            guard.record(this_moves);
            if !keep_going {
                break;
            }
        }

        debug!("Greedy pool-count assignment finished after {} passes", iterations);
        Ok(partition)
    }
}

impl Assigner for FixedPoolSize {
    fn assign(
        &self,
        greedy: &GreedyAssigner<'_>,
        progress: &dyn ProgressCallback,
    ) -> MixResult<Partition> {
        let total = greedy.components().len();
        check_pool_size(self.pool_size, total)?;

        let scoreable = greedy.components().iter().filter(|c| c.has_peaks()).count();
        let pool_count = pools_for_size(scoreable, self.pool_size);
        let (mut partition, placed) =
            Partition::initialise_clusters(greedy.components(), pool_count)?;
        if placed == 0 || pool_count == 1 {
            return Ok(partition);
        }

        let target = placed.div_ceil(pool_count);
        debug!(
            "Pool-size mode: {} components, {} pools, target size {}",
            placed, pool_count, target
        );

        // Stage 1: free moves, destinations capped near the target size.
        let mut guard = CycleGuard::size_mode();
        let mut iterations = 0;
        let mut moved = true;

        while moved && !guard.is_stuck() && iterations < placed / 3 {
            let limit = if iterations > placed / 6 {
                target
            } else {
                target + 1
            };
            let mut this_moves = MoveLog::new();
            moved = false;

            for p in 0..partition.pool_count() {
                let snapshot = partition.pool(p).to_vec();
                for item in snapshot {
                    if greedy.assign_item(&mut partition, item, p, &mut this_moves, false, Some(limit)) {
                        moved = true;
                        break;
                    }
                }
            }

            iterations += 1;

            let keep_going = progress.on_progress(&ProgressEvent::GreedyPass {
                stage: 1,
                iteration: iterations,
                moves: this_moves.len(),
            });
            guard.record(this_moves);
            if !keep_going {
                return Ok(partition);
            }
        }

        // Stage 2: evict the worst member of oversized pools until every pool
        // holds target - 1 or target members.
        iterations = 0;
        while size_imbalance(&partition.pool_sizes(), target) > 0 && iterations < placed {
            let mut this_moves = MoveLog::new();

            for p in 0..partition.pool_count() {
                let len = partition.pool(p).len();
                let has_short = partition.pools().iter().any(|q| q.len() + 1 < target);

                if len > target || (has_short && len >= target) {
                    let max = if len > target { target } else { target - 1 };
                    if let Some(worst) = greedy.worst_member(&partition, p) {
                        greedy.assign_item(&mut partition, worst, p, &mut this_moves, true, Some(max));
                    }
                } else if len >= target {
                    let snapshot = partition.pool(p).to_vec();
                    for item in snapshot {
                        if greedy.assign_item(
                            &mut partition,
                            item,
                            p,
                            &mut this_moves,
                            false,
                            Some(target),
                        ) {
                            break;
                        }
                    }
                }
            }

            iterations += 1;
            if !progress.on_progress(&ProgressEvent::GreedyPass {
                stage: 2,
                iteration: iterations,
                moves: this_moves.len(),
            }) {
                break;
            }
        }

        debug!(
            "Greedy pool-size assignment finished, sizes {:?}",
            partition.pool_sizes()
        );
        Ok(partition)
    }
}
