use super::cooling::{Cooling, CoolingPolicy};
use super::progress::{ProgressCallback, ProgressEvent};
use crate::component::Component;
use crate::partition::Partition;
use crate::scorer::OverlapCounter;
use tracing::debug;

/// Steps between two progress checkpoints inside one annealing run.
const CHECKPOINT_INTERVAL: usize = 100;

#[derive(Debug, Clone)]
pub struct AnnealingOptions {
    pub start_temp: f64,
    pub final_temp: f64,
    pub max_steps: usize,
    /// Sharpness of the acceptance curve.
    pub temp_k: f64,
    pub cooling: CoolingPolicy,
    pub iterations: usize,
}

impl Default for AnnealingOptions {
    fn default() -> Self {
        Self {
            start_temp: 1000.0,
            final_temp: 0.01,
            max_steps: 1000,
            temp_k: 200.0,
            cooling: CoolingPolicy::default(),
            iterations: 1,
        }
    }
}

impl From<&crate::config::AnnealParams> for AnnealingOptions {
    fn from(p: &crate::config::AnnealParams) -> Self {
        Self {
            start_temp: p.start_temp,
            final_temp: p.final_temp,
            max_steps: p.max_steps,
            temp_k: p.temp_k,
            cooling: CoolingPolicy::resolve(&p.cooling),
            iterations: p.iterations,
        }
    }
}

/// Probability of accepting a move that worsens the score by `delta`.
/// Zero (or negative) temperature never accepts.
pub fn acceptance_probability(delta: f64, temperature: f64, temp_k: f64) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    (-delta * temp_k / temperature).exp()
}

/// Two members trading pools. Positions refer to the pools before the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMove {
    pub pool_a: usize,
    pub pos_a: usize,
    pub pool_b: usize,
    pub pos_b: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Score reached zero; the run ends on this state.
    Perfect,
    Accepted,
    Rejected,
}

/// Mutable state of one annealing run: the current partition with its
/// per-pool scores, and a snapshot of the best partition seen.
#[derive(Debug, Clone)]
pub struct AnnealingState<'a> {
    components: &'a [Component],
    counter: OverlapCounter,
    current: Partition,
    pool_scores: Vec<f64>,
    score: f64,
    best: Partition,
    best_score: f64,
    step: usize,
    accepted: usize,
}

impl<'a> AnnealingState<'a> {
    pub fn new(components: &'a [Component], counter: OverlapCounter, start: Partition) -> Self {
        let pool_scores = counter.pool_scores(components, &start);
        let score = pool_scores.iter().sum();
        Self {
            components,
            counter,
            best: start.clone(),
            current: start,
            pool_scores,
            score,
            best_score: score,
            step: 0,
            accepted: 0,
        }
    }

    pub fn current(&self) -> &Partition {
        &self.current
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn best(&self) -> &Partition {
        &self.best
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn steps(&self) -> usize {
        self.step
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Picks two distinct non-empty pools uniformly and a uniform member of
    /// each. `None` when fewer than two pools hold members.
    pub fn propose(&self, rng: &mut fastrand::Rng) -> Option<SwapMove> {
        let candidates: Vec<usize> = (0..self.current.pool_count())
            .filter(|&p| !self.current.pool(p).is_empty())
            .collect();
        if candidates.len() < 2 {
            return None;
        }
        let i = rng.usize(0..candidates.len());
        let mut j = rng.usize(0..candidates.len() - 1);
        if j >= i {
            j += 1;
        }
        let pool_a = candidates[i];
        let pool_b = candidates[j];
        Some(SwapMove {
            pool_a,
            pos_a: self.current.random_member(pool_a, rng)?,
            pool_b,
            pos_b: self.current.random_member(pool_b, rng)?,
        })
    }

    /// Scores of the two touched pools after applying `mv`.
    fn rescore(&self, mv: &SwapMove) -> (f64, f64) {
        let a = self.current.pool(mv.pool_a);
        let b = self.current.pool(mv.pool_b);
        let item_a = a[mv.pos_a];
        let item_b = b[mv.pos_b];

        let mut new_a: Vec<usize> = a.iter().copied().filter(|&m| m != item_a).collect();
        new_a.push(item_b);
        let mut new_b: Vec<usize> = b.iter().copied().filter(|&m| m != item_b).collect();
        new_b.push(item_a);

        (
            self.counter.score_pool(self.components, &new_a),
            self.counter.score_pool(self.components, &new_b),
        )
    }

    /// Sum of the pool scores with the two touched pools replaced.
    fn total_with(&self, mv: &SwapMove, sa: f64, sb: f64) -> f64 {
        self.pool_scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                if i == mv.pool_a {
                    sa
                } else if i == mv.pool_b {
                    sb
                } else {
                    s
                }
            })
            .sum()
    }

    /// Total score the partition would have after `mv`.
    pub fn score_after(&self, mv: &SwapMove) -> f64 {
        let (sa, sb) = self.rescore(mv);
        self.total_with(mv, sa, sb)
    }

    /// Metropolis decision for `mv` at `temperature`; applies it on acceptance.
    pub fn consider(
        &mut self,
        mv: &SwapMove,
        temperature: f64,
        temp_k: f64,
        rng: &mut fastrand::Rng,
    ) -> Acceptance {
        self.step += 1;
        let (sa, sb) = self.rescore(mv);
        let new_score = self.total_with(mv, sa, sb);

        let outcome = if new_score == 0.0 {
            Acceptance::Perfect
        } else if new_score <= self.score {
            Acceptance::Accepted
        } else if rng.f64() < acceptance_probability(new_score - self.score, temperature, temp_k) {
            Acceptance::Accepted
        } else {
            Acceptance::Rejected
        };

        if outcome != Acceptance::Rejected {
            self.current
                .swap_members(mv.pool_a, mv.pos_a, mv.pool_b, mv.pos_b);
            self.pool_scores[mv.pool_a] = sa;
            self.pool_scores[mv.pool_b] = sb;
            self.score = new_score;
            self.accepted += 1;
            if self.score <= self.best_score {
                self.best_score = self.score;
                self.best = self.current.clone();
            }
        }
        outcome
    }

    pub fn into_best(self) -> (Partition, f64) {
        (self.best, self.best_score)
    }
}

#[derive(Debug, Clone)]
pub struct AnnealOutcome {
    pub partition: Partition,
    pub score: f64,
    pub steps: usize,
    pub accepted: usize,
    pub runs: usize,
}

/// Simulated annealing over pool memberships using the pairwise overlap
/// count as objective and a two-member cross swap as neighbourhood move.
pub struct AnnealingOptimizer<'a> {
    components: &'a [Component],
    counter: OverlapCounter,
    options: AnnealingOptions,
}

impl<'a> AnnealingOptimizer<'a> {
    pub fn new(components: &'a [Component], counter: OverlapCounter, options: AnnealingOptions) -> Self {
        Self {
            components,
            counter,
            options,
        }
    }

    pub fn options(&self) -> &AnnealingOptions {
        &self.options
    }

    pub fn total_score(&self, partition: &Partition) -> f64 {
        self.counter.total_score(self.components, partition)
    }

    fn schedule(&self) -> Cooling {
        Cooling::for_policy(
            self.options.cooling,
            self.options.start_temp,
            self.options.final_temp,
            self.options.max_steps,
        )
    }

    /// One cooling run starting from `start`. Returns the best partition
    /// seen, which is `start` itself when nothing better was accepted.
    pub fn anneal(
        &self,
        start: &Partition,
        run: usize,
        rng: &mut fastrand::Rng,
        progress: &dyn ProgressCallback,
    ) -> AnnealOutcome {
        let mut state = AnnealingState::new(self.components, self.counter, start.clone());
        if state.score() == 0.0 {
            return AnnealOutcome {
                partition: start.clone(),
                score: 0.0,
                steps: 0,
                accepted: 0,
                runs: 1,
            };
        }

        let schedule = self.schedule();
        let floor = schedule.final_temp_floor();
        let max_steps = self.options.max_steps;

        for temperature in schedule.take(max_steps) {
            if matches!(floor, Some(f) if temperature <= f) {
                break;
            }
            let mv = match state.propose(rng) {
                Some(mv) => mv,
                None => break,
            };
            let outcome = state.consider(&mv, temperature, self.options.temp_k, rng);
            if outcome == Acceptance::Perfect {
                debug!("Run {} reached a perfect split at step {}", run, state.steps());
                let steps = state.steps();
                let accepted = state.accepted();
                return AnnealOutcome {
                    partition: state.current().clone(),
                    score: 0.0,
                    steps,
                    accepted,
                    runs: 1,
                };
            }

            if state.steps() % CHECKPOINT_INTERVAL == 0
                && !progress.on_progress(&ProgressEvent::AnnealCheckpoint {
                    run,
                    step: state.steps(),
                    temperature,
                    score: state.score(),
                    best: state.best_score(),
                })
            {
                break;
            }
        }

        let steps = state.steps();
        let accepted = state.accepted();
        let (partition, score) = state.into_best();
        AnnealOutcome {
            partition,
            score,
            steps,
            accepted,
            runs: 1,
        }
    }

    /// Repeats whole annealing runs, each starting from the best partition
    /// found so far. Stops early on a perfect split; returns `start`
    /// unchanged when no run improved on it.
    pub fn iterate(
        &self,
        start: &Partition,
        rng: &mut fastrand::Rng,
        progress: &dyn ProgressCallback,
    ) -> AnnealOutcome {
        let starting_score = self.total_score(start);
        let mut best = AnnealOutcome {
            partition: start.clone(),
            score: starting_score,
            steps: 0,
            accepted: 0,
            runs: 0,
        };
        if starting_score == 0.0 {
            return best;
        }

        for run in 1..=self.options.iterations.max(1) {
            let outcome = self.anneal(&best.partition, run, rng, progress);
            best.steps += outcome.steps;
            best.accepted += outcome.accepted;
            best.runs = run;

            debug!(
                "Annealing run {} finished: {:.3} (best so far {:.3})",
                run, outcome.score, best.score
            );
            if outcome.score < best.score {
                best.partition = outcome.partition;
                best.score = outcome.score;
            }

            let keep_going = progress.on_progress(&ProgressEvent::AnnealRunFinished {
                run,
                best: best.score,
            });
            if best.score == 0.0 || !keep_going {
                break;
            }
        }

        if best.score >= starting_score {
            debug!("No better iteration found, starting mixtures are returned");
            best.partition = start.clone();
            best.score = starting_score;
        }
        best
    }
}

