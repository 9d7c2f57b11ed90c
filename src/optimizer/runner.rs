use super::anneal::{AnnealingOptimizer, AnnealingOptions};
use super::first_fit::first_fit;
use super::greedy::{
    check_pool_count, check_pool_size, pools_for_size, Assigner, FixedPoolCount, FixedPoolSize,
    GreedyAssigner,
};
use super::progress::ProgressCallback;
use crate::component::Component;
use crate::config::{Config, Method, PoolMode};
use crate::error::{MixError, MixResult};
use crate::partition::Partition;
use crate::scorer::Scorers;
use tracing::info;

pub struct DesignOptions {
    pub mode: PoolMode,
    pub n: usize,
    pub method: Method,
    pub anneal: AnnealingOptions,
}

impl From<&Config> for DesignOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            mode: cfg.design.mode,
            n: cfg.design.n,
            method: cfg.design.method,
            anneal: AnnealingOptions::from(&cfg.anneal),
        }
    }
}

pub struct DesignOutcome {
    pub partition: Partition,
    /// Components left out for lack of peaks, as input indices.
    pub excluded: Vec<usize>,
    /// Pairwise overlap total of the final partition.
    pub overlap_score: f64,
}

/// Resolves mode and method once, then runs the chosen pipeline.
pub struct MixtureDesigner<'a> {
    components: &'a [Component],
    scorers: Scorers,
    options: DesignOptions,
}

impl<'a> MixtureDesigner<'a> {
    pub fn new(components: &'a [Component], scorers: Scorers, options: DesignOptions) -> Self {
        Self {
            components,
            scorers,
            options,
        }
    }

    fn assigner(&self) -> Box<dyn Assigner> {
        match self.options.mode {
            PoolMode::Mixtures => Box::new(FixedPoolCount {
                pool_count: self.options.n,
            }),
            PoolMode::ComponentsPerMixture => Box::new(FixedPoolSize {
                pool_size: self.options.n,
            }),
        }
    }

    /// Pool count used by the annealing-only pipeline.
    fn annealing_pool_count(&self) -> MixResult<usize> {
        let total = self.components.len();
        match self.options.mode {
            PoolMode::Mixtures => {
                check_pool_count(self.options.n, total)?;
                Ok(self.options.n)
            }
            PoolMode::ComponentsPerMixture => {
                check_pool_size(self.options.n, total)?;
                let scoreable = self.components.iter().filter(|c| c.has_peaks()).count();
                Ok(pools_for_size(scoreable, self.options.n))
            }
        }
    }

    pub fn run(&self, seed: Option<u64>, progress: &dyn ProgressCallback) -> MixResult<DesignOutcome> {
        let mut rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };

        let greedy = GreedyAssigner::new(self.components, &self.scorers.distance);
        let annealer = AnnealingOptimizer::new(
            self.components,
            self.scorers.overlap,
            self.options.anneal.clone(),
        );

        info!(
            "Designing mixtures: {} components, mode {}, n = {}, method {}",
            self.components.len(),
            self.options.mode,
            self.options.n,
            self.options.method
        );

        let partition = match self.options.method {
            Method::Greedy => self.assigner().assign(&greedy, progress)?,
            Method::Annealing => {
                let pool_count = self.annealing_pool_count()?;
                let (start, _) = Partition::contiguous(self.components, pool_count)?;
                annealer.iterate(&start, &mut rng, progress).partition
            }
            Method::Refined => {
                let start = self.assigner().assign(&greedy, progress)?;
                let outcome = annealer.iterate(&start, &mut rng, progress);
                info!(
                    "Annealing refinement: {} runs, {} steps, {} accepted",
                    outcome.runs, outcome.steps, outcome.accepted
                );
                outcome.partition
            }
            Method::FirstFit => match self.options.mode {
                PoolMode::ComponentsPerMixture => {
                    first_fit(self.components, &self.scorers.overlap, self.options.n)?
                }
                PoolMode::Mixtures => {
                    return Err(MixError::Config(
                        "first-fit packing takes a pool size; use --mode nComponentsPerMixture"
                            .to_string(),
                    ))
                }
            },
        };

        let excluded = self
            .components
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.has_peaks())
            .map(|(i, _)| i)
            .collect();
        let overlap_score = self.scorers.overlap.total_score(self.components, &partition);

        info!(
            "Designed {} mixtures, sizes {:?}, overlap {:.3}",
            partition.pool_count(),
            partition.pool_sizes(),
            overlap_score
        );

        Ok(DesignOutcome {
            partition,
            excluded,
            overlap_score,
        })
    }
}
