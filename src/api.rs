use crate::component::Component;
use crate::config::Config;
use crate::error::MixResult;
use crate::loader::{resolve_mixtures, MixtureMap};
use crate::optimizer::progress::{ProgressCallback, SilentProgress};
use crate::optimizer::runner::{DesignOptions, MixtureDesigner};
use crate::scorer::Scorers;
use crate::summary::{self, MixtureDesign};

/// Service: split `components` into mixtures according to `config`.
///
/// Configuration is validated before anything is scored. `seed` makes the
/// annealing methods reproducible.
pub fn design_mixtures(components: &[Component], config: &Config, seed: Option<u64>) -> MixResult<MixtureDesign> {
    design_mixtures_with_progress(components, config, seed, &SilentProgress)
}

pub fn design_mixtures_with_progress(
    components: &[Component],
    config: &Config,
    seed: Option<u64>,
    progress: &dyn ProgressCallback,
) -> MixResult<MixtureDesign> {
    config.validate()?;
    let scorers = Scorers::from_params(&config.scoring)?;

    let designer = MixtureDesigner::new(components, scorers.clone(), DesignOptions::from(config));
    let outcome = designer.run(seed, progress)?;

    let pools = summary::summarize(components, &scorers, &outcome.partition);
    Ok(MixtureDesign {
        method: Some(config.design.method),
        mode: Some(config.design.mode),
        total_overlap: outcome.overlap_score,
        excluded: outcome
            .excluded
            .iter()
            .map(|&i| components[i].name.clone())
            .collect(),
        pools,
    })
}

/// Service: score mixtures that already exist, e.g. from an earlier run.
/// Mixture names are kept; only the scoring part of `config` is used.
pub fn evaluate_mixtures(components: &[Component], mixtures: &MixtureMap, config: &Config) -> MixResult<MixtureDesign> {
    let scorers = Scorers::from_params(&config.scoring)?;
    let resolved = resolve_mixtures(components, mixtures)?;

    let pools: Vec<_> = resolved
        .into_iter()
        .map(|(name, pool)| summary::summarize_pool(components, &scorers, name, &pool))
        .collect();

    Ok(MixtureDesign {
        method: None,
        mode: None,
        total_overlap: summary::total_overlap(&pools),
        excluded: Vec::new(),
        pools,
    })
}
