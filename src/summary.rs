use crate::component::Component;
use crate::config::{Method, PoolMode};
use crate::partition::Partition;
use crate::scorer::Scorers;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScore {
    pub name: String,
    /// Bucketed distinctness against the pool-mates.
    pub score: i32,
    pub overlapped_peaks: Vec<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MixtureSummary {
    pub name: String,
    pub components: Vec<ComponentScore>,
    pub min_score: Option<i32>,
    pub average_score: Option<f64>,
    pub overlap_score: f64,
}

impl MixtureSummary {
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name.as_str()).collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MixtureDesign {
    pub method: Option<Method>,
    pub mode: Option<PoolMode>,
    pub pools: Vec<MixtureSummary>,
    pub excluded: Vec<String>,
    pub total_overlap: f64,
}

pub fn mixture_name(idx: usize) -> String {
    format!("Mixture-{}", idx + 1)
}

/// Scores one pool. `name` is the label shown in reports.
pub fn summarize_pool(
    components: &[Component],
    scorers: &Scorers,
    name: String,
    pool: &[usize],
) -> MixtureSummary {
    let members: Vec<ComponentScore> = pool
        .iter()
        .map(|&item| ComponentScore {
            name: components[item].name.clone(),
            score: scorers.distance.bucketed_score_in(components, item, pool),
            overlapped_peaks: scorers.overlap.overlapped_peaks(components, item, pool),
        })
        .collect();

    let min_score = members.iter().map(|m| m.score).min();
    let average_score = if members.is_empty() {
        None
    } else {
        Some(members.iter().map(|m| m.score as f64).sum::<f64>() / members.len() as f64)
    };

    MixtureSummary {
        name,
        components: members,
        min_score,
        average_score,
        overlap_score: scorers.overlap.score_pool(components, pool),
    }
}

/// Summaries for every pool, computed in parallel. Pools are named
/// `Mixture-1`, `Mixture-2`, ... in partition order.
pub fn summarize(components: &[Component], scorers: &Scorers, partition: &Partition) -> Vec<MixtureSummary> {
    partition
        .pools()
        .par_iter()
        .enumerate()
        .map(|(i, pool)| summarize_pool(components, scorers, mixture_name(i), pool))
        .collect()
}

pub fn total_overlap(pools: &[MixtureSummary]) -> f64 {
    pools.iter().map(|p| p.overlap_score).sum()
}
