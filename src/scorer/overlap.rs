use crate::component::Component;
use crate::partition::Partition;

/// Continuous objective used by the annealer: counts peak pairs closer than
/// `min_distance` ppm, normalized by the first component's peak count.
#[derive(Debug, Clone, Copy)]
pub struct OverlapCounter {
    pub min_distance: f64,
    pub scale: f64,
}

impl Default for OverlapCounter {
    fn default() -> Self {
        Self {
            min_distance: 0.01,
            scale: 1.0,
        }
    }
}

impl OverlapCounter {
    pub fn new(min_distance: f64, scale: f64) -> Self {
        Self {
            min_distance,
            scale,
        }
    }

    pub fn score_compound(&self, a: &Component, b: &Component) -> f64 {
        let peaks_a = a.peaks();
        if peaks_a.is_empty() {
            return 0.0;
        }
        let mut overlaps = 0usize;
        for &pa in peaks_a {
            for &pb in b.peaks() {
                if (pa - pb).abs() < self.min_distance {
                    overlaps += 1;
                }
            }
        }
        self.scale * (overlaps as f64 / peaks_a.len() as f64)
    }

    /// Sum over ordered pairs of distinct members.
    pub fn score_pool(&self, components: &[Component], pool: &[usize]) -> f64 {
        let mut score = 0.0;
        for (i, &a) in pool.iter().enumerate() {
            for (j, &b) in pool.iter().enumerate() {
                if i != j {
                    score += self.score_compound(&components[a], &components[b]);
                }
            }
        }
        score
    }

    pub fn pool_scores(&self, components: &[Component], partition: &Partition) -> Vec<f64> {
        partition
            .pools()
            .iter()
            .map(|pool| self.score_pool(components, pool))
            .collect()
    }

    pub fn total_score(&self, components: &[Component], partition: &Partition) -> f64 {
        self.pool_scores(components, partition).into_iter().sum()
    }

    /// `item`'s own peak positions lying within the tolerance (inclusive) of
    /// any peak of another member of `pool`.
    pub fn overlapped_peaks(&self, components: &[Component], item: usize, pool: &[usize]) -> Vec<f64> {
        let own = components[item].peaks();
        own.iter()
            .copied()
            .filter(|&pa| {
                pool.iter().filter(|&&m| m != item).any(|&m| {
                    components[m]
                        .peaks()
                        .iter()
                        .any(|&pb| (pa - pb).abs() <= self.min_distance)
                })
            })
            .collect()
    }
}
