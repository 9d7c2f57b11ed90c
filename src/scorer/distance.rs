use super::levels::LevelTable;
use crate::component::Component;

/// Floor applied to every resolved distance so that coincident peaks still
/// compare as "some" distance rather than none.
pub const DISTANCE_EPSILON: f64 = 1e-7;

/// Quantifies how distinguishable one component is from its pool-mates.
///
/// The distance is asymmetric: for each of the component's leading peaks the
/// nearest peak of any other member is found, and the worst of those nearest
/// matches is reported. Pure and `Sync`, so it can be shared across threads.
#[derive(Debug, Clone)]
pub struct OverlapScorer {
    pub peak_cap: usize,
    pub levels: LevelTable,
    /// Bucket meaning "already resolved, do not bother moving".
    pub saturation_bucket: i32,
}

impl Default for OverlapScorer {
    fn default() -> Self {
        Self {
            peak_cap: 10,
            levels: LevelTable::default(),
            saturation_bucket: 5,
        }
    }
}

impl OverlapScorer {
    pub fn new(peak_cap: usize, levels: LevelTable, saturation_bucket: i32) -> Self {
        Self {
            peak_cap,
            levels,
            saturation_bucket,
        }
    }

    /// Distance from `item`'s worst resolved peak to its best match among
    /// `others`. `others` may contain `item` itself; it is skipped.
    pub fn raw_distance<'a, I>(&self, item: &Component, others: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a Component>,
    {
        let own = item.leading_peaks(self.peak_cap)?;

        let mut nearest = vec![f64::INFINITY; own.len()];
        let mut compared = false;

        for other in others {
            if std::ptr::eq(other, item) || !other.has_peaks() {
                continue;
            }
            compared = true;
            for (slot, &a) in nearest.iter_mut().zip(own) {
                for &b in other.peaks() {
                    let d = (a - b).abs();
                    if d < *slot {
                        *slot = d;
                    }
                }
            }
        }

        if !compared {
            return None;
        }

        let worst = nearest.into_iter().fold(f64::NEG_INFINITY, f64::max);
        Some(worst.max(DISTANCE_EPSILON))
    }

    /// Same as [`raw_distance`](Self::raw_distance) over index membership.
    /// The member at `item` is excluded from its own comparison.
    pub fn raw_distance_in(
        &self,
        components: &[Component],
        item: usize,
        pool: &[usize],
    ) -> Option<f64> {
        self.raw_distance(
            &components[item],
            pool.iter().filter(|&&m| m != item).map(|&m| &components[m]),
        )
    }

    pub fn bucketed_score<'a, I>(&self, item: &Component, others: I) -> i32
    where
        I: IntoIterator<Item = &'a Component>,
    {
        match self.raw_distance(item, others) {
            Some(d) => self.levels.bucket(d),
            None => 0,
        }
    }

    /// Bucketed score of `item` against the other members of `pool`.
    ///
    /// A scoreable item with no pool-mates at all cannot overlap anything and
    /// takes the table's top bucket. Pool-mates that all lack peaks give 0.
    pub fn bucketed_score_in(&self, components: &[Component], item: usize, pool: &[usize]) -> i32 {
        if pool.iter().all(|&m| m == item) && components[item].leading_peaks(self.peak_cap).is_some() {
            return self.levels.max_bucket();
        }
        match self.raw_distance_in(components, item, pool) {
            Some(d) => self.levels.bucket(d),
            None => 0,
        }
    }

    pub fn is_saturated(&self, score: i32) -> bool {
        score == self.saturation_bucket
    }
}
