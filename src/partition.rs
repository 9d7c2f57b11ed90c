use crate::component::{scoreable_indices, Component};
use crate::error::{MixError, MixResult};

/// Membership state of an optimization: a fixed number of pools, each an
/// ordered list of indices into the caller's component slice.
///
/// Every index appears in exactly one pool. All mutators move members, none
/// copy them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    pools: Vec<Vec<usize>>,
}

impl Partition {
    pub fn with_pool_count(pool_count: usize) -> Self {
        Self {
            pools: vec![Vec::new(); pool_count],
        }
    }

    /// Wraps prebuilt pools, rejecting any index that appears twice.
    pub fn from_pools(pools: Vec<Vec<usize>>) -> MixResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for &m in pools.iter().flatten() {
            if !seen.insert(m) {
                return Err(MixError::Validation(format!(
                    "Component #{} is assigned to more than one pool",
                    m
                )));
            }
        }
        Ok(Self { pools })
    }

    /// Round-robin distribution of the scoreable components over
    /// `pool_count` empty pools. Components without peaks are left out.
    /// Returns the partition and the number of components placed.
    pub fn initialise_clusters(components: &[Component], pool_count: usize) -> MixResult<(Self, usize)> {
        if pool_count == 0 {
            return Err(MixError::Clustering(
                "Cannot initialise zero pools".to_string(),
            ));
        }
        let mut partition = Self::with_pool_count(pool_count);
        let mut count = 0;
        for idx in scoreable_indices(components) {
            partition.pools[count % pool_count].push(idx);
            count += 1;
        }
        Ok((partition, count))
    }

    /// Order-preserving split: pool `k` receives `(n + k) / pool_count`
    /// consecutive scoreable components.
    pub fn contiguous(components: &[Component], pool_count: usize) -> MixResult<(Self, usize)> {
        if pool_count == 0 {
            return Err(MixError::Clustering(
                "Cannot initialise zero pools".to_string(),
            ));
        }
        let items = scoreable_indices(components);
        let n = items.len();
        let mut pools = Vec::with_capacity(pool_count);
        let mut start = 0;
        for k in 0..pool_count {
            let end = start + (n + k) / pool_count;
            pools.push(items[start..end].to_vec());
            start = end;
        }
        Ok((Self { pools }, n))
    }

    pub fn pools(&self) -> &[Vec<usize>] {
        &self.pools
    }

    pub fn pool(&self, idx: usize) -> &[usize] {
        &self.pools[idx]
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn item_count(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }

    pub fn pool_sizes(&self) -> Vec<usize> {
        self.pools.iter().map(Vec::len).collect()
    }

    pub fn pool_of(&self, item: usize) -> Option<usize> {
        self.pools.iter().position(|p| p.contains(&item))
    }

    /// Pops `item` from pool `from` and appends it to pool `to`.
    /// Returns `false` (and changes nothing) when `item` is not in `from`.
    pub fn move_item(&mut self, item: usize, from: usize, to: usize) -> bool {
        if from == to {
            return self.pools[from].contains(&item);
        }
        match self.pools[from].iter().position(|&m| m == item) {
            Some(pos) => {
                let moved = self.pools[from].remove(pos);
                self.pools[to].push(moved);
                true
            }
            None => false,
        }
    }

    /// Uniformly random position within pool `pool`, `None` when it is empty.
    pub fn random_member(&self, pool: usize, rng: &mut fastrand::Rng) -> Option<usize> {
        let len = self.pools[pool].len();
        if len == 0 {
            None
        } else {
            Some(rng.usize(0..len))
        }
    }

    /// Cross-swap: the member at `pos_a` of `pool_a` and the member at `pos_b`
    /// of `pool_b` trade places. Each leaves its pool and is appended to the
    /// other, so both pool sizes are unchanged.
    pub fn swap_members(&mut self, pool_a: usize, pos_a: usize, pool_b: usize, pos_b: usize) {
        let a = self.pools[pool_a].remove(pos_a);
        let b = self.pools[pool_b].remove(pos_b);
        self.pools[pool_a].push(b);
        self.pools[pool_b].push(a);
    }

    /// All members in ascending order; useful for membership checks.
    pub fn members(&self) -> Vec<usize> {
        let mut all: Vec<usize> = self.pools.iter().flatten().copied().collect();
        all.sort_unstable();
        all
    }

    pub fn into_pools(self) -> Vec<Vec<usize>> {
        self.pools
    }

    pub(crate) fn push_pool(&mut self, pool: Vec<usize>) {
        self.pools.push(pool);
    }

    pub(crate) fn pool_mut(&mut self, idx: usize) -> &mut Vec<usize> {
        &mut self.pools[idx]
    }
}
