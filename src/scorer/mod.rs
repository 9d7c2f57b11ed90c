pub mod distance;
pub mod levels;
pub mod overlap;

pub use self::distance::{OverlapScorer, DISTANCE_EPSILON};
pub use self::levels::{Level, LevelTable};
pub use self::overlap::OverlapCounter;

use crate::config::ScoringParams;
use crate::error::MixResult;

/// Both scoring views built from one configuration block.
#[derive(Debug, Clone)]
pub struct Scorers {
    pub distance: OverlapScorer,
    pub overlap: OverlapCounter,
}

impl Scorers {
    pub fn from_params(params: &ScoringParams) -> MixResult<Self> {
        let levels = params.level_table()?;
        Ok(Self {
            distance: OverlapScorer::new(params.peak_cap, levels, params.saturation_bucket),
            overlap: OverlapCounter::new(params.min_distance, params.score_scale),
        })
    }
}

impl Default for Scorers {
    fn default() -> Self {
        Self {
            distance: OverlapScorer::default(),
            overlap: OverlapCounter::default(),
        }
    }
}
