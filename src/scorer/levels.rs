use crate::error::{MixError, MixResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEVELS: &str =
    "0.50:10,0.40:9,0.30:8,0.20:7,0.18:6,0.15:5,0.10:4,0.08:3,0.06:2,0.04:1,0.02:0";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub threshold_ppm: f64,
    pub bucket: i32,
}

/// Quantizes a ppm distance onto a small integer scale. Levels are kept
/// sorted by descending threshold; the first threshold the distance exceeds
/// wins. A distance equal to the lowest threshold takes the lowest bucket,
/// anything below it lands in `floor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: Vec<Level>,
    floor: i32,
}

impl LevelTable {
    pub fn new(mut levels: Vec<Level>, floor: i32) -> MixResult<Self> {
        if levels.is_empty() {
            return Err(MixError::Config("Level table is empty".to_string()));
        }
        if levels.iter().any(|l| !l.threshold_ppm.is_finite()) {
            return Err(MixError::Config(
                "Level thresholds must be finite".to_string(),
            ));
        }
        levels.sort_by(|a, b| b.threshold_ppm.total_cmp(&a.threshold_ppm));
        Ok(Self { levels, floor })
    }

    /// Parses `"threshold:bucket,threshold:bucket,..."`.
    pub fn parse(table: &str, floor: i32) -> MixResult<Self> {
        let mut levels = Vec::new();
        for part in table.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (t, b) = part.split_once(':').ok_or_else(|| {
                MixError::Config(format!("Level '{}' is not 'threshold:bucket'", part))
            })?;
            let threshold_ppm = t
                .trim()
                .parse::<f64>()
                .map_err(|_| MixError::Config(format!("Invalid threshold in level '{}'", part)))?;
            let bucket = b
                .trim()
                .parse::<i32>()
                .map_err(|_| MixError::Config(format!("Invalid bucket in level '{}'", part)))?;
            levels.push(Level {
                threshold_ppm,
                bucket,
            });
        }
        Self::new(levels, floor)
    }

    pub fn bucket(&self, distance: f64) -> i32 {
        if let Some(level) = self.levels.iter().find(|l| distance > l.threshold_ppm) {
            return level.bucket;
        }
        // The lowest threshold is inclusive.
        match self.levels.last() {
            Some(lowest) if distance == lowest.threshold_ppm => lowest.bucket,
            _ => self.floor,
        }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn floor(&self) -> i32 {
        self.floor
    }

    /// Bucket of the largest threshold.
    pub fn max_bucket(&self) -> i32 {
        self.levels[0].bucket
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        let levels = [
            (0.50, 10),
            (0.40, 9),
            (0.30, 8),
            (0.20, 7),
            (0.18, 6),
            (0.15, 5),
            (0.10, 4),
            (0.08, 3),
            (0.06, 2),
            (0.04, 1),
            (0.02, 0),
        ]
        .into_iter()
        .map(|(threshold_ppm, bucket)| Level {
            threshold_ppm,
            bucket,
        })
        .collect();
        Self { levels, floor: -1 }
    }
}
