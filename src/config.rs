use crate::error::{MixError, MixResult};
use crate::optimizer::cooling::CoolingMethod;
use crate::scorer::levels::{LevelTable, DEFAULT_LEVELS};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

/// What `n` means for a design run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
pub enum PoolMode {
    #[strum(to_string = "nMixtures", serialize = "nSamples")]
    #[serde(rename = "nMixtures", alias = "nSamples")]
    Mixtures,
    #[strum(to_string = "nComponentsPerMixture", serialize = "nComponentsPerSample")]
    #[serde(rename = "nComponentsPerMixture", alias = "nComponentsPerSample")]
    ComponentsPerMixture,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Iterative reassignment only.
    Greedy,
    /// Annealing from a contiguous split.
    Annealing,
    /// Greedy assignment refined by annealing.
    Refined,
    /// First-fit packing by pool size.
    FirstFit,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub design: DesignParams,
    #[command(flatten)]
    #[serde(default)]
    pub scoring: ScoringParams,
    #[command(flatten)]
    #[serde(default)]
    pub anneal: AnnealParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParams {
    #[arg(long, default_value = "nMixtures")]
    pub mode: PoolMode,
    /// Pool count or pool size, depending on the mode.
    #[arg(short = 'n', long = "count", default_value_t = 2)]
    pub n: usize,
    #[arg(long, default_value = "greedy")]
    pub method: Method,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            mode: PoolMode::Mixtures,
            n: 2,
            method: Method::Greedy,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    #[arg(long, default_value_t = 10)]
    pub peak_cap: usize,
    #[arg(long, default_value = DEFAULT_LEVELS)]
    pub levels: String,
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    pub floor_bucket: i32,
    #[arg(long, default_value_t = 5)]
    pub saturation_bucket: i32,
    /// Overlap tolerance (ppm) of the pairwise annealing objective.
    #[arg(long, default_value_t = 0.01)]
    pub min_distance: f64,
    #[arg(long, default_value_t = 1.0)]
    pub score_scale: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            peak_cap: 10,
            levels: DEFAULT_LEVELS.to_string(),
            floor_bucket: -1,
            saturation_bucket: 5,
            min_distance: 0.01,
            score_scale: 1.0,
        }
    }
}

impl ScoringParams {
    pub fn level_table(&self) -> MixResult<LevelTable> {
        if self.peak_cap == 0 {
            return Err(MixError::Config("peak_cap must be at least 1".to_string()));
        }
        if !(self.min_distance >= 0.0) {
            return Err(MixError::Config(format!(
                "min_distance must be non-negative, got {}",
                self.min_distance
            )));
        }
        LevelTable::parse(&self.levels, self.floor_bucket)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealParams {
    #[arg(long, default_value_t = 1000.0)]
    pub start_temp: f64,
    #[arg(long, default_value_t = 0.01)]
    pub final_temp: f64,
    #[arg(long, default_value_t = 1000)]
    pub max_steps: usize,
    #[arg(long, default_value_t = 200.0)]
    pub temp_k: f64,
    /// Cooling policy name; unknown names fall back to linear.
    #[arg(long, default_value = "linear")]
    pub cooling: String,
    #[arg(long, default_value_t = 1)]
    pub iterations: usize,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            start_temp: 1000.0,
            final_temp: 0.01,
            max_steps: 1000,
            temp_k: 200.0,
            cooling: "linear".to_string(),
            iterations: 1,
        }
    }
}

impl AnnealParams {
    /// `None` when the name is not a known policy.
    pub fn cooling_method(&self) -> Option<CoolingMethod> {
        CoolingMethod::from_str(self.cooling.trim()).ok()
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> MixResult<Self> {
        let content = fs::read_to_string(path)?;
        let cfg = serde_json::from_str(&content)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> MixResult<()> {
        self.scoring.level_table()?;
        if self.anneal.max_steps == 0 {
            warn!("max_steps is 0; annealing will not perform any step");
        }
        if !self.anneal.temp_k.is_finite() {
            return Err(MixError::Config("temp_k must be finite".to_string()));
        }
        Ok(())
    }
}
