use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

pub const DEFAULT_START_TEMP: f64 = 1000.0;
pub const DEFAULT_FINAL_TEMP: f64 = 0.1;
pub const DEFAULT_MAX_STEPS: usize = 1000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CoolingMethod {
    Linear,
    Exponential,
}

/// A cooling name resolved once per call. `Fallback` stands for an unknown
/// name and builds the default linear schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoolingPolicy {
    Method(CoolingMethod),
    Fallback,
}

impl CoolingPolicy {
    /// Unknown names log a warning here and nowhere else.
    pub fn resolve(name: &str) -> Self {
        match name.trim().parse::<CoolingMethod>() {
            Ok(method) => CoolingPolicy::Method(method),
            Err(_) => {
                warn!(
                    "Cooling method '{}' not implemented, using linear ({} -> {} over {} steps)",
                    name, DEFAULT_START_TEMP, DEFAULT_FINAL_TEMP, DEFAULT_MAX_STEPS
                );
                CoolingPolicy::Fallback
            }
        }
    }
}

impl Default for CoolingPolicy {
    fn default() -> Self {
        CoolingPolicy::Method(CoolingMethod::Linear)
    }
}

/// A lazy, unbounded temperature sequence. Consumers stop drawing on their
/// own step budget.
pub trait CoolingSchedule: Iterator<Item = f64> {
    fn start_temp(&self) -> f64;
    fn final_temp(&self) -> f64;
}

/// Subtracts `(start - final) / max_steps` per draw. No floor is applied.
#[derive(Debug, Clone)]
pub struct LinearCooling {
    start: f64,
    end: f64,
    step: f64,
    temp: f64,
}

impl LinearCooling {
    pub fn new(start: f64, end: f64, max_steps: usize) -> Self {
        let step = if start > end {
            (start - end) / max_steps.max(1) as f64
        } else {
            0.0
        };
        Self {
            start,
            end,
            step,
            temp: start,
        }
    }
}

impl Iterator for LinearCooling {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let t = self.temp;
        self.temp -= self.step;
        Some(t)
    }
}

impl CoolingSchedule for LinearCooling {
    fn start_temp(&self) -> f64 {
        self.start
    }
    fn final_temp(&self) -> f64 {
        self.end
    }
}

/// Multiplies by `exp(ln(final / start) / max_steps)` per draw.
#[derive(Debug, Clone)]
pub struct ExponentialCooling {
    start: f64,
    end: f64,
    alpha: f64,
    temp: f64,
}

impl ExponentialCooling {
    pub fn new(start: f64, end: f64, max_steps: usize) -> Self {
        let alpha = if start > end && start > 0.0 && end > 0.0 {
            ((end / start).ln() / max_steps.max(1) as f64).exp()
        } else {
            1.0
        };
        Self {
            start,
            end,
            alpha,
            temp: start,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Iterator for ExponentialCooling {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let t = self.temp;
        self.temp *= self.alpha;
        Some(t)
    }
}

impl CoolingSchedule for ExponentialCooling {
    fn start_temp(&self) -> f64 {
        self.start
    }
    fn final_temp(&self) -> f64 {
        self.end
    }
}

/// The schedule chosen for a run.
#[derive(Debug, Clone)]
pub enum Cooling {
    Linear(LinearCooling),
    Exponential(ExponentialCooling),
}

impl Cooling {
    pub fn new(method: CoolingMethod, start: f64, end: f64, max_steps: usize) -> Self {
        match method {
            CoolingMethod::Linear => Cooling::Linear(LinearCooling::new(start, end, max_steps)),
            CoolingMethod::Exponential => {
                Cooling::Exponential(ExponentialCooling::new(start, end, max_steps))
            }
        }
    }

    /// Builds the schedule for an already resolved policy. Never logs.
    pub fn for_policy(policy: CoolingPolicy, start: f64, end: f64, max_steps: usize) -> Self {
        match policy {
            CoolingPolicy::Method(method) => Self::new(method, start, end, max_steps),
            CoolingPolicy::Fallback => Self::default(),
        }
    }

    /// Resolves a policy by name. Unknown names log a warning and fall back
    /// to linear cooling with the default parameters.
    pub fn from_name(name: &str, start: f64, end: f64, max_steps: usize) -> Self {
        Self::for_policy(CoolingPolicy::resolve(name), start, end, max_steps)
    }

    pub fn method(&self) -> CoolingMethod {
        match self {
            Cooling::Linear(_) => CoolingMethod::Linear,
            Cooling::Exponential(_) => CoolingMethod::Exponential,
        }
    }

    /// Temperature at which a run stops. `None` for a schedule that does not
    /// decrease, which holds its start temperature for the whole step budget.
    pub fn final_temp_floor(&self) -> Option<f64> {
        if self.start_temp() > self.final_temp() {
            Some(self.final_temp())
        } else {
            None
        }
    }
}

impl Default for Cooling {
    fn default() -> Self {
        Cooling::Linear(LinearCooling::new(
            DEFAULT_START_TEMP,
            DEFAULT_FINAL_TEMP,
            DEFAULT_MAX_STEPS,
        ))
    }
}

impl Iterator for Cooling {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self {
            Cooling::Linear(c) => c.next(),
            Cooling::Exponential(c) => c.next(),
        }
    }
}

impl CoolingSchedule for Cooling {
    fn start_temp(&self) -> f64 {
        match self {
            Cooling::Linear(c) => c.start_temp(),
            Cooling::Exponential(c) => c.start_temp(),
        }
    }
    fn final_temp(&self) -> f64 {
        match self {
            Cooling::Linear(c) => c.final_temp(),
            Cooling::Exponential(c) => c.final_temp(),
        }
    }
}
