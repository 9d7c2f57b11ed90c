pub mod anneal;
pub mod cooling;
pub mod first_fit;
pub mod greedy;
pub mod progress;
pub mod runner;

pub use self::anneal::{acceptance_probability, Acceptance, AnnealingOptimizer, AnnealingState, SwapMove};
pub use self::cooling::{Cooling, CoolingMethod, CoolingPolicy, CoolingSchedule};
pub use self::greedy::{Assigner, FixedPoolCount, FixedPoolSize, GreedyAssigner};
pub use self::progress::{LogProgress, ProgressCallback, ProgressEvent, SilentProgress};
pub use self::runner::{DesignOptions, MixtureDesigner};
