use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    GreedyPass {
        stage: u8,
        iteration: usize,
        moves: usize,
    },
    AnnealCheckpoint {
        run: usize,
        step: usize,
        temperature: f64,
        score: f64,
        best: f64,
    },
    AnnealRunFinished {
        run: usize,
        best: f64,
    },
}

/// Receives updates during one optimization call.
/// Returning `false` asks the optimizer to stop and hand back its best state.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent) -> bool;
}

pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_progress(&self, _event: &ProgressEvent) -> bool {
        true
    }
}

/// Writes every event as a `tracing` debug line.
pub struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_progress(&self, event: &ProgressEvent) -> bool {
        match *event {
            ProgressEvent::GreedyPass {
                stage,
                iteration,
                moves,
            } => debug!(stage, iteration, moves, "greedy pass"),
            ProgressEvent::AnnealCheckpoint {
                run,
                step,
                temperature,
                score,
                best,
            } => debug!(
                "anneal run {} step {:5} | T {:9.3} | score {:.3} | best {:.3}",
                run, step, temperature, score, best
            ),
            ProgressEvent::AnnealRunFinished { run, best } => {
                debug!(run, best, "annealing run finished")
            }
        }
        true
    }
}

impl<F> ProgressCallback for F
where
    F: Fn(&ProgressEvent) -> bool + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) -> bool {
        self(event)
    }
}
