//! Progress notification port

/// Stages of a council run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouncilPhase {
    Frame,
    Peers,
    Synthesis,
}

impl CouncilPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouncilPhase::Frame => "frame",
            CouncilPhase::Peers => "peers",
            CouncilPhase::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CouncilPhase::Frame => "Framing",
            CouncilPhase::Peers => "Gathering perspectives",
            CouncilPhase::Synthesis => "Combining",
        }
    }
}

impl std::fmt::Display for CouncilPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Callback for progress updates during a council run
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: CouncilPhase, total_tasks: usize);

    /// Called when one agent finishes within a phase
    fn on_task_complete(&self, phase: CouncilPhase, agent: &str, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: CouncilPhase);
}

/// No-op progress notifier
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: CouncilPhase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: CouncilPhase, _agent: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: CouncilPhase) {}
}
