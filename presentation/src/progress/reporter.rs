//! Progress reporting for council runs
//!
//! Both reporters draw on stderr so stdout stays clean for `-o json`.

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use parley_application::{CouncilPhase, ProgressNotifier};
use std::sync::Mutex;

/// Reports progress with one bar per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn task_message(agent: &str, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), agent)
        } else {
            format!("{} {} (unavailable)", "x".red(), agent)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: CouncilPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: CouncilPhase, agent: &str, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::task_message(agent, success));
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: CouncilPhase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} done", phase.display_name().green()));
        }
    }
}

/// Plain line-per-event progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: CouncilPhase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} {})",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks,
            if total_tasks == 1 { "task" } else { "tasks" }
        );
    }

    fn on_task_complete(&self, _phase: CouncilPhase, agent: &str, success: bool) {
        eprintln!("  {}", ProgressReporter::task_message(agent, success));
    }

    fn on_phase_complete(&self, _phase: CouncilPhase) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_one_phase_at_a_time() {
        let reporter = ProgressReporter {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            phase_bar: Mutex::new(None),
        };

        reporter.on_phase_start(CouncilPhase::Peers, 3);
        reporter.on_task_complete(CouncilPhase::Peers, "advisor-a", true);
        reporter.on_task_complete(CouncilPhase::Peers, "advisor-b", false);
        {
            let slot = reporter.phase_bar.lock().unwrap();
            let pb = slot.as_ref().unwrap();
            assert_eq!(pb.position(), 2);
            assert_eq!(pb.length(), Some(3));
        }

        reporter.on_phase_complete(CouncilPhase::Peers);
        assert!(reporter.phase_bar.lock().unwrap().is_none());

        // Completions outside a phase are ignored
        reporter.on_task_complete(CouncilPhase::Synthesis, "lead", true);
    }

    #[test]
    fn test_task_message_marks_failures() {
        colored::control::set_override(false);
        assert_eq!(ProgressReporter::task_message("advisor-a", true), "v advisor-a");
        assert_eq!(
            ProgressReporter::task_message("advisor-b", false),
            "x advisor-b (unavailable)"
        );
    }
}
