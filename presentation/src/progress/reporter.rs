//! Progress reporting for simulation runs

use agora_application::DebateProgressNotifier;
use agora_domain::{AgentId, DebateResult, ProblemOutcome, TopologyReport};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a simulation with progress bars
///
/// One bar per topology advances as problems complete; its message shows the
/// current sweep and the latest debate.
pub struct ProgressReporter {
    multi: MultiProgress,
    topology_bar: Mutex<Option<ProgressBar>>,
    current_problem: Mutex<usize>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            topology_bar: Mutex::new(None),
            current_problem: Mutex::new(0),
        }
    }

    fn topology_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn set_message(&self, message: String) {
        if let Ok(bar) = self.topology_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(message);
        }
    }

    fn problem_prefix(&self) -> String {
        let index = self.current_problem.lock().map(|i| *i).unwrap_or(0);
        format!("#{}", index)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_topology_start(&self, name: &str, agents: usize, problems: usize) {
        let pb = self.multi.add(ProgressBar::new(problems as u64));
        pb.set_style(Self::topology_style());
        pb.set_prefix(format!("{} ({} agents)", name, agents));
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.topology_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_problem_start(&self, index: usize, _total: usize) {
        if let Ok(mut current) = self.current_problem.lock() {
            *current = index;
        }
        self.set_message(format!("#{} solving", index));
    }

    fn on_problem_complete(&self, outcome: &ProblemOutcome) {
        let status = if outcome.is_failed() {
            format!("{} #{} failed", "x".red(), outcome.index)
        } else {
            format!(
                "{} #{} {}/{} correct",
                "v".green(),
                outcome.index,
                outcome.correct_count(),
                outcome.agents.len()
            )
        };
        if let Ok(bar) = self.topology_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_topology_complete(&self, report: &TopologyReport) {
        if let Ok(mut bar) = self.topology_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!(
                "{} {:.1}%",
                "done".green(),
                report.accuracy()
            ));
        }
    }

    fn on_sweep_start(&self, sweep: usize) {
        self.set_message(format!("{} sweep {}", self.problem_prefix(), sweep));
    }

    fn on_debate_complete(&self, result: &DebateResult) {
        self.set_message(format!(
            "{} {} vs {}: {}",
            self.problem_prefix(),
            result.initiator,
            result.responder,
            result.end.as_str()
        ));
    }

    fn on_debate_failed(&self, initiator: AgentId, responder: AgentId, _error: &str) {
        self.set_message(format!(
            "{} {} vs {}: {}",
            self.problem_prefix(),
            initiator,
            responder,
            "failed".red()
        ));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DebateProgressNotifier for SimpleProgress {
    fn on_topology_start(&self, name: &str, agents: usize, problems: usize) {
        println!(
            "{} {} ({} agents, {} problems)",
            "->".cyan(),
            name.bold(),
            agents,
            problems
        );
    }

    fn on_problem_start(&self, _index: usize, _total: usize) {}

    fn on_problem_complete(&self, outcome: &ProblemOutcome) {
        match &outcome.debate {
            Some(debate) => println!(
                "  {} #{} {}/{} correct ({})",
                "v".green(),
                outcome.index,
                outcome.correct_count(),
                outcome.agents.len(),
                debate.termination
            ),
            None => println!(
                "  {} #{} (failed: {})",
                "x".red(),
                outcome.index,
                outcome.error.as_deref().unwrap_or("unknown")
            ),
        }
    }

    fn on_topology_complete(&self, report: &TopologyReport) {
        println!("  accuracy {:.1}%", report.accuracy());
        println!();
    }
}
