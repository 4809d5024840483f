//! Console output formatter for simulation reports

use crate::output::formatter::ReportFormatter;
use agora_domain::{ProblemOutcome, SimulationReport, Termination, TopologyReport};
use colored::Colorize;

/// Formats simulation reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete simulation report
    pub fn format(report: &SimulationReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agora Simulation Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Problems:".cyan().bold(),
            report.problem_count
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Topologies:".cyan().bold(),
            report
                .topologies
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        for topology in &report.topologies {
            output.push_str(&Self::topology_section(topology));
        }

        output.push_str(&Self::section_header("Summary"));
        for topology in &report.topologies {
            output.push_str(&format!(
                "  {:<16} {:>6.1}%  ({}/{})\n",
                topology.name,
                topology.accuracy(),
                topology.total_correct(),
                topology.total_assessed()
            ));
        }
        if let Some(best) = report.best_topology() {
            output.push_str(&format!(
                "\n{} {} ({:.1}%)\n",
                "Best topology:".green().bold(),
                best.name,
                best.accuracy()
            ));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &SimulationReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn topology_section(topology: &TopologyReport) -> String {
        let mut output = Self::section_header(&format!(
            "{} ({} agents)",
            topology.name, topology.agent_count
        ));

        for problem in &topology.problems {
            output.push_str(&Self::problem_line(problem, topology.agent_count));
        }

        output.push_str(&format!("\n{}\n", "Correct answers per agent:".bold()));
        for (agent, correct) in topology.per_agent_correct() {
            output.push_str(&format!("  agent {:<4} {}\n", agent, correct));
        }

        output.push_str(&format!(
            "\n{} {:.1}% ({}/{})",
            "Accuracy:".cyan().bold(),
            topology.accuracy(),
            topology.total_correct(),
            topology.total_assessed()
        ));
        if topology.failed_count() > 0 {
            output.push_str(&format!(
                "  {}",
                format!("{} problem(s) failed", topology.failed_count()).red()
            ));
        }
        output.push('\n');

        output
    }

    fn problem_line(problem: &ProblemOutcome, agent_count: usize) -> String {
        match (&problem.debate, &problem.error) {
            (Some(debate), _) => {
                let termination = match debate.termination {
                    Termination::Settled => debate.termination.as_str().green(),
                    Termination::SweepLimitReached | Termination::Stalled => {
                        debate.termination.as_str().yellow()
                    }
                };
                format!(
                    "  #{:<4} {}/{} correct  {}  sweeps {} debates {} tie-breaks {}\n",
                    problem.index,
                    problem.correct_count(),
                    agent_count,
                    termination,
                    debate.sweeps,
                    debate.debates,
                    debate.tie_breaks
                )
            }
            (None, error) => format!(
                "  #{:<4} {} {}\n",
                problem.index,
                "failed:".red(),
                error.as_deref().unwrap_or("Unknown")
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl ReportFormatter for ConsoleFormatter {
    fn format(&self, report: &SimulationReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &SimulationReport) -> String {
        Self::format_json(report)
    }
}
