//! Output formatter trait

use agora_domain::SimulationReport;

/// Trait for formatting simulation reports
pub trait ReportFormatter {
    /// Format the complete report
    fn format(&self, report: &SimulationReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &SimulationReport) -> String;
}
