//! Console and JSON rendering of screening reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::input::loader::StageOutcome;
use crate::output::report::{CandidateReport, CandidateStatus, ScreeningReport};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Human-readable ranking with colored score bands
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

/// Picks a formatter for the configured output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 80.0 => ("STRONG", Color::Green),
            s if s >= 60.0 => ("GOOD", Color::BrightGreen),
            s if s >= 40.0 => ("FAIR", Color::Yellow),
            s if s >= 20.0 => ("WEAK", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_field(&self, label: &str, value: &str) -> String {
        let value = if value.is_empty() {
            self.colorize("not found", Color::BrightBlack)
        } else {
            value.to_string()
        };
        format!("    {:<14} {}\n", format!("{}:", label), value)
    }

    fn format_candidate(&self, candidate: &CandidateReport) -> String {
        let mut output = String::new();

        let status = match candidate.status {
            CandidateStatus::Accepted => self.colorize("accepted", Color::Green),
            CandidateStatus::Rejected => self.colorize("rejected: no contact details", Color::Red),
        };
        output.push_str(&format!(
            "\n{}. {} {:.2} {} ({})\n",
            candidate.rank,
            candidate.source,
            candidate.score,
            self.format_score_badge(candidate.score),
            status
        ));

        let fields = &candidate.fields;
        output.push_str(&self.format_field("Name", &fields.name));
        output.push_str(&self.format_field("Email", &fields.email));
        output.push_str(&self.format_field("Phone", &fields.phone));
        output.push_str(&self.format_field("City", &fields.city));
        output.push_str(&self.format_field("Qualification", &fields.qualification));

        if candidate.placeholder_text {
            output.push_str(&format!(
                "    {}\n",
                self.colorize("⚠ no text could be extracted from this document", Color::Yellow)
            ));
        }

        if self.detailed {
            output.push_str(&format!(
                "    Scoring:       {:?} (overlap {:.2}",
                candidate.method, candidate.overlap
            ));
            if let Some(vector) = candidate.vector_similarity {
                output.push_str(&format!(", tf-idf {:.2}", vector));
            }
            output.push_str(")\n");

            for (field, strategy) in &candidate.matched_by {
                output.push_str(&format!("    {:<14} {}\n", format!("{}:", field), strategy));
            }

            for stage in &candidate.load_stages {
                let outcome = match &stage.outcome {
                    StageOutcome::Extracted { chars } => format!("{} chars", chars),
                    StageOutcome::Empty => "empty".to_string(),
                    StageOutcome::Failed { reason } => format!("failed: {}", reason),
                };
                output.push_str(&format!("    [{}] {}\n", stage.backend, outcome));
            }

            output.push_str(&format!("    Time:          {}ms\n", candidate.processing_time_ms));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME SCREENING RESULTS"));
        output.push_str(&format!(
            "Job: {} | Generated: {}\n",
            report.job_source,
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if report.candidates.is_empty() {
            output.push_str("\nNo candidates screened.\n");
            return Ok(output);
        }

        for candidate in &report.candidates {
            output.push_str(&self.format_candidate(candidate));
        }

        output.push_str(&format!(
            "\n{} of {} candidates have contact details\n",
            report.accepted().count(),
            report.candidates.len()
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true, false)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
