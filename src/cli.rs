//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Screen resumes against a job description")]
#[command(long_about = "Extract candidate contact details and qualifications from PDF/DOCX resumes and rank them by relevance to a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen one or more resumes against a job description
    #[command(group(ArgGroup::new("job_input").required(true).args(["job", "job_text"])))]
    Screen {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Resume files (PDF, DOCX)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show scoring breakdown, matching strategies and extraction stages
        #[arg(short, long)]
        detailed: bool,

        /// Score by word overlap only
        #[arg(long)]
        no_vector: bool,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_requires_a_job() {
        assert!(Cli::try_parse_from(["resume-screener", "screen", "a.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-screener",
            "screen",
            "--job",
            "job.txt",
            "--job-text",
            "rust",
            "a.pdf"
        ])
        .is_err());
    }

    #[test]
    fn test_screen_accepts_several_resumes() {
        let cli = Cli::try_parse_from([
            "resume-screener",
            "screen",
            "--job-text",
            "Rust developer",
            "a.pdf",
            "b.docx",
            "--output",
            "json",
            "--no-vector",
        ])
        .unwrap();

        match cli.command {
            Commands::Screen {
                job,
                job_text,
                resumes,
                output,
                no_vector,
                ..
            } => {
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Rust developer"));
                assert_eq!(resumes.len(), 2);
                assert_eq!(output.as_deref(), Some("json"));
                assert!(no_vector);
            }
            _ => panic!("expected screen command"),
        }
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_extension_validation() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "docx"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.txt"), &["pdf", "docx"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf", "docx"]).is_err());
    }
}
