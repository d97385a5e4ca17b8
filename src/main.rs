//! Resume screener: rank PDF/DOCX resumes against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::Config;
use resume_screener::output::formatter::{save_report_to_file, ReportGenerator};
use resume_screener::output::report::ScreeningReport;
use resume_screener::screening::{rank_screenings, Screener, Screening};
use resume_screener::{Result, ScreenerError};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match load_config(&config_path, cli.config.is_some()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

/// An explicit `--config` must exist; the default location is created on first run
fn load_config(path: &Path, explicit: bool) -> Result<Config> {
    if explicit {
        if !path.exists() {
            return Err(ScreenerError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Config::load_from(path)
    } else {
        Config::load()
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Screen {
            job,
            job_text,
            resumes,
            output,
            save,
            detailed,
            no_vector,
        } => {
            for resume in &resumes {
                cli::validate_file_extension(resume, &["pdf", "docx"]).map_err(|e| {
                    ScreenerError::InvalidInput(format!("Resume file {}: {}", resume.display(), e))
                })?;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ScreenerError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;
            if no_vector {
                config.scoring.vector_scoring = false;
            }

            let (job_source, job_description) = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, &["txt", "md"]).map_err(|e| {
                        ScreenerError::InvalidInput(format!("Job description file: {}", e))
                    })?;
                    let text = tokio::fs::read_to_string(&path).await?;
                    (path.display().to_string(), text)
                }
                (None, Some(text)) => ("inline".to_string(), text),
                (None, None) => {
                    return Err(ScreenerError::InvalidInput(
                        "Provide --job or --job-text".to_string(),
                    ))
                }
            };

            if job_description.trim().is_empty() {
                return Err(ScreenerError::InvalidInput("Job description is empty".to_string()));
            }

            info!("Screening {} resume(s) against {}", resumes.len(), job_source);

            let screener = Arc::new(Screener::new(&config)?);
            let mut screenings = screen_all(screener, resumes, Arc::from(job_description)).await?;
            rank_screenings(&mut screenings);

            let report = ScreeningReport::new(job_source, &screenings);

            let generator = ReportGenerator::new(config.output.color_output, detailed);
            println!("{}", generator.generate_report(&report, output_format)?);

            if let Some(save_path) = save {
                let content = ReportGenerator::new(false, detailed).generate_report(&report, output_format)?;
                save_report_to_file(&content, &save_path)?;
                println!("Report saved to {}", save_path.display());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ScreenerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("# {}\n{}", config_path.display(), content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Screen every resume on the blocking pool, keeping input order
async fn screen_all(
    screener: Arc<Screener>,
    resumes: Vec<PathBuf>,
    job_description: Arc<str>,
) -> Result<Vec<Screening>> {
    let progress = if resumes.len() > 1 {
        let bar = ProgressBar::new(resumes.len() as u64);
        let style = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
            .map_err(|e| ScreenerError::Processing(format!("Invalid progress template: {}", e)))?;
        bar.set_style(style.progress_chars("=> "));
        Some(bar)
    } else {
        None
    };

    let handles: Vec<_> = resumes
        .into_iter()
        .map(|path| {
            let screener = Arc::clone(&screener);
            let job = Arc::clone(&job_description);
            tokio::task::spawn_blocking(move || screener.screen_file(&path, &job))
        })
        .collect();

    let mut screenings = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle
            .await
            .map_err(|e| ScreenerError::Processing(format!("Screening task failed: {}", e)))?;

        match result {
            Ok(screening) => {
                if let Some(bar) = &progress {
                    bar.set_message(screening.source.clone());
                }
                if screening.used_placeholder() {
                    warn!("No text extracted from {}", screening.source);
                }
                screenings.push(screening);
            }
            Err(e) => error!("Skipping resume: {}", e),
        }

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    Ok(screenings)
}
