// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jobpipe - a thin CLI for manually exercising the job-pipeline engine.
//!
//! No business logic lives here: every command loads the same `toml`
//! config the daemon reads, opens the same on-disk `PipelineStore`, and
//! calls straight into `jobpipe-engine`/`jobpipe-daemon`.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod output;
mod table;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jobpipe_core::{Clock, Job, JobId, JobStatus, SystemClock};
use jobpipe_daemon::{build_registry, run_sweep, Config};
use jobpipe_engine::scoring::{rank_jobs, ScorePreferences};
use jobpipe_storage::PipelineStore;
use output::OutputFormat;
use std::path::PathBuf;
use std::sync::Arc;
use table::{Column, Table};

#[derive(Parser)]
#[command(
    name = "jobpipe",
    version,
    about = "Manual-testing CLI for the job-application pipeline engine"
)]
struct Cli {
    /// Path to config.toml (defaults to $XDG_CONFIG_HOME/jobpipe/config.toml)
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every configured company's board and reconcile the pipeline store
    Ingest,
    /// List jobs, ranked by score
    List {
        /// Only show jobs in this status (new, applied, interview, offer,
        /// rejected, withdrawn, closed, excluded)
        #[arg(long)]
        status: Option<String>,
        /// Preferred state codes (repeatable)
        #[arg(long = "state")]
        states: Vec<String>,
        /// Preferred cities (repeatable)
        #[arg(long = "city")]
        cities: Vec<String>,
        /// Include the remote-USA bonus when ranking
        #[arg(long = "remote-usa")]
        remote_usa: bool,
        /// Maximum rows to print
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Show a single job's full detail
    Show {
        /// Composite job id (`ats:ats_job_id`)
        id: String,
    },
    /// Print job counts by status
    Stats,
    /// Mark a job rejected/excluded/withdrawn
    Reject {
        /// Composite job id (`ats:ats_job_id`)
        id: String,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long = "as", value_enum, default_value_t = SkipStatusArg::Rejected)]
        as_status: SkipStatusArg,
    },
    /// Reverse a reject/exclude/withdraw, moving the job back to New
    Unreject {
        /// Composite job id (`ats:ats_job_id`)
        id: String,
    },
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum SkipStatusArg {
    #[default]
    Rejected,
    Excluded,
    Withdrawn,
}

impl From<SkipStatusArg> for JobStatus {
    fn from(s: SkipStatusArg) -> Self {
        match s {
            SkipStatusArg::Rejected => JobStatus::Rejected,
            SkipStatusArg::Excluded => JobStatus::Excluded,
            SkipStatusArg::Withdrawn => JobStatus::Withdrawn,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data directory {}", config.data_dir.display()))?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = PipelineStore::new(config.jobs_path(), config.rejected_path(), config.store_config(), clock.clone());

    match cli.command {
        Commands::Ingest => ingest(&config, &store, clock).await,
        Commands::List { status, states, cities, remote_usa, limit } => {
            list(&store, &config, status, states, cities, remote_usa, limit, cli.output)
        }
        Commands::Show { id } => show(&store, &id, cli.output),
        Commands::Stats => stats(&store, cli.output),
        Commands::Reject { id, reason, as_status } => reject(&store, &id, as_status.into(), reason),
        Commands::Unreject { id } => unreject(&store, &id),
    }
}

async fn ingest(config: &Config, store: &PipelineStore, clock: Arc<dyn Clock>) -> Result<()> {
    if config.companies.is_empty() {
        bail!("no companies configured — add a [[companies]] entry to config.toml");
    }
    let registry = build_registry(reqwest::Client::new());
    let statuses = run_sweep(config, store, registry, clock).await?;

    let mut table = Table::new(vec![
        Column::left("COMPANY"),
        Column::left("ATS"),
        Column::status("RESULT"),
        Column::left("ERROR").with_max(60),
    ]);
    for status in &statuses {
        table.row(vec![
            status.company.clone(),
            status.ats.clone(),
            (if status.ok { "ok" } else { "failed" }).to_string(),
            status.error.clone().unwrap_or_default(),
        ]);
    }
    table.render(&mut std::io::stdout());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn list(
    store: &PipelineStore,
    config: &Config,
    status: Option<String>,
    states: Vec<String>,
    cities: Vec<String>,
    remote_usa: bool,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let mut jobs = match status {
        Some(s) => {
            let parsed = parse_status(&s).with_context(|| format!("unknown status '{s}'"))?;
            store.get_by_status(parsed)?
        }
        None => store.get_active()?,
    };

    let prefs = ScorePreferences { states, cities, include_remote_usa: remote_usa };
    rank_jobs(&mut jobs, &prefs, &config.scoring, chrono::Utc::now());
    jobs.truncate(limit);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&jobs)?),
        OutputFormat::Text => print_job_table(&jobs),
    }
    Ok(())
}

fn print_job_table(jobs: &[Job]) {
    let mut table = Table::new(vec![
        Column::left("ID").with_max(40),
        Column::left("COMPANY"),
        Column::left("TITLE").with_max(50),
        Column::status("STATUS"),
        Column::left("LOCATION").with_max(30),
    ]);
    for job in jobs {
        table.row(vec![
            job.id.as_str().to_string(),
            job.company.clone(),
            job.title.clone(),
            job.status.to_string(),
            job.location.clone(),
        ]);
    }
    table.render(&mut std::io::stdout());
}

fn show(store: &PipelineStore, id: &str, format: OutputFormat) -> Result<()> {
    let job_id = JobId::new(id);
    let job = store.get_by_id(&job_id)?.with_context(|| format!("no job with id '{id}'"))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&job)?),
        OutputFormat::Text => {
            println!("{}", color::header(&format!("{} @ {}", job.title, job.company)));
            println!("  id:        {}", job.id.as_str());
            println!("  status:    {}", color::status(&job.status.to_string()));
            println!("  location:  {}", job.location);
            println!("  url:       {}", job.url);
            println!("  geo_score: {}", job.geo_score);
            if let Some(role) = job.role_family {
                println!("  role:      {} ({:.2} confidence)", role.as_str(), job.role_confidence);
            }
            if job.needs_attention {
                println!("  {}", color::yellow("needs attention"));
            }
            if let Some(notes) = &job.notes {
                println!("  notes:     {notes}");
            }
        }
    }
    Ok(())
}

fn stats(store: &PipelineStore, format: OutputFormat) -> Result<()> {
    let by_status = store.stats()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&by_status)?),
        OutputFormat::Text => {
            let mut table = Table::new(vec![Column::left("STATUS"), Column::right("COUNT")]);
            let mut rows: Vec<(&String, &usize)> = by_status.iter().collect();
            rows.sort_by_key(|(name, _)| name.to_string());
            for (name, count) in rows {
                table.row(vec![name.clone(), count.to_string()]);
            }
            table.render(&mut std::io::stdout());
        }
    }
    Ok(())
}

fn reject(store: &PipelineStore, id: &str, new_status: JobStatus, reason: Option<String>) -> Result<()> {
    let job_id = JobId::new(id);
    let job = store
        .update_status(&job_id, new_status, None, None, None, reason)?
        .with_context(|| format!("no job with id '{id}'"))?;
    println!("{} -> {}", job.id.as_str(), color::status(&job.status.to_string()));
    Ok(())
}

fn unreject(store: &PipelineStore, id: &str) -> Result<()> {
    let job_id = JobId::new(id);
    let job = store
        .update_status(&job_id, JobStatus::New, None, None, None, None)?
        .with_context(|| format!("no job with id '{id}'"))?;
    println!("{} -> {}", job.id.as_str(), color::status(&job.status.to_string()));
    Ok(())
}

fn parse_status(s: &str) -> Option<JobStatus> {
    [
        JobStatus::New,
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Offer,
        JobStatus::Rejected,
        JobStatus::Withdrawn,
        JobStatus::Closed,
        JobStatus::Excluded,
    ]
    .into_iter()
    .find(|status| status.as_str() == s.to_lowercase())
}

fn default_config_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("jobpipe").join("config.toml")
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
