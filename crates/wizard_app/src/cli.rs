use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use wizard_engine::{EngineSettings, DEFAULT_BASE_URL};
use wizard_logging::{LogDestination, DEFAULT_LOG_FILE};

/// One day; longer waits are treated as a configuration mistake.
const MAX_TIMEOUT_SECS: u64 = 86_400;

#[derive(Debug, Parser)]
#[command(name = "interview-prep")]
#[command(about = "Step-by-step interview preparation guide from a résumé and a job description")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the interview prep service
    #[arg(long, env = "PREP_API_BASE", default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// Timeout for each remote call, in seconds
    #[arg(
        long,
        env = "PREP_REQUEST_TIMEOUT_SECS",
        default_value_t = 180,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub request_timeout_secs: u64,

    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub connect_timeout_secs: u64,

    /// Directory holding the saved wizard state
    #[arg(long, env = "PREP_STATE_DIR", default_value = ".")]
    pub state_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start over and run the whole wizard: upload, job details, guide generation
    Prepare {
        /// Plain-text résumé
        #[arg(long)]
        resume: PathBuf,
        /// File holding the job description
        #[arg(long)]
        job_description: PathBuf,
        #[arg(long)]
        company: Option<String>,
        /// How many times to press "Try Again" after a failure
        #[arg(long, default_value_t = 0)]
        retries: u32,
        /// Write the finished guide here
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Open a wizard step from the saved state
    Show {
        #[arg(long, default_value_t = 2)]
        step: usize,
    },
    /// Re-attach the résumé to a saved wizard whose file was lost, then finish it
    Resume {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Export the saved guide as JSON
    Export {
        #[arg(long)]
        out: PathBuf,
    },
    /// Clear the saved wizard
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl Args {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            base_url: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
