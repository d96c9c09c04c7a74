use std::path::PathBuf;
use std::time::Duration;

use partest_core::{
    action,
    cancel::CancelSource,
    config::{FileConfig, RunConfig},
};

use crate::util;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the solution executable (invoked with no arguments)
    #[arg(short = 'x', long)]
    pub executable: PathBuf,

    /// Directory holding `<name>` / `<name>.a` testcase pairs
    #[arg(short = 'i', long)]
    pub tests_dir: PathBuf,

    /// Number of testcases to run in parallel
    #[arg(short = 'n', long)]
    pub jobs: Option<usize>,

    /// Per-case time limit in milliseconds
    #[arg(short = 't', long)]
    pub time_limit_ms: Option<u64>,

    /// Normalize CRLF and surrounding whitespace before comparing
    #[arg(short = 'w', long)]
    pub normalize_whitespace: bool,

    /// Append the diagnostic detail to each report line
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print each report as soon as it arrives instead of in sorted order
    #[arg(short = 'a', long)]
    pub stream: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub async fn exec(&self) -> anyhow::Result<()> {
        if self.no_color {
            colored::control::set_override(false);
        }

        let cfg = self.build_run_config()?;

        let source = CancelSource::new();
        let token = source.token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("interrupt received, cancelling run");
                source.cancel();
            }
        });

        let _ = action::run_testcases(&cfg, &token).await?;
        Ok(())
    }

    /// CLI flags win over `partest.toml`; the file wins over built-ins.
    fn build_run_config(&self) -> anyhow::Result<RunConfig> {
        let file = FileConfig::from_file_finding_in_ancestors(util::current_dir())?;
        let f = &file.run;

        let time_limit = self
            .time_limit_ms
            .or(f.time_limit_ms)
            .map(Duration::from_millis)
            .unwrap_or(RunConfig::DEFAULT_TIME_LIMIT);

        Ok(RunConfig::new(&self.executable, &self.tests_dir)
            .jobs(self.jobs.or(f.jobs).unwrap_or(RunConfig::DEFAULT_JOBS))
            .time_limit(time_limit)
            .normalize_whitespace(
                self.normalize_whitespace || f.normalize_whitespace.unwrap_or(false),
            )
            .verbose(self.verbose || f.verbose.unwrap_or(false))
            .stream(self.stream || f.stream.unwrap_or(false)))
    }
}
