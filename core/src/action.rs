use anyhow::Context as _;

use crate::cancel::CancelToken;
use crate::config::RunConfig;
use crate::style;
use crate::testing::{case_cmp, CaseReport, CaseRunner, ReportSink, RunSummary, Testcase, WorkerPool};

/// Run one full pass over the testcase directory: discover, fan out,
/// collect, re-sort, print, summarize.
///
/// Per-case failures end up inside the reports; the only `Err` here is a
/// discovery failure, which aborts before anything runs.
pub async fn run_testcases(
    cfg: &RunConfig,
    cancel: &CancelToken,
) -> anyhow::Result<Vec<CaseReport>> {
    let testcases = Testcase::enumerate(&cfg.tests_dir).with_context(|| {
        format!(
            "failed to discover testcases in {}",
            cfg.tests_dir.to_string_lossy()
        )
    })?;

    let names: Vec<&str> = testcases.iter().map(|t| t.name()).collect();
    println!("{} cases found: {:?}\n", names.len(), names);

    log::info!(
        "running {:?} with {} jobs, time limit {}ms",
        cfg.executable,
        cfg.jobs,
        cfg.time_limit.as_millis()
    );

    let runner = CaseRunner::new(&cfg.executable).time_limit(cfg.time_limit);
    let pool = WorkerPool::new(runner)
        .jobs(cfg.jobs)
        .normalize_whitespace(cfg.normalize_whitespace);

    let sink: Option<ReportSink> = if cfg.stream {
        let verbose = cfg.verbose;
        Some(Box::new(move |report| {
            println!("{}", style::case_report_line(report, verbose));
        }))
    } else {
        None
    };

    let mut reports = pool.launch(testcases, cancel, sink).await;
    reports.sort_by(|a, b| case_cmp(&a.name, &b.name));

    if !cfg.stream {
        for report in &reports {
            println!("{}", style::case_report_line(report, cfg.verbose));
        }
    }

    let summary = RunSummary::from_reports(&reports);
    println!("\n{}", style::run_summary_line(&summary));

    Ok(reports)
}
