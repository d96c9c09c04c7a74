use std::sync::Arc;

use tokio::{
    sync::{mpsc, Mutex},
    task::JoinSet,
};

use crate::cancel::CancelToken;

use super::{
    compare,
    report::{CaseReport, Verdict},
    runner::{CaseRunner, ExecStatus},
    testcase::Testcase,
};

/// Called with each report as soon as the collector receives it.
pub type ReportSink = Box<dyn Fn(&CaseReport) + Send + Sync>;

/// A fixed-size set of workers fanning testcases out to parallel
/// executions. Work and results travel through two bounded channels; every
/// blocking hand-off races the cancellation token.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    runner: CaseRunner,
    jobs: usize,
    normalize_whitespace: bool,
}

impl WorkerPool {
    pub fn new(runner: CaseRunner) -> Self {
        Self {
            runner,
            jobs: 1,
            normalize_whitespace: false,
        }
    }

    pub fn jobs(mut self, n: usize) -> Self {
        self.jobs = n.max(1);
        self
    }

    pub fn normalize_whitespace(mut self, yes: bool) -> Self {
        self.normalize_whitespace = yes;
        self
    }

    /// Run every testcase and collect the reports, in completion order.
    ///
    /// On cancellation the partial set collected so far is returned;
    /// undispatched cases produce no report and nothing is retried.
    /// Returns only after the feeder and every worker task have been
    /// joined.
    pub async fn launch(
        &self,
        testcases: Vec<Testcase>,
        cancel: &CancelToken,
        sink: Option<ReportSink>,
    ) -> Vec<CaseReport> {
        let total = testcases.len();
        let (in_tx, in_rx) = mpsc::channel::<Testcase>(1);
        let (out_tx, mut out_rx) = mpsc::channel::<CaseReport>(1);
        let in_rx = Arc::new(Mutex::new(in_rx));

        let mut tasks = JoinSet::new();

        for _ in 0..self.jobs {
            let runner = self.runner.clone();
            let normalize = self.normalize_whitespace;
            let in_rx = Arc::clone(&in_rx);
            let out_tx = out_tx.clone();
            let cancel = cancel.clone();
            tasks.spawn(async move {
                worker(runner, normalize, in_rx, out_tx, cancel).await;
            });
        }
        drop(out_tx);

        {
            let cancel = cancel.clone();
            tasks.spawn(async move {
                for testcase in testcases {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return,
                        res = in_tx.send(testcase) => {
                            if res.is_err() {
                                return;
                            }
                        }
                    }
                }
                // in_tx drops here, closing the work channel.
            });
        }

        let mut reports = Vec::with_capacity(total);
        for _ in 0..total {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                received = out_rx.recv() => match received {
                    Some(report) => {
                        if let Some(sink) = &sink {
                            sink(&report);
                        }
                        reports.push(report);
                    }
                    None => break,
                },
            }
        }
        drop(out_rx);

        while tasks.join_next().await.is_some() {}
        reports
    }
}

async fn worker(
    runner: CaseRunner,
    normalize_whitespace: bool,
    in_rx: Arc<Mutex<mpsc::Receiver<Testcase>>>,
    out_tx: mpsc::Sender<CaseReport>,
    cancel: CancelToken,
) {
    loop {
        let testcase = { in_rx.lock().await.recv().await };
        let Some(testcase) = testcase else {
            return;
        };
        let report = run_case(&runner, normalize_whitespace, &testcase, &cancel).await;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            res = out_tx.send(report) => {
                if res.is_err() {
                    return;
                }
            }
        }
    }
}

async fn run_case(
    runner: &CaseRunner,
    normalize_whitespace: bool,
    testcase: &Testcase,
    cancel: &CancelToken,
) -> CaseReport {
    let (input, answer) = match tokio::try_join!(testcase.read_input(), testcase.read_answer()) {
        Ok(pair) => pair,
        Err(e) => {
            return CaseReport::new(testcase.name(), Verdict::Re).with_detail(format!("{:#}", e));
        }
    };

    match runner.execute(&input, cancel).await {
        Ok(ExecStatus::Completed(output)) => {
            let verdict = compare::verdict(&output, &answer, normalize_whitespace);
            CaseReport::new(testcase.name(), verdict)
        }
        Ok(ExecStatus::TimedOut) => {
            CaseReport::new(testcase.name(), Verdict::Tle).with_detail(format!(
                "exceeded time limit of {}ms",
                runner.get_time_limit().as_millis()
            ))
        }
        Ok(ExecStatus::Cancelled) => {
            CaseReport::new(testcase.name(), Verdict::Cancelled).with_detail("run cancelled")
        }
        Err(e) => CaseReport::new(testcase.name(), Verdict::Re).with_detail(format!("{:#}", e)),
    }
}
