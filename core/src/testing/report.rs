use std::fmt;

/// Final judgement for one testcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Output matched the expected answer.
    Ok,
    /// Wrong answer.
    Wa,
    /// Time limit exceeded.
    Tle,
    /// Aborted by run-wide cancellation before completion.
    Cancelled,
    /// Runtime/launch/file error unrelated to timeout or mismatch.
    Re,
}

impl Verdict {
    /// Presentation order for the summary line.
    pub const ALL: [Verdict; 5] = [
        Verdict::Ok,
        Verdict::Wa,
        Verdict::Tle,
        Verdict::Cancelled,
        Verdict::Re,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::Wa => "WA",
            Verdict::Tle => "TL",
            Verdict::Cancelled => "CC",
            Verdict::Re => "ERR",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one dispatched testcase. Produced exactly once per case,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub name: String,
    pub verdict: Verdict,
    pub detail: Option<String>,
}

impl CaseReport {
    pub fn new(name: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            name: name.into(),
            verdict,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Per-verdict counts over a set of reports.
/// A pure reduction: any permutation of the input yields the same summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub ok: usize,
    pub wa: usize,
    pub tle: usize,
    pub cancelled: usize,
    pub re: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[CaseReport]) -> Self {
        reports.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.verdict {
                Verdict::Ok => acc.ok += 1,
                Verdict::Wa => acc.wa += 1,
                Verdict::Tle => acc.tle += 1,
                Verdict::Cancelled => acc.cancelled += 1,
                Verdict::Re => acc.re += 1,
            }
            acc
        })
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::Ok => self.ok,
            Verdict::Wa => self.wa,
            Verdict::Tle => self.tle,
            Verdict::Cancelled => self.cancelled,
            Verdict::Re => self.re,
        }
    }
}
