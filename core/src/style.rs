use colored::{Color, ColoredString, Colorize};

use crate::testing::{CaseReport, RunSummary, Verdict};

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for Verdict {
    fn color(&self) -> Color {
        use Verdict::*;
        match self {
            Ok => Color::Green,
            Wa => Color::Yellow,
            Tle => Color::Magenta,
            Cancelled => Color::Cyan,
            Re => Color::Red,
        }
    }
}

pub fn verdict_label(verdict: Verdict) -> ColoredString {
    verdict.to_string().color(verdict.color())
}

/// `<name>\t<verdict>`, plus the diagnostic detail under verbose.
pub fn case_report_line(report: &CaseReport, verbose: bool) -> String {
    let mut line = format!("{}\t{}", report.name, verdict_label(report.verdict));
    if verbose {
        if let Some(detail) = &report.detail {
            line.push('\t');
            line.push_str(detail);
        }
    }
    line
}

/// `[<ok>/<total>]` followed by one `<label> <count>` pair per verdict.
pub fn run_summary_line(summary: &RunSummary) -> String {
    let mut line = format!("[{}/{}]", summary.ok, summary.total);
    for verdict in Verdict::ALL {
        line.push_str(&format!(" {} {}", verdict_label(verdict), summary.count(verdict)));
    }
    line
}
