use crate::math::stats::StatsHelper;
use crate::metrics::summary::RunSummary;

pub const INSUFFICIENT_DATA: &str = "Insufficient data for comparison";

const METRIC_WIDTH: usize = 30;

/// A run summary with the column heading it is reported under.
#[derive(Debug, Clone, Copy)]
pub struct NamedSummary<'a> {
    pub label: &'a str,
    pub summary: &'a RunSummary,
}

impl<'a> NamedSummary<'a> {
    pub fn new(label: &'a str, summary: &'a RunSummary) -> Self {
        Self { label, summary }
    }
}

/// Formats a comparison table. Two runs get a change column relative to the
/// first; three or more get side-by-side columns and a pairwise summary.
/// Rows with a metric missing from any run are left out.
pub fn format_comparison(runs: &[NamedSummary<'_>]) -> String {
    if runs.len() == 2 {
        format_pairwise(&runs[0], &runs[1])
    } else {
        format_columns(runs)
    }
}

fn collect<T>(runs: &[NamedSummary<'_>], metric: impl Fn(&RunSummary) -> Option<T>) -> Option<Vec<T>> {
    runs.iter().map(|run| metric(run.summary)).collect()
}

fn banner(lines: &mut Vec<String>, width: usize, title: &str) {
    lines.push(String::new());
    lines.push("=".repeat(width));
    lines.push(title.to_string());
    lines.push("=".repeat(width));
    lines.push(String::new());
}

fn format_pairwise(base: &NamedSummary<'_>, other: &NamedSummary<'_>) -> String {
    const WIDTH: usize = 80;
    let (b, o) = (base.summary, other.summary);
    let mut lines = Vec::new();
    banner(&mut lines, WIDTH, "METRICS COMPARISON");

    lines.push(format!(
        "{:<METRIC_WIDTH$} {:>15} {:>15} {:>15}",
        "Metric", base.label, other.label, "Change"
    ));
    lines.push("-".repeat(WIDTH));

    if let Some(change) = StatsHelper::percent_decrease(b.final_total_loss, o.final_total_loss) {
        lines.push(format!(
            "{:<METRIC_WIDTH$} {:>15.4} {:>15.4} {:>14.1}%",
            "Final Total Loss", b.final_total_loss, o.final_total_loss, change
        ));
    }
    if let Some(change) = StatsHelper::percent_decrease(b.min_total_loss, o.min_total_loss) {
        lines.push(format!(
            "{:<METRIC_WIDTH$} {:>15.4} {:>15.4} {:>14.1}%",
            "Min Total Loss", b.min_total_loss, o.min_total_loss, change
        ));
    }
    let steps = b.convergence_step.zip(o.convergence_step);
    if let Some((bs, os)) = steps {
        if let Some(change) = StatsHelper::percent_decrease(bs as f64, os as f64) {
            lines.push(format!(
                "{:<METRIC_WIDTH$} {:>15} {:>15} {:>14.1}%",
                "Convergence Step (90%)", bs, os, change
            ));
        }
    }
    if let Some((br, or)) = b.loss_reduction.zip(o.loss_reduction) {
        lines.push(format!(
            "{:<METRIC_WIDTH$} {:>14.1}% {:>14.1}%",
            "Loss Reduction", br, or
        ));
    }

    lines.push(String::new());
    lines.push("=".repeat(WIDTH));
    lines.push(String::new());

    let quality = StatsHelper::percent_decrease(b.final_total_loss, o.final_total_loss);
    let speed = steps.and_then(|(bs, os)| StatsHelper::percent_decrease(bs as f64, os as f64));
    if let (Some(quality), Some(speed)) = (quality, speed) {
        lines.push("SUMMARY:".to_string());
        lines.push(format!(
            "  Quality Improvement: {quality:+.1}% (lower loss is better)"
        ));
        lines.push(format!(
            "  Convergence Speed:   {speed:+.1}% (positive means faster)"
        ));
        lines.push(String::new());
    }

    lines.join("\n")
}

fn format_columns(runs: &[NamedSummary<'_>]) -> String {
    const MIN_COLUMN: usize = 18;
    let column = runs
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_COLUMN);
    let width = METRIC_WIDTH + runs.len() * (column + 1) + 13;
    let mut lines = Vec::new();
    let title = if runs.len() == 3 {
        "THREE-WAY METRICS COMPARISON".to_string()
    } else {
        format!("{}-WAY METRICS COMPARISON", runs.len())
    };
    banner(&mut lines, width, &title);

    let row = |name: &str, cells: Vec<String>| -> String {
        let mut line = format!("{name:<METRIC_WIDTH$}");
        for cell in cells {
            line.push_str(&format!(" {cell:>column$}"));
        }
        line
    };

    lines.push(row(
        "Metric",
        runs.iter().map(|r| r.label.to_string()).collect(),
    ));
    lines.push("-".repeat(width));

    let finals = collect(runs, |s| Some(s.final_total_loss));
    if let Some(values) = &finals {
        lines.push(row(
            "Final Total Loss",
            values.iter().map(|v| format!("{v:.4}")).collect(),
        ));
    }
    if let Some(values) = collect(runs, |s| Some(s.min_total_loss)) {
        lines.push(row(
            "Min Total Loss",
            values.iter().map(|v| format!("{v:.4}")).collect(),
        ));
    }
    let steps = collect(runs, |s| s.convergence_step);
    if let Some(values) = &steps {
        lines.push(row(
            "Convergence Step (90%)",
            values.iter().map(|v| v.to_string()).collect(),
        ));
    }
    if let Some(values) = collect(runs, |s| s.loss_reduction) {
        lines.push(row(
            "Loss Reduction",
            values.iter().map(|v| format!("{v:.1}%")).collect(),
        ));
    }

    lines.push(String::new());
    lines.push("=".repeat(width));
    lines.push(String::new());

    let pairs: Vec<(usize, usize)> = (0..runs.len())
        .flat_map(|i| (i + 1..runs.len()).map(move |j| (i, j)))
        .collect();
    let pair_labels: Vec<String> = pairs
        .iter()
        .map(|&(i, j)| format!("{} → {}:", runs[i].label, runs[j].label))
        .collect();
    let pad = pair_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let padded = |label: &str| {
        let fill = pad - label.chars().count();
        format!("{label}{}", " ".repeat(fill))
    };

    if let Some(values) = &finals {
        lines.push("SUMMARY:".to_string());
        for (&(i, j), label) in pairs.iter().zip(&pair_labels) {
            if let Some(change) = StatsHelper::percent_decrease(values[i], values[j]) {
                lines.push(format!("  {} {change:+.1}% improvement", padded(label)));
            }
        }
        lines.push(String::new());

        if let Some(values) = &steps {
            lines.push("CONVERGENCE SPEED:".to_string());
            for (&(i, j), label) in pairs.iter().zip(&pair_labels) {
                if let Some(change) =
                    StatsHelper::percent_decrease(values[i] as f64, values[j] as f64)
                {
                    lines.push(format!("  {} {change:+.1}% faster", padded(label)));
                }
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}
