use crate::math::stats::StatsHelper;
use crate::opacity::profile::OpacityProfile;

const WIDTH: usize = 70;

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn opacity_text(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3}"))
}

/// Per-file opacity breakdown, followed by baseline-vs-pruned effectiveness
/// numbers when at least two files were analyzed.
pub fn format_pruning_report(profiles: &[OpacityProfile]) -> String {
    let mut lines = vec![
        String::new(),
        "=".repeat(WIDTH),
        "DETAILED PRUNING ANALYSIS REPORT".to_string(),
        "=".repeat(WIDTH),
        String::new(),
    ];

    for (index, profile) in profiles.iter().enumerate() {
        let total = profile.total();
        let b = &profile.buckets;
        lines.push(format!("{}. {}", index + 1, profile.name));
        lines.push(format!("   {}", "─".repeat(60)));
        lines.push(format!("   Total Strokes:     {total}"));
        lines.push(format!(
            "   Dead (α<0.01):     {:4} ({:5.1}%)",
            b.dead,
            share(b.dead, total)
        ));
        lines.push(format!(
            "   Ghost (0.01-0.1):  {:4} ({:5.1}%)",
            b.ghost,
            share(b.ghost, total)
        ));
        lines.push(format!(
            "   Low (0.1-0.3):     {:4} ({:5.1}%)",
            b.low,
            share(b.low, total)
        ));
        lines.push(format!(
            "   Visible (≥0.3):    {:4} ({:5.1}%)",
            b.visible,
            share(b.visible, total)
        ));
        lines.push(format!(
            "   Mean Opacity:      {}",
            opacity_text(profile.mean_opacity)
        ));
        lines.push(format!(
            "   Median Opacity:    {}",
            opacity_text(profile.median_opacity)
        ));
        lines.push(format!(
            "   File Size:         {:.2} KB",
            profile.file_size_kb()
        ));
        lines.push(String::new());
    }

    if let [baseline, pruned, ..] = profiles {
        lines.push("=".repeat(WIDTH));
        lines.push("PRUNING EFFECTIVENESS METRICS".to_string());
        lines.push("=".repeat(WIDTH));
        if let Some(reduction) =
            StatsHelper::percent_decrease(baseline.total() as f64, pruned.total() as f64)
        {
            lines.push(format!(
                "Stroke Reduction:    {:6.1}% ({} → {})",
                reduction,
                baseline.total(),
                pruned.total()
            ));
        }
        let removed = baseline.buckets.dead as i64 - pruned.buckets.dead as i64;
        lines.push(format!(
            "Dead Strokes Removed: {removed:6} strokes eliminated"
        ));
        if let Some(reduction) =
            StatsHelper::percent_decrease(baseline.file_size as f64, pruned.file_size as f64)
        {
            lines.push(format!(
                "File Size Reduction:  {:6.1}% ({:.1}KB → {:.1}KB)",
                reduction,
                baseline.file_size_kb(),
                pruned.file_size_kb()
            ));
        }
        lines.push(format!(
            "Opacity Improvement:  {} → {}",
            opacity_text(baseline.mean_opacity),
            opacity_text(pruned.mean_opacity)
        ));
        lines.push("=".repeat(WIDTH));
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn profile(name: &str, opacities: Vec<f64>, file_size: u64) -> OpacityProfile {
        OpacityProfile::new(
            name.to_string(),
            PathBuf::from(format!("{name}.svg")),
            opacities,
            file_size,
        )
    }

    #[test]
    fn single_profile_has_no_effectiveness_block() {
        let text = format_pruning_report(&[profile("Baseline 128", vec![0.0, 0.5, 1.0, 1.0], 2048)]);
        assert!(text.contains("1. Baseline 128"));
        assert!(text.contains("   Total Strokes:     4"));
        assert!(text.contains("   Dead (α<0.01):        1 ( 25.0%)"));
        assert!(text.contains("   Median Opacity:    0.750"));
        assert!(text.contains("   File Size:         2.00 KB"));
        assert!(!text.contains("PRUNING EFFECTIVENESS METRICS"));
    }

    #[test]
    fn two_profiles_compare_first_against_second() {
        let text = format_pruning_report(&[
            profile("Baseline 128", vec![0.0, 0.0, 0.004, 0.5], 4096),
            profile("Pruned 128", vec![0.5, 1.0], 1024),
        ]);
        assert!(text.contains("Stroke Reduction:      50.0% (4 → 2)"));
        assert!(text.contains("Dead Strokes Removed:      3 strokes eliminated"));
        assert!(text.contains("File Size Reduction:    75.0% (4.0KB → 1.0KB)"));
        assert!(text.contains("Opacity Improvement:  0.126 → 0.750"));
    }

    #[test]
    fn empty_profile_reports_zero_shares() {
        let text = format_pruning_report(&[profile("Empty", Vec::new(), 10)]);
        assert!(text.contains("   Visible (≥0.3):       0 (  0.0%)"));
        assert!(text.contains("   Mean Opacity:      n/a"));
    }
}
