use crate::workflow::config::{Arity, ComparisonConfig, VariantConfig};
use anyhow::Context;
use log::info;
use sketchcore::metrics::{load_training_log, RunSummary, TimeSeries};
use sketchcore::report::{format_comparison, NamedSummary, INSUFFICIENT_DATA};
use sketchviz::geometry::figure_size;
use sketchviz::palette::variant_colors;
use sketchviz::{render_component_grid, render_total_loss, PlotSeries};
use std::path::PathBuf;

/// One variant after its log has been read.
pub struct VariantRun {
    pub config: VariantConfig,
    pub series: Option<TimeSeries>,
    #[allow(dead_code)]
    pub skipped_lines: usize,
    pub summary: Option<RunSummary>,
}

#[allow(dead_code)]
pub struct ComparisonResult {
    pub runs: Vec<VariantRun>,
    /// `None` when any variant lacks a summary.
    pub report: Option<String>,
    pub charts: Vec<PathBuf>,
}

#[derive(Clone)]
pub struct Runner {
    config: ComparisonConfig,
    arity: Arity,
    render: bool,
}

impl Runner {
    pub fn new(config: ComparisonConfig) -> anyhow::Result<Self> {
        let arity = config.arity().context("checking comparison arity")?;
        Ok(Self {
            config,
            arity,
            render: true,
        })
    }

    pub fn without_charts(mut self) -> Self {
        self.render = false;
        self
    }

    fn print_header(&self) {
        let rule = "=".repeat(self.arity.rule_width());
        let title = match self.arity {
            Arity::Two => "Analyzing Sketch Benchmark Results",
            Arity::Three => "Analyzing Sketch Benchmark Three-Way Results",
        };
        println!("\n{rule}\n{title}\n{rule}\n");
        let width = self
            .config
            .variants
            .iter()
            .map(|v| v.short_label.chars().count() + 1)
            .max()
            .unwrap_or(0)
            .max("Output:".len());
        for variant in &self.config.variants {
            let heading = format!("{}:", variant.short_label);
            println!("{heading:<width$} {}", variant.dir.display());
        }
        println!("{:<width$} {}\n", "Output:", self.config.output.display());
    }

    /// Reads each variant's log in order, baseline first.
    pub fn load_variants(&self) -> anyhow::Result<Vec<VariantRun>> {
        println!("Parsing training logs...");
        let mut runs = Vec::with_capacity(self.config.variants.len());
        for variant in &self.config.variants {
            let log_path = variant.log_path();
            let extraction = load_training_log(&log_path)
                .with_context(|| format!("loading {} log", variant.short_label))?;
            let skipped_lines = extraction.counters.skipped();
            match &extraction.series {
                Some(series) if skipped_lines > 0 => println!(
                    "  ✓ {}: {} steps parsed ({} lines skipped)",
                    variant.short_label,
                    series.len(),
                    skipped_lines
                ),
                Some(series) => {
                    println!("  ✓ {}: {} steps parsed", variant.short_label, series.len())
                }
                None => eprintln!(
                    "warning: could not parse {} log ({})",
                    variant.short_label.to_lowercase(),
                    log_path.display()
                ),
            }
            runs.push(VariantRun {
                config: variant.clone(),
                series: extraction.series,
                skipped_lines,
                summary: None,
            });
        }
        Ok(runs)
    }

    fn render_charts(&self, runs: &[VariantRun]) -> anyhow::Result<Vec<PathBuf>> {
        let colors = variant_colors(runs.len());
        let plotted: Vec<PlotSeries<'_>> = runs
            .iter()
            .zip(colors)
            .filter_map(|(run, color)| {
                run.series.as_ref().map(|series| PlotSeries {
                    label: &run.config.label,
                    short_label: &run.config.short_label,
                    color,
                    series,
                })
            })
            .collect();

        let ((tw, th), (cw, ch)) = self.arity.figure_inches();
        let total_path = self.config.output.join(self.arity.total_chart_name());
        render_total_loss(
            &total_path,
            self.arity.total_chart_title(),
            &plotted,
            figure_size(tw, th),
        )
        .with_context(|| format!("rendering {}", total_path.display()))?;
        println!("Loss comparison plot saved: {}", total_path.display());

        let components_path = self.config.output.join(self.arity.components_chart_name());
        render_component_grid(&components_path, &plotted, figure_size(cw, ch))
            .with_context(|| format!("rendering {}", components_path.display()))?;
        println!("Components plot saved: {}", components_path.display());

        Ok(vec![total_path, components_path])
    }

    pub fn execute(&self) -> anyhow::Result<ComparisonResult> {
        self.print_header();
        let mut runs = self.load_variants()?;

        println!("\nCalculating metrics...");
        for run in &mut runs {
            run.summary = run.series.as_ref().and_then(RunSummary::from_series);
        }

        let mut charts = Vec::new();
        if self.render && runs.iter().any(|run| run.series.is_some()) {
            println!("\nGenerating plots...");
            charts = self.render_charts(&runs)?;
        }

        let named: Option<Vec<NamedSummary<'_>>> = runs
            .iter()
            .map(|run| {
                run.summary
                    .as_ref()
                    .map(|summary| NamedSummary::new(&run.config.short_label, summary))
            })
            .collect();
        let report = named.map(|named| format_comparison(&named));
        match &report {
            Some(text) => println!("{text}"),
            None => eprintln!("\nerror: {INSUFFICIENT_DATA}"),
        }
        info!(
            "comparison finished: {} variants, {} charts",
            runs.len(),
            charts.len()
        );
        println!("Analysis complete!\n");

        Ok(ComparisonResult {
            runs,
            report,
            charts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_log(dir: &Path, totals: &[f64]) {
        fs::create_dir_all(dir).unwrap();
        let text: String = totals
            .iter()
            .map(|t| format!("lr: 1.00, l_total: {t:.4}, l_percep: 0.0100\n"))
            .collect();
        fs::write(dir.join("training.log"), text).unwrap();
    }

    #[test]
    fn runner_summarizes_every_variant() {
        let root = tempdir().unwrap();
        let base = root.path().join("baseline");
        let improved = root.path().join("improved");
        write_log(&base, &[1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.05]);
        write_log(&improved, &[0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.05, 0.04, 0.02]);

        let cfg = ComparisonConfig::two_way(base, improved, root.path().join("analysis"));
        let result = Runner::new(cfg).unwrap().without_charts().execute().unwrap();

        assert_eq!(result.runs.len(), 2);
        assert_eq!(result.runs[0].summary.as_ref().unwrap().convergence_step, Some(10));
        let report = result.report.unwrap();
        assert!(report.contains("Final Total Loss"));
        assert!(result.charts.is_empty());
    }

    #[test]
    fn missing_variant_yields_no_report() {
        let root = tempdir().unwrap();
        let base = root.path().join("baseline");
        write_log(&base, &[1.0, 0.5]);

        let cfg = ComparisonConfig::three_way(
            base,
            root.path().join("dynamic"),
            root.path().join("full"),
            root.path().join("analysis_3way"),
        );
        let result = Runner::new(cfg).unwrap().without_charts().execute().unwrap();

        assert!(result.runs[0].series.is_some());
        assert!(result.runs[1].series.is_none());
        assert!(result.runs[2].summary.is_none());
        assert!(result.report.is_none());
    }

    #[test]
    fn skipped_lines_are_counted_per_variant() {
        let root = tempdir().unwrap();
        let base = root.path().join("baseline");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("training.log"), "l_total: 1.0\nl_total: 1.2.3\n").unwrap();

        let cfg = ComparisonConfig::two_way(base, root.path().join("none"), root.path().join("out"));
        let runs = Runner::new(cfg).unwrap().load_variants().unwrap();
        assert_eq!(runs[0].skipped_lines, 1);
        assert_eq!(runs[0].series.as_ref().unwrap().len(), 1);
    }
}
