use anyhow::Context;
use sketchcore::opacity::{analyze_svg_file, LabelRules, OpacityProfile, ResolverChain};
use sketchcore::report::format_pruning_report;
use sketchviz::geometry::figure_size;
use sketchviz::render_pruning_dashboard;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Dashboard figure size in inches.
const DASHBOARD_INCHES: (f64, f64) = (14.0, 10.0);

pub struct PruningRunner {
    labels: LabelRules,
    chain: ResolverChain,
}

impl PruningRunner {
    pub fn new(labels: LabelRules) -> Self {
        Self {
            labels,
            chain: ResolverChain::default(),
        }
    }

    /// Profiles each file in order. Missing files are reported and left out;
    /// malformed markup aborts the run.
    pub fn analyze(&self, files: &[PathBuf]) -> anyhow::Result<Vec<OpacityProfile>> {
        let mut profiles = Vec::with_capacity(files.len());
        for file in files {
            match analyze_svg_file(file, &self.labels, &self.chain)
                .with_context(|| format!("analyzing {}", file.display()))?
            {
                Some(profile) => profiles.push(profile),
                None => eprintln!("warning: file not found: {}", file.display()),
            }
        }
        Ok(profiles)
    }

    pub fn report(&self, profiles: &[OpacityProfile]) -> String {
        format_pruning_report(profiles)
    }

    pub fn render(&self, profiles: &[OpacityProfile], output: &Path) -> anyhow::Result<()> {
        let (w, h) = DASHBOARD_INCHES;
        render_pruning_dashboard(output, profiles, figure_size(w, h))
            .with_context(|| format!("rendering {}", output.display()))?;
        println!("✓ Visualization saved to: {}", output.display());
        Ok(())
    }
}

/// Analyzes, reports and renders. Fails with no image written when none of
/// `files` could be analyzed.
pub fn run_pruning(
    runner: &PruningRunner,
    files: &[PathBuf],
    output: &Path,
    no_plot: bool,
) -> anyhow::Result<ExitCode> {
    let profiles = runner.analyze(files).context("analyzing SVG files")?;
    if profiles.is_empty() {
        eprintln!("error: no valid SVG files found");
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", runner.report(&profiles));
    if !no_plot {
        runner.render(&profiles, output)?;
    }
    Ok(ExitCode::SUCCESS)
}

impl Default for PruningRunner {
    fn default() -> Self {
        Self::new(LabelRules::default())
    }
}
