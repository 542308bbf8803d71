use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use sketchcore::opacity::LabelRules;
use std::fs;
use std::path::{Path, PathBuf};

/// Log file expected inside every run directory.
pub const TRAINING_LOG: &str = "training.log";

/// One experiment run taking part in a comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Legend text on the total-loss chart.
    pub label: String,
    /// Column heading and component-chart legend text.
    pub short_label: String,
    pub dir: PathBuf,
}

impl VariantConfig {
    pub fn new(label: &str, short_label: &str, dir: PathBuf) -> Self {
        Self {
            label: label.to_string(),
            short_label: short_label.to_string(),
            dir,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(TRAINING_LOG)
    }
}

/// Comparison width, which fixes chart names, titles and sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Two,
    Three,
}

impl Arity {
    pub fn total_chart_name(self) -> &'static str {
        match self {
            Arity::Two => "loss_comparison.png",
            Arity::Three => "loss_comparison_3way.png",
        }
    }

    pub fn components_chart_name(self) -> &'static str {
        match self {
            Arity::Two => "loss_components.png",
            Arity::Three => "loss_components_3way.png",
        }
    }

    pub fn total_chart_title(self) -> &'static str {
        match self {
            Arity::Two => "Training Loss Comparison: Baseline vs Improved",
            Arity::Three => "Training Loss Comparison: Three-Way Benchmark",
        }
    }

    /// Figure sizes in inches: (total chart, component grid).
    pub fn figure_inches(self) -> ((f64, f64), (f64, f64)) {
        match self {
            Arity::Two => ((12.0, 6.0), (14.0, 10.0)),
            Arity::Three => ((14.0, 7.0), (16.0, 12.0)),
        }
    }

    pub fn rule_width(self) -> usize {
        match self {
            Arity::Two => 80,
            Arity::Three => 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub variants: Vec<VariantConfig>,
    pub output: PathBuf,
}

impl ComparisonConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading comparison config {}", path_ref.display()))?;
        let config: ComparisonConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing comparison config {}", path_ref.display()))?;
        config
            .arity()
            .with_context(|| format!("validating comparison config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn two_way(baseline: PathBuf, improved: PathBuf, output: PathBuf) -> Self {
        Self {
            variants: vec![
                VariantConfig::new("Baseline", "Baseline", baseline),
                VariantConfig::new("Improved (Curriculum + Dynamic Weights)", "Improved", improved),
            ],
            output,
        }
    }

    pub fn three_way(baseline: PathBuf, dynamic: PathBuf, full: PathBuf, output: PathBuf) -> Self {
        Self {
            variants: vec![
                VariantConfig::new("Baseline (No Improvements)", "Baseline", baseline),
                VariantConfig::new("Dynamic Weights Only", "Dynamic Weights", dynamic),
                VariantConfig::new(
                    "Full Improved (Dynamic Weights + Curriculum)",
                    "Full Improved",
                    full,
                ),
            ],
            output,
        }
    }

    pub fn arity(&self) -> anyhow::Result<Arity> {
        match self.variants.len() {
            2 => Ok(Arity::Two),
            3 => Ok(Arity::Three),
            n => bail!("expected 2 or 3 variants, found {n}"),
        }
    }
}

/// Replaces the built-in SVG label table with rules read from YAML.
pub fn load_label_rules<P: AsRef<Path>>(path: P) -> anyhow::Result<LabelRules> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading label rules {}", path_ref.display()))?;
    let rules: LabelRules = serde_yaml::from_str(&contents)
        .with_context(|| format!("parsing label rules {}", path_ref.display()))?;
    Ok(rules)
}
