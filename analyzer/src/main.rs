use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use workflow::config::{load_label_rules, ComparisonConfig};
use workflow::pruning::{run_pruning, PruningRunner};
use workflow::runner::Runner;

mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Loss-curve and pruning analysis for sketch benchmarks")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare a baseline run against an improved run
    Compare {
        #[arg(long, default_value = "./workdir/baseline_test")]
        baseline: PathBuf,
        #[arg(long, default_value = "./workdir/improved_test")]
        improved: PathBuf,
        /// Directory receiving the charts
        #[arg(long, default_value = "./workdir/analysis")]
        output: PathBuf,
        /// Load variants and output directory from YAML instead
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        no_plot: bool,
    },
    /// Compare baseline, dynamic-weights and full-improved runs
    Compare3 {
        #[arg(long, default_value = "./workdir/baseline_test")]
        baseline: PathBuf,
        #[arg(long, default_value = "./workdir/dynamic_weights_test")]
        dynamic: PathBuf,
        #[arg(long, default_value = "./workdir/full_improved_test")]
        full: PathBuf,
        /// Directory receiving the charts
        #[arg(long, default_value = "./workdir/analysis_3way")]
        output: PathBuf,
        /// Load variants and output directory from YAML instead
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        no_plot: bool,
    },
    /// Profile stroke opacity in SVG outputs to judge pruning
    Pruning {
        /// SVG files to analyze; the first is treated as the baseline
        #[arg(required = true)]
        svg_files: Vec<PathBuf>,
        #[arg(short, long, default_value = "pruning_analysis.png")]
        output: PathBuf,
        #[arg(long, default_value_t = false)]
        no_plot: bool,
        /// YAML list of {pattern, label} rules for naming files
        #[arg(long)]
        labels: Option<PathBuf>,
    },
}

fn run_comparison(config: ComparisonConfig, no_plot: bool) -> anyhow::Result<ExitCode> {
    let mut runner = Runner::new(config)?;
    if no_plot {
        runner = runner.without_charts();
    }
    runner.execute()?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Compare {
            baseline,
            improved,
            output,
            config,
            no_plot,
        } => {
            let config = match config {
                Some(path) => ComparisonConfig::load(path)?,
                None => ComparisonConfig::two_way(baseline, improved, output),
            };
            run_comparison(config, no_plot)
        }
        Command::Compare3 {
            baseline,
            dynamic,
            full,
            output,
            config,
            no_plot,
        } => {
            let config = match config {
                Some(path) => ComparisonConfig::load(path)?,
                None => ComparisonConfig::three_way(baseline, dynamic, full, output),
            };
            run_comparison(config, no_plot)
        }
        Command::Pruning {
            svg_files,
            output,
            no_plot,
            labels,
        } => {
            let runner = match labels {
                Some(path) => PruningRunner::new(load_label_rules(path)?),
                None => PruningRunner::default(),
            };
            run_pruning(&runner, &svg_files, &output, no_plot)
        }
    }
}
