use crate::geometry::{category_label, histogram_bins};
use crate::loss::prepare_output;
use crate::palette::{bar_color, cycle_color};
use anyhow::{Context, Result};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, TextStyle};
use sketchcore::opacity::{OpacityBucket, OpacityProfile};
use std::path::Path;

pub const HISTOGRAM_BINS: usize = 50;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Shared histogram range: at least `[0, 1]`, widened to cover any finite
/// out-of-range opacity.
fn opacity_span(profiles: &[OpacityProfile]) -> (f64, f64) {
    profiles
        .iter()
        .flat_map(|p| p.opacities.iter().copied())
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 1.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn draw_histogram(area: &Area<'_>, profiles: &[OpacityProfile]) -> Result<()> {
    let (lo, hi) = opacity_span(profiles);
    let width = (hi - lo) / HISTOGRAM_BINS as f64;
    let binned: Vec<Vec<usize>> = profiles
        .iter()
        .map(|p| histogram_bins(&p.opacities, lo, hi, HISTOGRAM_BINS))
        .collect();
    let peak = binned.iter().flatten().copied().max().unwrap_or(0).max(1);

    let mut chart = ChartBuilder::on(area)
        .caption("Opacity Distribution", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(lo..hi, 0.0..peak as f64 * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Stroke Opacity")
        .y_desc("Count")
        .axis_desc_style(("sans-serif", 22))
        .label_style(("sans-serif", 18))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    for (index, (profile, counts)) in profiles.iter().zip(&binned).enumerate() {
        let color = cycle_color(index).mix(0.6);
        chart
            .draw_series(counts.iter().enumerate().filter(|&(_, &c)| c > 0).map(
                |(bin, &count)| {
                    let x0 = lo + bin as f64 * width;
                    Rectangle::new([(x0, 0.0), (x0 + width, count as f64)], color.filled())
                },
            ))?
            .label(profile.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 20, y + 8)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 18))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;
    Ok(())
}

fn draw_categories(area: &Area<'_>, profiles: &[OpacityProfile]) -> Result<()> {
    let names: Vec<String> = OpacityBucket::ALL
        .iter()
        .map(|b| b.label().to_string())
        .collect();
    let peak = profiles
        .iter()
        .flat_map(|p| OpacityBucket::ALL.map(|b| p.buckets.count(b)))
        .max()
        .unwrap_or(0)
        .max(1);
    let slot = 0.8 / profiles.len().max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption("Stroke Category Breakdown", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..names.len() as f64, 0.0..peak as f64 * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len() * 2 + 1)
        .x_label_formatter(&|x| category_label(*x, &names))
        .x_desc("Stroke Category")
        .y_desc("Count")
        .axis_desc_style(("sans-serif", 22))
        .label_style(("sans-serif", 18))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    for (index, profile) in profiles.iter().enumerate() {
        let color = cycle_color(index).mix(0.8);
        chart
            .draw_series(OpacityBucket::ALL.iter().enumerate().map(|(cat, &bucket)| {
                let x0 = cat as f64 + 0.1 + index as f64 * slot;
                let count = profile.buckets.count(bucket) as f64;
                Rectangle::new([(x0, 0.0), (x0 + slot, count)], color.filled())
            }))?
            .label(profile.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 20, y + 8)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 18))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;
    Ok(())
}

/// One labelled bar per file.
fn draw_named_bars(
    area: &Area<'_>,
    caption: &str,
    y_desc: &str,
    names: &[String],
    values: &[f64],
    annotate: impl Fn(f64) -> String,
) -> Result<()> {
    let peak = values.iter().copied().fold(0.0, f64::max).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..names.len().max(1) as f64, 0.0..peak * 1.15)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len() * 2 + 1)
        .x_label_formatter(&|x| category_label(*x, names))
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 22))
        .label_style(("sans-serif", 18))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(index, &value)| {
        let x0 = index as f64 + 0.1;
        Rectangle::new(
            [(x0, 0.0), (x0 + 0.8, value)],
            bar_color(index).mix(0.8).filled(),
        )
    }))?;

    let label_style = TextStyle::from(("sans-serif", 20).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(values.iter().enumerate().map(|(index, &value)| {
        Text::new(annotate(value), (index as f64 + 0.5, value), label_style.clone())
    }))?;
    Ok(())
}

/// 2x2 pruning dashboard: opacity histograms, bucket breakdown, stroke
/// totals and file sizes, one series or bar per profile.
pub fn render_pruning_dashboard(
    path: &Path,
    profiles: &[OpacityProfile],
    size: (u32, u32),
) -> Result<()> {
    prepare_output(path)?;
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Pruning Effectiveness Analysis",
        ("sans-serif", 40).into_font().style(FontStyle::Bold),
    )?;

    let areas = root.split_evenly((2, 2));
    let names: Vec<String> = profiles.iter().map(|p| p.name.clone()).collect();
    let totals: Vec<f64> = profiles.iter().map(|p| p.total() as f64).collect();
    let sizes_kb: Vec<f64> = profiles.iter().map(|p| p.file_size_kb()).collect();

    draw_histogram(&areas[0], profiles).context("drawing opacity histogram")?;
    draw_categories(&areas[1], profiles).context("drawing category breakdown")?;
    draw_named_bars(
        &areas[2],
        "Final Stroke Count",
        "Total Strokes",
        &names,
        &totals,
        |v| format!("{}", v as u64),
    )
    .context("drawing stroke counts")?;
    draw_named_bars(
        &areas[3],
        "SVG File Size",
        "File Size (KB)",
        &names,
        &sizes_kb,
        |v| format!("{v:.1}KB"),
    )
    .context("drawing file sizes")?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("pruning dashboard written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn profile(opacities: Vec<f64>) -> OpacityProfile {
        OpacityProfile::new("p".into(), PathBuf::from("p.svg"), opacities, 0)
    }

    #[test]
    fn span_defaults_to_unit_interval() {
        assert_eq!(opacity_span(&[profile(vec![0.2, 0.4])]), (0.0, 1.0));
        assert_eq!(opacity_span(&[]), (0.0, 1.0));
    }

    #[test]
    fn span_widens_for_out_of_range_values() {
        let profiles = [profile(vec![-0.5, 0.3]), profile(vec![1.5, f64::NAN])];
        assert_eq!(opacity_span(&profiles), (-0.5, 1.5));
    }
}
