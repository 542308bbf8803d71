use crate::geometry::{step_range, value_range};
use anyhow::{Context, Result};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use sketchcore::metrics::{Component, TimeSeries};
use std::fs;
use std::path::Path;

/// One run as drawn on a chart.
#[derive(Debug, Clone, Copy)]
pub struct PlotSeries<'a> {
    /// Legend text on the total-loss chart.
    pub label: &'a str,
    /// Legend text on the component sub-charts.
    pub short_label: &'a str,
    pub color: RGBColor,
    pub series: &'a TimeSeries,
}

/// Creates the parent directory of a chart path if needed.
pub(crate) fn prepare_output(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    Ok(())
}

fn last_step<'a>(runs: impl IntoIterator<Item = &'a [(f64, f64)]>) -> usize {
    runs.into_iter()
        .filter_map(|points| points.last())
        .map(|&(step, _)| step as usize)
        .max()
        .unwrap_or(1)
}

/// Overlays the total loss of every run. Runs with no records are skipped.
pub fn render_total_loss(
    path: &Path,
    title: &str,
    runs: &[PlotSeries<'_>],
    size: (u32, u32),
) -> Result<()> {
    prepare_output(path)?;
    let lines: Vec<(PlotSeries<'_>, Vec<(f64, f64)>)> = runs
        .iter()
        .filter(|run| !run.series.is_empty())
        .map(|run| (*run, run.series.total_points()))
        .collect();

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = step_range(last_step(lines.iter().map(|(_, p)| p.as_slice())));
    let y_range = value_range(lines.iter().flat_map(|(_, p)| p.iter().map(|&(_, y)| y)));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 36))
        .margin(30)
        .x_label_area_size(70)
        .y_label_area_size(100)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Training Step")
        .y_desc("Total Loss")
        .axis_desc_style(("sans-serif", 26))
        .label_style(("sans-serif", 20))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    for (run, points) in lines {
        let color = run.color.mix(0.8);
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(3)))?
            .label(run.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], color.stroke_width(3)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 24))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("total loss chart written to {}", path.display());
    Ok(())
}

fn draw_component(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    component: Component,
    runs: &[PlotSeries<'_>],
) -> Result<()> {
    // A run never reporting this component is left off its sub-chart.
    let lines: Vec<(PlotSeries<'_>, Vec<(f64, f64)>)> = runs
        .iter()
        .map(|run| (*run, run.series.component_points(component)))
        .filter(|(_, points)| !points.is_empty())
        .collect();

    let x_range = step_range(last_step(lines.iter().map(|(_, p)| p.as_slice())));
    let y_range = value_range(lines.iter().flat_map(|(_, p)| p.iter().map(|&(_, y)| y)));

    let mut chart = ChartBuilder::on(area)
        .caption(component.title(), ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Training Step")
        .y_desc(component.title())
        .axis_desc_style(("sans-serif", 22))
        .label_style(("sans-serif", 18))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    if lines.is_empty() {
        return Ok(());
    }

    for (run, points) in lines {
        let color = run.color.mix(0.7);
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(run.short_label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 20))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;
    Ok(())
}

/// 2x2 grid with one sub-chart per loss component.
pub fn render_component_grid(path: &Path, runs: &[PlotSeries<'_>], size: (u32, u32)) -> Result<()> {
    prepare_output(path)?;
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((2, 2));
    for (area, component) in areas.iter().zip(Component::ALL) {
        draw_component(area, component, runs)
            .with_context(|| format!("drawing {} sub-chart", component.title()))?;
    }

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("component chart written to {}", path.display());
    Ok(())
}
