use std::ops::Range;

/// Raster density used for every chart.
pub const DPI: f64 = 150.0;

/// Pixel dimensions of a figure given in inches.
pub fn figure_size(width_in: f64, height_in: f64) -> (u32, u32) {
    ((width_in * DPI).round() as u32, (height_in * DPI).round() as u32)
}

/// Padded y-range covering every finite value. Falls back to `0..1` when
/// nothing finite is present.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (hi.abs() * 0.05).max(0.05)
    };
    (lo - pad)..(hi + pad)
}

/// x-range for 1-based steps up to `last_step`.
pub fn step_range(last_step: usize) -> Range<f64> {
    1.0..(last_step.max(2) as f64)
}

/// Equal-width histogram over `[lo, hi]`; the last bin includes `hi`.
/// Values outside the range and non-finite values are dropped.
pub fn histogram_bins(values: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0; bins];
    if bins == 0 || hi <= lo {
        return counts;
    }
    let width = (hi - lo) / bins as f64;
    for &v in values {
        if !v.is_finite() || v < lo || v > hi {
            continue;
        }
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

/// Axis label for a categorical axis whose categories are centred on
/// `i + 0.5`. Ticks between categories get an empty label.
pub fn category_label(position: f64, names: &[String]) -> String {
    let idx = (position - 0.5).round();
    if (position - 0.5 - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_size_uses_dpi() {
        assert_eq!(figure_size(12.0, 6.0), (1800, 900));
        assert_eq!(figure_size(16.0, 12.0), (2400, 1800));
    }

    #[test]
    fn value_range_pads_and_handles_degenerate_input() {
        let range = value_range([1.0, 3.0]);
        assert!((range.start - 0.9).abs() < 1e-12);
        assert!((range.end - 3.1).abs() < 1e-12);
        assert_eq!(value_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(value_range([f64::NAN]), 0.0..1.0);
        let flat = value_range([2.0, 2.0]);
        assert!(flat.start < 2.0 && flat.end > 2.0);
    }

    #[test]
    fn histogram_counts_every_in_range_value() {
        let counts = histogram_bins(&[0.0, 0.05, 0.5, 1.0, 1.5, f64::NAN], 0.0, 1.0, 10);
        assert_eq!(counts.iter().sum::<usize>(), 4);
        assert_eq!(counts[0], 2);
        assert_eq!(counts[5], 1);
        assert_eq!(counts[9], 1);
    }

    #[test]
    fn category_labels_sit_on_half_ticks() {
        let names = vec!["Dead".to_string(), "Ghost".to_string()];
        assert_eq!(category_label(0.5, &names), "Dead");
        assert_eq!(category_label(1.5, &names), "Ghost");
        assert_eq!(category_label(1.0, &names), "");
        assert_eq!(category_label(2.5, &names), "");
    }
}
