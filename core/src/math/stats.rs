pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Middle value of the sorted samples; the two middle values are averaged
    /// for even lengths.
    pub fn median(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / 2.0)
        } else {
            Some(sorted[mid])
        }
    }

    pub fn min(values: &[f64]) -> Option<f64> {
        values.iter().copied().reduce(f64::min)
    }

    /// Relative drop from `before` to `after` in percent. Positive when
    /// `after` is smaller. Undefined for a zero baseline.
    pub fn percent_decrease(before: f64, after: f64) -> Option<f64> {
        if before == 0.0 {
            return None;
        }
        Some((before - after) / before * 100.0)
    }
}
