use crate::math::stats::StatsHelper;
use crate::metrics::series::TimeSeries;

/// Records averaged to form the initial loss level.
pub const WARMUP_STEPS: usize = 10;

/// Share of the observed improvement that counts as converged.
pub const CONVERGENCE_FRACTION: f64 = 0.9;

/// Scalar reduction of one run's loss history.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub final_total_loss: f64,
    pub min_total_loss: f64,
    pub avg_total_loss: f64,
    /// First step reaching 90% of the improvement; only for runs longer
    /// than the warmup window.
    pub convergence_step: Option<usize>,
    /// Percent drop from the warmup mean to the final loss.
    pub loss_reduction: Option<f64>,
}

impl RunSummary {
    /// `None` for an empty series.
    pub fn from_series(series: &TimeSeries) -> Option<Self> {
        let totals = series.totals();
        let final_total_loss = *totals.last()?;
        let min_total_loss = StatsHelper::min(&totals)?;
        let avg_total_loss = StatsHelper::mean(&totals)?;

        let mut summary = RunSummary {
            final_total_loss,
            min_total_loss,
            avg_total_loss,
            convergence_step: None,
            loss_reduction: None,
        };

        if totals.len() > WARMUP_STEPS {
            let initial_loss = StatsHelper::mean(&totals[..WARMUP_STEPS])?;
            summary.loss_reduction = StatsHelper::percent_decrease(initial_loss, final_total_loss);

            let target = initial_loss - CONVERGENCE_FRACTION * (initial_loss - final_total_loss);
            summary.convergence_step = series
                .records()
                .iter()
                .find(|record| record.total <= target)
                .map(|record| record.step);
        }

        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECAY: [f64; 11] = [1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.05];

    #[test]
    fn empty_series_has_no_summary() {
        assert!(RunSummary::from_series(&TimeSeries::new()).is_none());
    }

    #[test]
    fn short_runs_leave_convergence_undefined() {
        let summary = RunSummary::from_series(&TimeSeries::from_totals(&DECAY[..10])).unwrap();
        assert_eq!(summary.final_total_loss, 0.1);
        assert_eq!(summary.min_total_loss, 0.1);
        assert!((summary.avg_total_loss - 0.55).abs() < 1e-12);
        assert_eq!(summary.convergence_step, None);
        assert_eq!(summary.loss_reduction, None);
    }

    #[test]
    fn decaying_run_converges_at_step_ten() {
        let summary = RunSummary::from_series(&TimeSeries::from_totals(&DECAY)).unwrap();
        assert_eq!(summary.final_total_loss, 0.05);
        assert_eq!(summary.min_total_loss, 0.05);
        let reduction = summary.loss_reduction.unwrap();
        assert!((reduction - 90.909).abs() < 0.01, "reduction {reduction}");
        assert_eq!(summary.convergence_step, Some(10));
    }

    #[test]
    fn convergence_step_is_first_record_at_or_below_target() {
        let mut totals = vec![2.0; 10];
        totals.extend([1.5, 1.1, 0.9, 1.2, 1.0]);
        let series = TimeSeries::from_totals(&totals);
        let summary = RunSummary::from_series(&series).unwrap();
        // target = 2.0 - 0.9 * (2.0 - 1.0) = 1.1
        let step = summary.convergence_step.unwrap();
        assert_eq!(step, 12);
        assert!(series.records()[step - 1].total <= 1.1);
        assert!(series.records()[..step - 1].iter().all(|r| r.total > 1.1));
    }

    #[test]
    fn rising_loss_reports_negative_reduction() {
        let mut totals = vec![1.0; 10];
        totals.push(1.5);
        let summary = RunSummary::from_series(&TimeSeries::from_totals(&totals)).unwrap();
        assert_eq!(summary.loss_reduction, Some(-50.0));
        // target sits above the initial level, so the first step qualifies
        assert_eq!(summary.convergence_step, Some(1));
    }
}
