/// Secondary loss terms reported next to the total on each progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    ClipFc,
    ClipConv,
    Perceptual,
    Sds,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::ClipFc,
        Component::ClipConv,
        Component::Perceptual,
        Component::Sds,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Component::ClipFc => "CLIP FC Loss",
            Component::ClipConv => "CLIP Conv Loss",
            Component::Perceptual => "Perceptual Loss",
            Component::Sds => "SDS Gradient",
        }
    }
}

/// One recognized log line. Components absent from the line stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub total: f64,
    pub clip_fc: Option<f64>,
    pub clip_conv: Option<f64>,
    pub percep: Option<f64>,
    pub sds: Option<f64>,
}

impl StepRecord {
    pub fn component(&self, component: Component) -> Option<f64> {
        match component {
            Component::ClipFc => self.clip_fc,
            Component::ClipConv => self.clip_conv,
            Component::Perceptual => self.percep,
            Component::Sds => self.sds,
        }
    }
}

/// Per-step loss history with dense 1-based steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    records: Vec<StepRecord>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, numbering it after the ones already held.
    pub fn push(
        &mut self,
        total: f64,
        clip_fc: Option<f64>,
        clip_conv: Option<f64>,
        percep: Option<f64>,
        sds: Option<f64>,
    ) {
        let step = self.records.len() + 1;
        self.records.push(StepRecord {
            step,
            total,
            clip_fc,
            clip_conv,
            percep,
            sds,
        });
    }

    pub fn from_totals(totals: &[f64]) -> Self {
        let mut series = Self::new();
        for &total in totals {
            series.push(total, None, None, None, None);
        }
        series
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn totals(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.total).collect()
    }

    pub fn total_points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.step as f64, r.total))
            .collect()
    }

    /// Steps where `component` was recorded; missing steps are dropped, not
    /// interpolated.
    pub fn component_points(&self, component: Component) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.component(component).map(|v| (r.step as f64, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_numbers_steps_densely_from_one() {
        let series = TimeSeries::from_totals(&[3.0, 2.0, 1.0]);
        let steps: Vec<usize> = series.records().iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![1, 2, 3]);
    }

    #[test]
    fn component_points_skip_missing_steps() {
        let mut series = TimeSeries::new();
        series.push(1.0, Some(0.5), None, None, None);
        series.push(0.9, None, None, None, None);
        series.push(0.8, Some(0.3), None, None, None);
        assert_eq!(
            series.component_points(Component::ClipFc),
            vec![(1.0, 0.5), (3.0, 0.3)]
        );
        assert!(series.component_points(Component::Sds).is_empty());
    }
}
