/// Tally of what a log scan saw, kept alongside the extracted series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounters {
    candidates: usize,
    parsed: usize,
    skipped: usize,
}

impl ScanCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_parsed(&mut self) {
        self.candidates += 1;
        self.parsed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.candidates += 1;
        self.skipped += 1;
    }

    /// Lines carrying the total-loss marker, parsed or not.
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    pub fn parsed(&self) -> usize {
        self.parsed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_candidates_as_sum() {
        let mut counters = ScanCounters::new();
        counters.record_parsed();
        counters.record_parsed();
        counters.record_skipped();
        assert_eq!(counters.candidates(), 3);
        assert_eq!(counters.parsed(), 2);
        assert_eq!(counters.skipped(), 1);
    }
}
