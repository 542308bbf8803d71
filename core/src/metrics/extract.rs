use crate::metrics::series::TimeSeries;
use crate::prelude::{AnalysisError, AnalysisResult};
use crate::telemetry::ScanCounters;
use log::debug;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::num::ParseFloatError;
use std::path::Path;
use std::sync::OnceLock;

/// Substring every progress line carries next to its total loss.
pub const TOTAL_MARKER: &str = "l_total:";

/// Result of scanning one log: the series (if any line was recognized) and
/// how many candidate lines had to be dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub series: Option<TimeSeries>,
    pub counters: ScanCounters,
}

impl Extraction {
    pub fn into_series(self) -> Option<TimeSeries> {
        self.series
    }
}

struct LinePatterns {
    total: Regex,
    clip_fc: Regex,
    clip_conv: Regex,
    percep: Regex,
    sds: Regex,
}

fn patterns() -> &'static LinePatterns {
    static PATTERNS: OnceLock<LinePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| LinePatterns {
        total: Regex::new(r"l_total:\s*([\d.]+)").expect("total pattern must compile"),
        clip_fc: Regex::new(r"l_clip_fc:\s*([\d.]+)").expect("clip_fc pattern must compile"),
        clip_conv: Regex::new(r"l_clip_conv\(\d+\):\s*([\d.]+)")
            .expect("clip_conv pattern must compile"),
        percep: Regex::new(r"l_percep:\s*([\d.]+)").expect("percep pattern must compile"),
        sds: Regex::new(r"sds:\s*([\d.]+e[+-]?\d+)").expect("sds pattern must compile"),
    })
}

fn capture(pattern: &Regex, line: &str) -> Result<Option<f64>, ParseFloatError> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse::<f64>())
        .transpose()
}

struct LineValues {
    total: f64,
    clip_fc: Option<f64>,
    clip_conv: Option<f64>,
    percep: Option<f64>,
    sds: Option<f64>,
}

/// `Ok(None)` when the total pattern does not match; `Err` when any matched
/// number fails to parse.
fn parse_line(line: &str) -> Result<Option<LineValues>, ParseFloatError> {
    let p = patterns();
    let Some(total) = capture(&p.total, line)? else {
        return Ok(None);
    };
    Ok(Some(LineValues {
        total,
        clip_fc: capture(&p.clip_fc, line)?,
        clip_conv: capture(&p.clip_conv, line)?,
        percep: capture(&p.percep, line)?,
        sds: capture(&p.sds, line)?,
    }))
}

/// Scans log text for loss reports. Lines without the total marker are
/// ignored; marked lines that fail to parse are skipped and counted.
pub fn parse_log_text(text: &str) -> Extraction {
    let mut series = TimeSeries::new();
    let mut counters = ScanCounters::new();

    for (line_no, line) in text.lines().enumerate() {
        if !line.contains(TOTAL_MARKER) {
            continue;
        }
        match parse_line(line) {
            Ok(Some(values)) => {
                series.push(
                    values.total,
                    values.clip_fc,
                    values.clip_conv,
                    values.percep,
                    values.sds,
                );
                counters.record_parsed();
            }
            Ok(None) => {
                debug!("line {}: no numeric total after marker", line_no + 1);
                counters.record_skipped();
            }
            Err(err) => {
                debug!("line {}: skipped ({})", line_no + 1, err);
                counters.record_skipped();
            }
        }
    }

    Extraction {
        series: (!series.is_empty()).then_some(series),
        counters,
    }
}

/// Reads and scans a training log. A missing file yields an empty
/// extraction rather than an error.
pub fn load_training_log<P: AsRef<Path>>(path: P) -> AnalysisResult<Extraction> {
    let path_ref = path.as_ref();
    let bytes = match fs::read(path_ref) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("training log {} not found", path_ref.display());
            return Ok(Extraction {
                series: None,
                counters: ScanCounters::new(),
            });
        }
        Err(err) => return Err(AnalysisError::io(path_ref, err)),
    };
    let extraction = parse_log_text(&String::from_utf8_lossy(&bytes));
    debug!(
        "{}: {} records, {} skipped",
        path_ref.display(),
        extraction.counters.parsed(),
        extraction.counters.skipped()
    );
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::series::Component;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const FULL_LINE: &str = "lr: 1.00, l_total: 0.1234, l_clip_fc: 0.0123, \
        l_clip_conv(4): 0.0456, l_percep: 0.0789, sds: 1.5e-03";

    #[test]
    fn full_line_yields_every_component() {
        let series = parse_log_text(FULL_LINE).into_series().unwrap();
        let record = &series.records()[0];
        assert_eq!(record.step, 1);
        assert_eq!(record.total, 0.1234);
        assert_eq!(record.clip_fc, Some(0.0123));
        assert_eq!(record.clip_conv, Some(0.0456));
        assert_eq!(record.percep, Some(0.0789));
        assert_eq!(record.sds, Some(1.5e-3));
    }

    #[test]
    fn missing_sds_marker_is_none_not_zero() {
        let series = parse_log_text("l_total: 0.5, l_percep: 0.2")
            .into_series()
            .unwrap();
        assert_eq!(series.records()[0].component(Component::Sds), None);
        assert_eq!(series.records()[0].percep, Some(0.2));
    }

    #[test]
    fn steps_count_recognized_lines_not_source_lines() {
        let text = "epoch start\nl_total: 1.0\nnoise\n\nl_total: 0.9\nl_total: 0.8\n";
        let series = parse_log_text(text).into_series().unwrap();
        let steps: Vec<usize> = series.records().iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![1, 2, 3]);
        assert_eq!(series.totals(), vec![1.0, 0.9, 0.8]);
    }

    #[test]
    fn malformed_lines_are_skipped_and_counted() {
        let text = "l_total: 1.0\nl_total: nan\nl_total: 1.2.3\nl_total: 0.5, l_percep: ..\nl_total: 0.4\n";
        let extraction = parse_log_text(text);
        assert_eq!(extraction.counters.parsed(), 2);
        assert_eq!(extraction.counters.skipped(), 3);
        let series = extraction.into_series().unwrap();
        assert_eq!(series.totals(), vec![1.0, 0.4]);
        assert_eq!(series.records()[1].step, 2);
    }

    #[test]
    fn sds_requires_scientific_notation() {
        let series = parse_log_text("l_total: 0.5, sds: 0.25")
            .into_series()
            .unwrap();
        assert_eq!(series.records()[0].sds, None);
    }

    #[test]
    fn text_without_records_is_absent() {
        assert!(parse_log_text("").series.is_none());
        assert!(parse_log_text("loss went down\n").series.is_none());
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempdir().unwrap();
        let extraction = load_training_log(dir.path().join("training.log")).unwrap();
        assert!(extraction.series.is_none());
        assert_eq!(extraction.counters.candidates(), 0);
    }

    #[test]
    fn load_reads_file_contents() {
        let mut temp = NamedTempFile::new().unwrap();
        for total in [1.0, 0.8, 0.6] {
            writeln!(temp, "it: l_total: {total:.4}, l_clip_fc: 0.1000").unwrap();
        }
        let series = load_training_log(temp.path()).unwrap().into_series().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.records()[2].total, 0.6);
    }
}
