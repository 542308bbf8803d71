use crate::math::stats::StatsHelper;
use crate::opacity::naming::LabelRules;
use crate::opacity::resolver::ResolverChain;
use crate::prelude::{AnalysisError, AnalysisResult};
use log::{info, warn};
use roxmltree::{Document, ParsingOptions};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Visual significance class of a stroke, by opacity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpacityBucket {
    Dead,
    Ghost,
    Low,
    Visible,
}

impl OpacityBucket {
    pub const ALL: [OpacityBucket; 4] = [
        OpacityBucket::Dead,
        OpacityBucket::Ghost,
        OpacityBucket::Low,
        OpacityBucket::Visible,
    ];

    /// Every value lands in exactly one bucket; NaN counts as visible.
    pub fn classify(opacity: f64) -> Self {
        if opacity < 0.01 {
            OpacityBucket::Dead
        } else if opacity < 0.1 {
            OpacityBucket::Ghost
        } else if opacity < 0.3 {
            OpacityBucket::Low
        } else {
            OpacityBucket::Visible
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OpacityBucket::Dead => "Dead (<0.01)",
            OpacityBucket::Ghost => "Ghost (0.01-0.1)",
            OpacityBucket::Low => "Low (0.1-0.3)",
            OpacityBucket::Visible => "Visible (≥0.3)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpacityBuckets {
    pub dead: usize,
    pub ghost: usize,
    pub low: usize,
    pub visible: usize,
}

impl OpacityBuckets {
    pub fn from_values(opacities: &[f64]) -> Self {
        let mut buckets = Self::default();
        for &opacity in opacities {
            match OpacityBucket::classify(opacity) {
                OpacityBucket::Dead => buckets.dead += 1,
                OpacityBucket::Ghost => buckets.ghost += 1,
                OpacityBucket::Low => buckets.low += 1,
                OpacityBucket::Visible => buckets.visible += 1,
            }
        }
        buckets
    }

    pub fn count(&self, bucket: OpacityBucket) -> usize {
        match bucket {
            OpacityBucket::Dead => self.dead,
            OpacityBucket::Ghost => self.ghost,
            OpacityBucket::Low => self.low,
            OpacityBucket::Visible => self.visible,
        }
    }

    pub fn total(&self) -> usize {
        self.dead + self.ghost + self.low + self.visible
    }
}

/// Opacity statistics for one SVG file.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityProfile {
    pub name: String,
    pub path: PathBuf,
    pub opacities: Vec<f64>,
    pub buckets: OpacityBuckets,
    pub mean_opacity: Option<f64>,
    pub median_opacity: Option<f64>,
    pub file_size: u64,
}

impl OpacityProfile {
    pub fn new(name: String, path: PathBuf, opacities: Vec<f64>, file_size: u64) -> Self {
        let buckets = OpacityBuckets::from_values(&opacities);
        let mean_opacity = StatsHelper::mean(&opacities);
        let median_opacity = StatsHelper::median(&opacities);
        Self {
            name,
            path,
            opacities,
            buckets,
            mean_opacity,
            median_opacity,
            file_size,
        }
    }

    /// Number of stroke and group elements visited.
    pub fn total(&self) -> usize {
        self.opacities.len()
    }

    pub fn file_size_kb(&self) -> f64 {
        self.file_size as f64 / 1024.0
    }
}

/// Tag names ending in `path` or `g` are counted. This includes the `svg`
/// root itself.
fn is_stroke_element(local_name: &str) -> bool {
    local_name.ends_with("path") || local_name.ends_with('g')
}

/// Resolves an opacity for every stroke or group element in document order.
/// `origin` is only used to label markup errors.
pub fn collect_opacities(
    svg: &str,
    origin: &Path,
    chain: &ResolverChain,
) -> AnalysisResult<Vec<f64>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc =
        Document::parse_with_options(svg, options).map_err(|source| AnalysisError::Markup {
            path: origin.to_path_buf(),
            source,
        })?;
    doc.descendants()
        .filter(|node| node.is_element() && is_stroke_element(node.tag_name().name()))
        .map(|node| chain.resolve(node))
        .collect()
}

/// Profiles one SVG file. A missing file yields `Ok(None)`; malformed markup
/// and unparseable opacity values are errors.
pub fn analyze_svg_file<P: AsRef<Path>>(
    path: P,
    labels: &LabelRules,
    chain: &ResolverChain,
) -> AnalysisResult<Option<OpacityProfile>> {
    let path_ref = path.as_ref();
    let text = match fs::read_to_string(path_ref) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!("SVG {} not found", path_ref.display());
            return Ok(None);
        }
        Err(err) => return Err(AnalysisError::io(path_ref, err)),
    };
    let file_size = fs::metadata(path_ref)
        .map_err(|err| AnalysisError::io(path_ref, err))?
        .len();

    let opacities = collect_opacities(&text, path_ref, chain)?;
    let name = labels.short_name(path_ref);
    info!(
        "{} ({}): {} elements, {} bytes",
        name,
        path_ref.display(),
        opacities.len(),
        file_size
    );

    Ok(Some(OpacityProfile::new(
        name,
        path_ref.to_path_buf(),
        opacities,
        file_size,
    )))
}
