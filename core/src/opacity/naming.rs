use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maps a path substring to a short display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    pub pattern: String,
    pub label: String,
}

impl LabelRule {
    pub fn new(pattern: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            label: label.into(),
        }
    }
}

/// Ordered label rules; the first rule whose pattern occurs in the path wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelRules {
    rules: Vec<LabelRule>,
}

impl LabelRules {
    pub fn new(rules: Vec<LabelRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[LabelRule] {
        &self.rules
    }

    /// Label for an experiment output. Without a matching rule this is the
    /// grandparent directory name (`<run>/svg/final.svg` -> `<run>`), then
    /// the file name.
    pub fn short_name(&self, path: &Path) -> String {
        let text = path.to_string_lossy();
        if let Some(rule) = self.rules.iter().find(|r| text.contains(r.pattern.as_str())) {
            return rule.label.clone();
        }
        path.parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .or_else(|| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| text.into_owned())
    }
}

impl Default for LabelRules {
    fn default() -> Self {
        Self::new(vec![
            LabelRule::new("baseline_128", "Baseline 128"),
            LabelRule::new("baseline_256", "Baseline 256"),
            LabelRule::new("pruned_128", "Pruned 128"),
            LabelRule::new("pruned_256", "Pruned 256"),
            LabelRule::new("pruned_aggressive", "Aggressive"),
            LabelRule::new("aggressive", "Aggressive"),
        ])
    }
}
