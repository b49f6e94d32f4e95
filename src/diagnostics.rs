//! Geometry issues found while building region shapes
//!
//! Malformed input is either degraded and recorded as a warning
//! (best-effort) or turned into an error (strict). Warnings are collected
//! so the run can report them once at the end.

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// How malformed coordinates and geometry are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatePolicy {
    /// Degrade the entry and keep going
    #[default]
    BestEffort,
    /// Abort on the first malformed entry
    Strict,
}

impl CoordinatePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            CoordinatePolicy::Strict
        } else {
            CoordinatePolicy::BestEffort
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryIssue {
    #[error("entry {index} of ring {ring} in polygon {polygon} is not a coordinate pair")]
    MalformedPosition {
        polygon: usize,
        ring: usize,
        index: usize,
    },
    #[error("coordinates{location} is not an array")]
    MalformedStructure { location: String },
    #[error("unsupported geometry type '{0}'")]
    UnsupportedGeometry(String),
    #[error("missing geometry")]
    MissingGeometry,
    #[error("geometry has no points")]
    EmptyGeometry,
    #[error("no region mapping, using '{0}'")]
    UnknownRegion(String),
}

impl GeometryIssue {
    /// Short label used when grouping warnings
    pub fn kind(&self) -> &'static str {
        match self {
            GeometryIssue::MalformedPosition { .. } => "malformed position",
            GeometryIssue::MalformedStructure { .. } => "malformed structure",
            GeometryIssue::UnsupportedGeometry(_) => "unsupported geometry",
            GeometryIssue::MissingGeometry => "missing geometry",
            GeometryIssue::EmptyGeometry => "empty geometry",
            GeometryIssue::UnknownRegion(_) => "unknown region",
        }
    }

    /// Whether a strict policy turns this issue into an error
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            GeometryIssue::MalformedPosition { .. }
                | GeometryIssue::MalformedStructure { .. }
                | GeometryIssue::UnsupportedGeometry(_)
                | GeometryIssue::MissingGeometry
        )
    }
}

/// A geometry issue attributed to a named feature
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{feature}: {issue}")]
pub struct FeatureIssue {
    pub feature: String,
    pub issue: GeometryIssue,
}

/// Warnings collected over one run
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<FeatureIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue under `policy`
    ///
    /// # Returns
    /// * `Err` - if the policy is strict and the issue is malformed input
    /// * `Ok(())` - the issue was stored as a warning
    pub fn record(
        &mut self,
        policy: CoordinatePolicy,
        feature: &str,
        issue: GeometryIssue,
    ) -> Result<(), FeatureIssue> {
        let issue = FeatureIssue {
            feature: feature.to_string(),
            issue,
        };
        if policy == CoordinatePolicy::Strict && issue.issue.is_malformed_input() {
            return Err(issue);
        }

        warn!("{}", issue);
        self.warnings.push(issue);
        Ok(())
    }

    /// Record an issue that is a warning under every policy
    pub fn warn(&mut self, feature: &str, issue: GeometryIssue) {
        let issue = FeatureIssue {
            feature: feature.to_string(),
            issue,
        };
        warn!("{}", issue);
        self.warnings.push(issue);
    }

    pub fn warnings(&self) -> &[FeatureIssue] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warning count per issue kind
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for w in &self.warnings {
            *counts.entry(w.issue.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "no warnings".to_string();
        }

        let kinds: Vec<String> = self
            .counts()
            .into_iter()
            .map(|(kind, n)| format!("{} {}", n, kind))
            .collect();
        format!("{} warnings ({})", self.len(), kinds.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed() -> GeometryIssue {
        GeometryIssue::MalformedPosition {
            polygon: 0,
            ring: 0,
            index: 3,
        }
    }

    #[test]
    fn test_best_effort_collects() {
        let mut diag = Diagnostics::new();
        diag.record(CoordinatePolicy::BestEffort, "Kern", malformed())
            .unwrap();
        diag.warn("Kern", GeometryIssue::EmptyGeometry);

        assert_eq!(diag.len(), 2);
        assert_eq!(diag.warnings()[0].feature, "Kern");
        assert_eq!(
            diag.summary(),
            "2 warnings (1 empty geometry, 1 malformed position)"
        );
    }

    #[test]
    fn test_strict_rejects_malformed_input() {
        let mut diag = Diagnostics::new();
        let err = diag
            .record(CoordinatePolicy::Strict, "Kern", malformed())
            .unwrap_err();

        assert!(diag.is_empty());
        assert_eq!(
            err.to_string(),
            "Kern: entry 3 of ring 0 in polygon 0 is not a coordinate pair"
        );
    }

    #[test]
    fn test_strict_still_warns_on_unknown_region() {
        let mut diag = Diagnostics::new();
        diag.record(
            CoordinatePolicy::Strict,
            "Atlantis",
            GeometryIssue::UnknownRegion("Unknown".to_string()),
        )
        .unwrap();
        assert_eq!(diag.counts().get("unknown region"), Some(&1));
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(Diagnostics::new().summary(), "no warnings");
    }
}
