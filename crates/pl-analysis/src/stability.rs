//! Stability and trend heuristics.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Span-based stability grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    /// Fewer than two samples in the window.
    Unknown,
    /// Window span below 0.05.
    Stable,
    /// Window span between 0.05 and 5.
    Marginal,
    /// Window span above 5.
    Unstable,
}

impl Stability {
    /// Lowercase label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Stable => "stable",
            Self::Marginal => "marginal",
            Self::Unstable => "unstable",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rolling-window stability analyzer graded on the window's span.
#[derive(Debug, Clone)]
pub struct StabilityAnalyzer {
    window: usize,
    values: VecDeque<f64>,
}

impl Default for StabilityAnalyzer {
    fn default() -> Self {
        Self::new(100)
    }
}

impl StabilityAnalyzer {
    /// Create an analyzer holding at most `window` samples.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            values: VecDeque::with_capacity(window.max(1)),
        }
    }

    /// Push a sample and return the updated classification.
    pub fn update(&mut self, value: f64) -> Stability {
        if self.values.len() == self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
        self.classify()
    }

    /// Classify the current window contents.
    pub fn classify(&self) -> Stability {
        if self.values.len() < 2 {
            return Stability::Unknown;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
        }
        let span = max - min;
        if span < 0.05 {
            Stability::Stable
        } else if span > 5.0 {
            Stability::Unstable
        } else {
            Stability::Marginal
        }
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no samples have been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Endpoint-delta trend grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Fewer than five samples.
    Unknown,
    /// |last - first| below 1e-3.
    Stable,
    /// Last sample above the first.
    Increasing,
    /// Last sample below the first.
    Decreasing,
}

impl Trend {
    /// Lowercase label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Stable => "stable",
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the trend of a sample slice by comparing its endpoints.
pub fn classify_trend(samples: &[f64]) -> Trend {
    if samples.len() < 5 {
        return Trend::Unknown;
    }
    let diff = samples[samples.len() - 1] - samples[0];
    if diff.abs() < 1e-3 {
        Trend::Stable
    } else if diff > 0.0 {
        Trend::Increasing
    } else {
        Trend::Decreasing
    }
}

/// Rolling-window trend tracker built on [`classify_trend`].
#[derive(Debug, Clone)]
pub struct StabilityTracker {
    window: usize,
    data: VecDeque<f64>,
}

impl Default for StabilityTracker {
    fn default() -> Self {
        Self::new(50)
    }
}

impl StabilityTracker {
    /// Create a tracker holding at most `window` samples.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            data: VecDeque::with_capacity(window.max(1)),
        }
    }

    /// Push a sample, evicting the oldest if the window is full.
    pub fn add(&mut self, value: f64) {
        if self.data.len() == self.window {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Trend over the current window contents.
    pub fn status(&self) -> Trend {
        let samples: Vec<f64> = self.data.iter().copied().collect();
        classify_trend(&samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzer_needs_two_samples() {
        let mut a = StabilityAnalyzer::default();
        assert_eq!(a.classify(), Stability::Unknown);
        assert_eq!(a.update(1.0), Stability::Unknown);
        assert_eq!(a.update(1.0), Stability::Stable);
    }

    #[test]
    fn analyzer_grades_by_span() {
        let mut a = StabilityAnalyzer::new(10);
        a.update(0.0);
        assert_eq!(a.update(0.01), Stability::Stable);
        assert_eq!(a.update(1.0), Stability::Marginal);
        assert_eq!(a.update(10.0), Stability::Unstable);
    }

    #[test]
    fn analyzer_evicts_oldest_sample() {
        let mut a = StabilityAnalyzer::new(2);
        a.update(0.0);
        a.update(100.0);
        assert_eq!(a.classify(), Stability::Unstable);
        // The 0.0 and then 100.0 roll out of the window.
        a.update(100.0);
        assert_eq!(a.update(100.0), Stability::Stable);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn trend_needs_five_samples() {
        assert_eq!(classify_trend(&[1.0, 2.0, 3.0, 4.0]), Trend::Unknown);
        assert_eq!(
            classify_trend(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            Trend::Increasing
        );
    }

    #[test]
    fn trend_compares_endpoints() {
        assert_eq!(
            classify_trend(&[5.0, 9.0, 1.0, 7.0, 4.0]),
            Trend::Decreasing
        );
        assert_eq!(
            classify_trend(&[1.0, 50.0, -50.0, 2.0, 1.0005]),
            Trend::Stable
        );
    }

    #[test]
    fn tracker_windows_its_history() {
        let mut t = StabilityTracker::new(5);
        for v in [0.0, 1.0, 2.0, 3.0, 4.0, 5.0] {
            t.add(v);
        }
        // Window holds [1, 2, 3, 4, 5].
        assert_eq!(t.status(), Trend::Increasing);
    }

    #[test]
    fn labels_render_lowercase() {
        assert_eq!(Stability::Marginal.to_string(), "marginal");
        assert_eq!(Trend::Decreasing.to_string(), "decreasing");
    }
}
