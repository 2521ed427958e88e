//! pl-analysis: rolling-window stability classification.
//!
//! Two independent heuristics over a signal's recent history:
//!
//! - [`StabilityAnalyzer`] looks at the span (max - min) of the whole
//!   window and grades it stable / marginal / unstable. Suited to judging
//!   how settled a control loop is.
//! - [`StabilityTracker`] compares the first and last sample of the window
//!   and reports the trend (stable / increasing / decreasing). Suited to
//!   spotting drift.
//!
//! Both keep a fixed-capacity window and evict the oldest sample on
//! overflow. Neither is fed by the simulation engine itself; callers (the
//! dashboard, the CLI) push the values they want classified.

pub mod stability;

pub use stability::{
    classify_trend, Stability, StabilityAnalyzer, StabilityTracker, Trend,
};
