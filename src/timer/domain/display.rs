//! Human-readable renderings of timer minutes and progress.

use super::TimeProgress;

/// Share of the budget at which progress turns to a warning.
const WARNING_PERCENTAGE: f64 = 75.0;
/// Share of the budget at which progress turns critical.
const CRITICAL_PERCENTAGE: f64 = 90.0;

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "minutes are clamped to non-negative finite values before truncation"
)]
fn whole_seconds(minutes: f64) -> u64 {
    if minutes.is_finite() {
        (minutes.max(0.0) * 60.0).floor() as u64
    } else {
        0
    }
}

/// Formats minutes as `M:SS`, or `H:MM:SS` from one hour up.
#[must_use]
pub fn format_clock(minutes: f64) -> String {
    let seconds = whole_seconds(minutes);
    let hours = seconds.div_euclid(3600);
    let mins = seconds.rem_euclid(3600).div_euclid(60);
    let secs = seconds.rem_euclid(60);
    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

/// Formats minutes as `Mm`, or `Hh Mm` from one hour up.
#[must_use]
pub fn format_short(minutes: f64) -> String {
    let whole_minutes = whole_seconds(minutes).div_euclid(60);
    let hours = whole_minutes.div_euclid(60);
    let mins = whole_minutes.rem_euclid(60);
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

/// Severity band of a timer's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLevel {
    /// No budget has been planned.
    Unplanned,
    /// Below the warning threshold.
    OnTrack,
    /// At least three quarters of the budget spent.
    Warning,
    /// At least nine tenths of the budget spent.
    Critical,
    /// Over budget.
    Overtime,
}

impl ProgressLevel {
    /// Classifies a progress projection.
    #[must_use]
    pub fn of(progress: Option<&TimeProgress>) -> Self {
        match progress {
            None => Self::Unplanned,
            Some(progress) if progress.is_overtime => Self::Overtime,
            Some(progress) if progress.percentage >= CRITICAL_PERCENTAGE => Self::Critical,
            Some(progress) if progress.percentage >= WARNING_PERCENTAGE => Self::Warning,
            Some(_) => Self::OnTrack,
        }
    }

    /// Returns a lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unplanned => "unplanned",
            Self::OnTrack => "on track",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Overtime => "overtime",
        }
    }
}
