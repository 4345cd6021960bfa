//! Tests for timer display helpers.

use crate::timer::domain::{ProgressLevel, TimeProgress, format_clock, format_short};
use rstest::rstest;

#[rstest]
#[case(0.0, "0:00")]
#[case(1.5, "1:30")]
#[case(59.99, "59:59")]
#[case(61.25, "1:01:15")]
#[case(-3.0, "0:00")]
fn clock_format(#[case] minutes: f64, #[case] expected: &str) {
    assert_eq!(format_clock(minutes), expected);
}

#[rstest]
#[case(0.4, "0m")]
#[case(45.0, "45m")]
#[case(125.0, "2h 5m")]
fn short_format(#[case] minutes: f64, #[case] expected: &str) {
    assert_eq!(format_short(minutes), expected);
}

fn progress(percentage: f64, is_overtime: bool) -> TimeProgress {
    TimeProgress {
        spent: percentage,
        planned: 100.0,
        percentage,
        remaining: (100.0 - percentage).max(0.0),
        is_overtime,
    }
}

#[rstest]
#[case(Some(progress(10.0, false)), ProgressLevel::OnTrack)]
#[case(Some(progress(75.0, false)), ProgressLevel::Warning)]
#[case(Some(progress(90.0, false)), ProgressLevel::Critical)]
#[case(Some(progress(100.0, true)), ProgressLevel::Overtime)]
#[case(None, ProgressLevel::Unplanned)]
fn progress_levels(#[case] input: Option<TimeProgress>, #[case] expected: ProgressLevel) {
    assert_eq!(ProgressLevel::of(input.as_ref()), expected);
}
