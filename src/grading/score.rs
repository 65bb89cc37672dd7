use crate::models::domain::ScoreStatus;

/// Fixed pass-mark policy. Callers needing a different cutoff pass their
/// own threshold to `aggregate` instead of special-casing elsewhere.
pub const DEFAULT_PASSING_THRESHOLD: f64 = 50.0;

/// Turn per-question correctness counts into a percentage and a pass/fail
/// verdict. A quiz with no gradable questions scores 0 and fails; the
/// percentage never divides by zero.
pub fn aggregate(
    correct_count: i32,
    total_possible: i32,
    passing_threshold: f64,
) -> (f64, ScoreStatus) {
    let percentage = if total_possible > 0 {
        f64::from(correct_count) / f64::from(total_possible) * 100.0
    } else {
        0.0
    };

    let status = if percentage >= passing_threshold {
        ScoreStatus::Passed
    } else {
        ScoreStatus::Failed
    };

    (percentage, status)
}
