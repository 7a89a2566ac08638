//! Scoring module - line clear points, drop points, level and gravity
//!
//! Every function here is pure so the policy is reproducible from the
//! cumulative line count alone.

use crate::types::{
    GRAVITY_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES, MIN_GRAVITY_MS,
    SOFT_DROP_POINTS, START_GRAVITY_MS, START_LEVEL,
};

/// Calculate line clear score
/// rows: number of rows cleared by one lock (1-4)
/// level: current level (1-based)
pub fn line_score(rows: usize, level: u32) -> u32 {
    match LINE_SCORES.get(rows) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Level reached after `total_lines` cumulative cleared lines.
/// Levels start at 1 and increase every 10 lines.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + START_LEVEL
}

/// Gravity interval for a level (in milliseconds), clamped at the minimum
pub fn gravity_interval_ms(level: u32) -> u32 {
    let step = GRAVITY_STEP_MS.saturating_mul(level.saturating_sub(START_LEVEL));
    START_GRAVITY_MS.saturating_sub(step).max(MIN_GRAVITY_MS)
}

/// Calculate drop score
/// soft drop: +1 per row
/// hard drop: +2 per row
pub fn drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows * HARD_DROP_POINTS_PER_ROW
    } else {
        rows * SOFT_DROP_POINTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_score(0, 1), 0);
        assert_eq!(line_score(1, 1), 100);
        assert_eq!(line_score(2, 1), 300);
        assert_eq!(line_score(3, 1), 500);
        assert_eq!(line_score(4, 1), 800);

        // Level 3
        assert_eq!(line_score(1, 3), 300);
        assert_eq!(line_score(4, 3), 2400);

        // Anything beyond a Tetris is not a single lock
        assert_eq!(line_score(5, 1), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn test_gravity_intervals() {
        assert_eq!(gravity_interval_ms(1), 500);
        assert_eq!(gravity_interval_ms(2), 460);
        assert_eq!(gravity_interval_ms(11), 100);
        assert_eq!(gravity_interval_ms(12), 80);
        assert_eq!(gravity_interval_ms(40), 80);
        // Level 0 never happens in play but must not underflow.
        assert_eq!(gravity_interval_ms(0), 500);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(drop_score(10, false), 10);
        assert_eq!(drop_score(10, true), 20);
        assert_eq!(drop_score(0, true), 0);
    }
}
