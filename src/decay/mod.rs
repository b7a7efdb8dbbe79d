//! Memory decay engine
//!
//! Proficiency is a level in [0, 10] plus a timestamp of the last completed
//! training session. Each level survives a fixed number of hours before the
//! card drops one level; the per-level windows are coarser near the top
//! (fresh memories hold longest) and finer near the bottom.
//!
//! Everything here is a pure function of `(level, last_studied_at, now)`:
//! no hidden state, no wall-clock reads, no randomness. Callers inject the
//! clock, so two calls with the same `now` are bit-identical.

use chrono::{DateTime, Utc};

use crate::library::{MAX_LEVEL, MIN_LEVEL};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Retention windows and level thresholds. Policy constants, not a law:
/// the rest of the crate reads thresholds from here instead of hard-coding.
#[derive(Debug, Clone)]
pub struct DecayCurve {
    /// Hours a card survives at level `i + 1` before dropping to level `i`.
    /// Indexed by `level - 1`; every entry must be strictly positive.
    retention_hours: [f64; MAX_LEVEL as usize],
    /// At or above this effective level a session goes straight to a single
    /// consolidation cycle
    pub high_level: i32,
    /// At or above this effective level (but below `high_level`) a session
    /// skips erosion
    pub mid_level: i32,
    /// Dashboard band: below this a card is critical
    pub critical_below: i32,
    /// Dashboard band: at or above this a card is safe
    pub safe_at: i32,
}

impl Default for DecayCurve {
    fn default() -> Self {
        Self {
            // levels 1..=10; 73 hours from freshly studied to fully cold
            retention_hours: [2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 9.0, 11.0, 13.0, 13.0],
            high_level: 8,
            mid_level: 5,
            critical_below: 5,
            safe_at: 9,
        }
    }
}

impl DecayCurve {
    /// Hours the given level survives before dropping. Zero for level 0,
    /// which has nowhere left to fall.
    pub fn retention_hours(&self, level: i32) -> f64 {
        if level < 1 || level > MAX_LEVEL {
            return 0.0;
        }
        self.retention_hours[(level - 1) as usize]
    }

    /// Total hours from a fresh level-10 card down to level 0
    pub fn total_horizon_hours(&self) -> f64 {
        self.retention_hours.iter().sum()
    }
}

/// Derived proficiency reading; computed fresh on every read, never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct DecayResult {
    /// Decay-adjusted level in [0, 10]
    pub effective_level: i32,
    /// Remaining fraction of the current level's window, in [0, 100].
    /// 100 right after a refresh, trending to 0 at the next drop.
    pub stability_percent: f64,
    /// Remaining time in the current level's window; 0 once level 0
    pub ms_until_next_drop: u64,
}

impl DecayResult {
    /// Continuous level for sorting and averaging: the effective level minus
    /// the fraction of its window already consumed. Never below 0.
    pub fn exact_level(&self) -> f64 {
        let exact = self.effective_level as f64 - (1.0 - self.stability_percent / 100.0);
        exact.max(0.0)
    }
}

/// Compute the current effective level and stability for a card.
///
/// An unstudied card (`last_studied_at == None`) is always cold: level 0,
/// stability 0, nothing left to lose — regardless of its stored level.
pub fn compute_decay(
    level: i32,
    last_studied_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    curve: &DecayCurve,
) -> DecayResult {
    let base = level.clamp(MIN_LEVEL, MAX_LEVEL);

    let studied_at = match last_studied_at {
        Some(ts) => ts,
        None => return cold(),
    };

    // Clock skew guard: a timestamp in the future reads as just studied
    let elapsed_ms = (now - studied_at).num_milliseconds().max(0) as f64;

    // Walk down from the stored level, consuming one window per step,
    // until the elapsed time runs out inside the current window.
    let mut remaining = elapsed_ms;
    for current in (1..=base).rev() {
        let window_ms = curve.retention_hours(current) * MS_PER_HOUR;
        if remaining < window_ms {
            let left = window_ms - remaining;
            return DecayResult {
                effective_level: current,
                stability_percent: (left / window_ms) * 100.0,
                ms_until_next_drop: left as u64,
            };
        }
        remaining -= window_ms;
    }

    cold()
}

fn cold() -> DecayResult {
    DecayResult { effective_level: 0, stability_percent: 0.0, ms_until_next_drop: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    fn after_hours(h: f64) -> DateTime<Utc> {
        t0() + Duration::milliseconds((h * 3_600_000.0) as i64)
    }

    #[test]
    fn unstudied_card_is_always_cold() {
        let curve = DecayCurve::default();
        for level in [0, 3, 7, 10, 25, -4] {
            let result = compute_decay(level, None, t0(), &curve);
            assert_eq!(result.effective_level, 0);
            assert_eq!(result.stability_percent, 0.0);
            assert_eq!(result.ms_until_next_drop, 0);
        }
    }

    #[test]
    fn fresh_card_reads_full_stability() {
        let curve = DecayCurve::default();
        let result = compute_decay(10, Some(t0()), t0(), &curve);
        assert_eq!(result.effective_level, 10);
        assert_eq!(result.stability_percent, 100.0);
        assert_eq!(result.ms_until_next_drop, (13.0 * 3_600_000.0) as u64);
    }

    #[test]
    fn level_nine_two_hours_in() {
        let curve = DecayCurve::default();
        let result = compute_decay(9, Some(t0()), after_hours(2.0), &curve);

        assert_eq!(result.effective_level, 9);
        let expected = (1.0 - 2.0 / 13.0) * 100.0;
        assert!((result.stability_percent - expected).abs() < 1e-9);
        assert_eq!(result.ms_until_next_drop, (11.0 * 3_600_000.0) as u64);
    }

    #[test]
    fn stability_resets_at_the_instant_of_a_drop() {
        let curve = DecayCurve::default();
        // Level 10 survives exactly 13h; at 13h we are at level 9, fresh
        let result = compute_decay(10, Some(t0()), after_hours(13.0), &curve);
        assert_eq!(result.effective_level, 9);
        assert_eq!(result.stability_percent, 100.0);
    }

    #[test]
    fn effective_level_is_monotone_in_elapsed_time() {
        let curve = DecayCurve::default();
        let mut previous = i32::MAX;
        for tenths in 0..=800 {
            let hours = tenths as f64 / 10.0;
            let result = compute_decay(10, Some(t0()), after_hours(hours), &curve);
            assert!(result.effective_level <= previous, "level rose at {}h", hours);
            assert!((0..=10).contains(&result.effective_level));
            assert!((0.0..=100.0).contains(&result.stability_percent));
            previous = result.effective_level;
        }
    }

    #[test]
    fn stability_is_monotone_within_a_window() {
        let curve = DecayCurve::default();
        // Inside level 10's 13h window
        let mut previous = 101.0;
        for tenths in 0..130 {
            let hours = tenths as f64 / 10.0;
            let result = compute_decay(10, Some(t0()), after_hours(hours), &curve);
            assert_eq!(result.effective_level, 10);
            assert!(result.stability_percent < previous);
            previous = result.stability_percent;
        }
    }

    #[test]
    fn fully_decayed_past_the_horizon() {
        let curve = DecayCurve::default();
        let horizon = curve.total_horizon_hours();
        let result = compute_decay(10, Some(t0()), after_hours(horizon + 0.1), &curve);
        assert_eq!(result.effective_level, 0);
        assert_eq!(result.stability_percent, 0.0);
        assert_eq!(result.ms_until_next_drop, 0);
    }

    #[test]
    fn compute_decay_is_deterministic() {
        let curve = DecayCurve::default();
        let now = after_hours(17.3);
        let a = compute_decay(8, Some(t0()), now, &curve);
        let b = compute_decay(8, Some(t0()), now, &curve);
        assert_eq!(a, b);
    }

    #[test]
    fn stored_level_out_of_range_is_clamped_before_decay() {
        let curve = DecayCurve::default();
        let high = compute_decay(99, Some(t0()), t0(), &curve);
        assert_eq!(high.effective_level, 10);
        let low = compute_decay(-7, Some(t0()), t0(), &curve);
        assert_eq!(low.effective_level, 0);
    }

    #[test]
    fn future_timestamp_reads_as_just_studied() {
        let curve = DecayCurve::default();
        let result = compute_decay(10, Some(after_hours(5.0)), t0(), &curve);
        assert_eq!(result.effective_level, 10);
        assert_eq!(result.stability_percent, 100.0);
    }

    #[test]
    fn exact_level_spans_the_window() {
        let curve = DecayCurve::default();

        let fresh = compute_decay(10, Some(t0()), t0(), &curve);
        assert!((fresh.exact_level() - 10.0).abs() < 1e-9);

        // Halfway through level 10's window: exact level 9.5
        let halfway = compute_decay(10, Some(t0()), after_hours(6.5), &curve);
        assert!((halfway.exact_level() - 9.5).abs() < 1e-9);

        let cold = compute_decay(0, None, t0(), &curve);
        assert_eq!(cold.exact_level(), 0.0);
    }

    #[test]
    fn retention_windows_are_strictly_positive() {
        let curve = DecayCurve::default();
        for level in 1..=10 {
            assert!(curve.retention_hours(level) > 0.0);
        }
        assert_eq!(curve.retention_hours(0), 0.0);
        assert!((curve.total_horizon_hours() - 73.0).abs() < 1e-9);
    }
}
