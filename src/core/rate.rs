//! Fixed-rate deadline computation
//!
//! Deadlines are derived from a fixed anchor plus whole period multiples, not
//! from "sleep N ms after finishing", so cycle start times do not drift with
//! body execution time. When a cycle overruns its period the schedule skips
//! the lost beats: the next deadline is the first grid point strictly in the
//! future, never a burst of catch-up wakes.

/// Deadline generator for a periodic activity on a fixed time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRate {
    anchor_us: u64,
    period_us: u64,
}

impl FixedRate {
    /// Create a schedule anchored at `anchor_us` with the given period.
    ///
    /// A zero period is clamped to one microsecond so the grid stays
    /// well-formed.
    pub fn new(anchor_us: u64, period_us: u64) -> Self {
        Self {
            anchor_us,
            period_us: period_us.max(1),
        }
    }

    /// The schedule period in microseconds.
    pub fn period_us(&self) -> u64 {
        self.period_us
    }

    /// The first grid point `anchor + N * period` strictly after `now_us`.
    pub fn next_deadline_us(&self, now_us: u64) -> u64 {
        if now_us < self.anchor_us {
            return self.anchor_us;
        }
        let beats = (now_us - self.anchor_us) / self.period_us + 1;
        self.anchor_us + beats * self.period_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::time::{MockTime, TimeSource};

    const PERIOD: u64 = 1_000_000; // 1 s in µs

    #[test]
    fn deadlines_stay_on_grid_with_zero_body_time() {
        let time = MockTime::with_initial(5_000);
        let rate = FixedRate::new(time.now_us(), PERIOD);

        // Body takes no time: wakes land at t0 + P, t0 + 2P, ...
        let mut wakes = Vec::new();
        for _ in 0..5 {
            let deadline = rate.next_deadline_us(time.now_us());
            time.set(deadline);
            wakes.push(deadline);
        }
        assert_eq!(
            wakes,
            vec![
                5_000 + PERIOD,
                5_000 + 2 * PERIOD,
                5_000 + 3 * PERIOD,
                5_000 + 4 * PERIOD,
                5_000 + 5 * PERIOD,
            ]
        );
    }

    #[test]
    fn short_body_does_not_shift_the_grid() {
        let time = MockTime::new();
        let rate = FixedRate::new(time.now_us(), PERIOD);

        // Body runs for 300 ms each cycle; deadlines are unaffected.
        for beat in 1..=10u64 {
            time.advance(300_000);
            let deadline = rate.next_deadline_us(time.now_us());
            assert_eq!(deadline, beat * PERIOD);
            time.set(deadline);
        }
    }

    #[test]
    fn overrun_skips_lost_beats() {
        let rate = FixedRate::new(0, PERIOD);

        // A body that finishes mid-way through the third period: the next
        // wake is the end of that period, not two queued wakes.
        assert_eq!(rate.next_deadline_us(2_500_000), 3 * PERIOD);
        // Exactly on a boundary still schedules strictly into the future.
        assert_eq!(rate.next_deadline_us(3_000_000), 4 * PERIOD);
    }

    #[test]
    fn single_wake_after_overrun() {
        let time = MockTime::new();
        let rate = FixedRate::new(time.now_us(), PERIOD);

        // First cycle overruns by 1.7 periods.
        time.advance(2_700_000);
        let first = rate.next_deadline_us(time.now_us());
        assert_eq!(first, 3 * PERIOD);
        time.set(first);

        // The following wake is a full period later - no compressed beat.
        let second = rate.next_deadline_us(time.now_us());
        assert_eq!(second, 4 * PERIOD);
        assert_eq!(second - first, PERIOD);
    }

    #[test]
    fn now_before_anchor_waits_for_anchor() {
        let rate = FixedRate::new(10_000, PERIOD);
        assert_eq!(rate.next_deadline_us(2_000), 10_000);
    }

    #[test]
    fn zero_period_is_clamped() {
        let rate = FixedRate::new(0, 0);
        assert_eq!(rate.period_us(), 1);
        assert_eq!(rate.next_deadline_us(5), 6);
    }
}
