use core::sync::atomic::{AtomicU8, Ordering};

/// Elapsed time held by the stopwatch.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockValue {
    pub sec: u8,
    pub min: u8,
    pub hour: u8,
}

impl ClockValue {
    /// Power-on value, 00:00:00.
    pub const ZERO: ClockValue = ClockValue {
        sec: 0,
        min: 0,
        hour: 0,
    };

    pub fn new(hour: u8, min: u8, sec: u8) -> Self {
        Self { sec, min, hour }
    }

    /// Advances by one second, carrying seconds into minutes and minutes
    /// into hours. A full day rolls the whole value back to 00:00:00; there
    /// is no day counter.
    pub fn tick(&mut self) {
        self.sec += 1;
        if self.sec >= 60 {
            self.sec = 0;
            self.min += 1;
        }
        if self.min >= 60 {
            self.min = 0;
            self.hour += 1;
        }
        if self.hour >= 24 {
            self.sec = 0;
            self.min = 0;
            self.hour = 0;
        }
    }

    /// Seconds elapsed since 00:00:00.
    pub fn total_seconds(&self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.min) * 60 + u32::from(self.sec)
    }
}

/// Counter cell shared between interrupt handlers and the display scan loop.
///
/// There are two writers, the periodic tick (`advance`) and the reset line
/// (`reset`), and the platform serializes them: on the single-core targets
/// this runs on, handlers of equal priority never interleave. The scan loop
/// is a pure reader and takes no lock. A composite `read` that lands in the
/// middle of a carry can pair an already-wrapped seconds field with a
/// not-yet-bumped minutes field; the mismatch lasts one scan frame and the
/// next pass shows the settled value.
pub struct SharedClock {
    sec: AtomicU8,
    min: AtomicU8,
    hour: AtomicU8,
}

impl SharedClock {
    pub const fn new() -> Self {
        Self {
            sec: AtomicU8::new(0),
            min: AtomicU8::new(0),
            hour: AtomicU8::new(0),
        }
    }

    /// Advances the counter by one second. Tick handler only.
    pub fn advance(&self) {
        let mut value = self.read();
        value.tick();
        self.store(value);
    }

    /// Zeroes the counter, running or paused.
    pub fn reset(&self) {
        self.store(ClockValue::ZERO);
    }

    /// Snapshot of the current value. May tear across a carry; see the type
    /// docs.
    pub fn read(&self) -> ClockValue {
        ClockValue {
            sec: self.sec.load(Ordering::Relaxed),
            min: self.min.load(Ordering::Relaxed),
            hour: self.hour.load(Ordering::Relaxed),
        }
    }

    fn store(&self, value: ClockValue) {
        self.sec.store(value.sec, Ordering::Relaxed);
        self.min.store(value.min, Ordering::Relaxed);
        self.hour.store(value.hour, Ordering::Relaxed);
    }
}

impl Default for SharedClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after_ticks(n: u32) -> ClockValue {
        let clock = SharedClock::new();
        for _ in 0..n {
            clock.advance();
        }
        clock.read()
    }

    fn wall_clock(n: u32) -> ClockValue {
        let total = n % 86_400;
        ClockValue::new(
            (total / 3600) as u8,
            (total / 60 % 60) as u8,
            (total % 60) as u8,
        )
    }

    #[test]
    fn counts_like_a_wall_clock() {
        for n in [0, 1, 59, 60, 61, 3599, 3600, 3661, 86_399, 86_400, 90_061] {
            assert_eq!(after_ticks(n), wall_clock(n), "after {n} ticks");
        }
    }

    #[test]
    fn second_boundary_carries_into_minutes() {
        let mut value = ClockValue::new(0, 0, 59);
        value.tick();
        assert_eq!(value, ClockValue::new(0, 1, 0));
    }

    #[test]
    fn minute_boundary_carries_into_hours() {
        let mut value = ClockValue::new(0, 59, 59);
        value.tick();
        assert_eq!(value, ClockValue::new(1, 0, 0));
    }

    #[test]
    fn end_of_day_wraps_to_zero() {
        let mut value = ClockValue::new(23, 59, 59);
        value.tick();
        assert_eq!(value, ClockValue::ZERO);
        assert_eq!(value.hour, 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let clock = SharedClock::new();
        for _ in 0..77 {
            clock.advance();
        }
        clock.reset();
        assert_eq!(clock.read(), ClockValue::ZERO);
        clock.reset();
        assert_eq!(clock.read(), ClockValue::ZERO);
    }

    #[test]
    fn tick_after_reset_counts_from_zero() {
        let clock = SharedClock::new();
        for _ in 0..86_399 {
            clock.advance();
        }
        clock.reset();
        clock.advance();
        assert_eq!(clock.read(), ClockValue::new(0, 0, 1));
    }

    #[test]
    fn total_seconds_matches_fields() {
        assert_eq!(ClockValue::new(1, 1, 1).total_seconds(), 3661);
        assert_eq!(ClockValue::new(23, 59, 59).total_seconds(), 86_399);
        assert_eq!(ClockValue::ZERO.total_seconds(), 0);
    }
}
