use embedded_hal::blocking::delay::DelayMs;

use crate::clock::{ClockValue, SharedClock};
use crate::info;

/// One of the six digit positions on the display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitPos {
    SecOnes,
    SecTens,
    MinOnes,
    MinTens,
    HourOnes,
    HourTens,
}

impl DigitPos {
    /// Fixed visit order for one display frame, seconds first.
    pub const SCAN_ORDER: [DigitPos; 6] = [
        DigitPos::SecOnes,
        DigitPos::SecTens,
        DigitPos::MinOnes,
        DigitPos::MinTens,
        DigitPos::HourOnes,
        DigitPos::HourTens,
    ];

    /// Index of this position on the select bus, 0 for seconds ones.
    pub fn index(self) -> usize {
        match self {
            DigitPos::SecOnes => 0,
            DigitPos::SecTens => 1,
            DigitPos::MinOnes => 2,
            DigitPos::MinTens => 3,
            DigitPos::HourOnes => 4,
            DigitPos::HourTens => 5,
        }
    }

    /// Decimal digit this position shows for `value`.
    pub fn digit_of(self, value: ClockValue) -> u8 {
        match self {
            DigitPos::SecOnes => value.sec % 10,
            DigitPos::SecTens => value.sec / 10,
            DigitPos::MinOnes => value.min % 10,
            DigitPos::MinTens => value.min / 10,
            DigitPos::HourOnes => value.hour % 10,
            DigitPos::HourTens => value.hour / 10,
        }
    }
}

/// The six digits of `value` in scan order, so 03:45:07 comes out as
/// `[7, 0, 5, 4, 3, 0]`.
pub fn frame_digits(value: ClockValue) -> [u8; 6] {
    let mut digits = [0; 6];
    for (slot, pos) in digits.iter_mut().zip(DigitPos::SCAN_ORDER) {
        *slot = pos.digit_of(value);
    }
    digits
}

/// Multiplexed digit sink. `select` leaves exactly one position active and
/// `show` drives a digit onto whichever position that is.
pub trait DigitDisplay {
    fn select(&mut self, pos: DigitPos);
    fn show(&mut self, digit: u8);
}

/// Round-robin scanner for the six-digit display.
///
/// Each pass visits every position in [`DigitPos::SCAN_ORDER`], holding it
/// lit for the dwell interval. Six positions at 4 ms make a frame about
/// 24 ms, fast enough that the eye sees all digits lit at once.
pub struct Scanner<D, W> {
    display: D,
    dwell: W,
}

impl<D: DigitDisplay, W: DelayMs<u16>> Scanner<D, W> {
    /// Per-position dwell. Short enough to refresh the whole frame at about
    /// 41 Hz, long enough for a digit to reach full apparent brightness.
    pub const DWELL_MS: u16 = 4;

    pub fn new(display: D, dwell: W) -> Self {
        Self { display, dwell }
    }

    /// One full pass over the six positions.
    ///
    /// The counter is re-read for every position, so a frame that straddles
    /// a carry can briefly mix old and new fields; the next frame shows the
    /// settled value.
    pub fn scan_frame(&mut self, clock: &SharedClock) {
        for pos in DigitPos::SCAN_ORDER {
            let value = clock.read();
            self.display.select(pos);
            self.display.show(pos.digit_of(value));
            self.dwell.delay_ms(Self::DWELL_MS);
        }
    }

    /// Drives the display until power-off.
    pub fn run(&mut self, clock: &SharedClock) -> ! {
        info!("display scan running, {} ms per digit", Self::DWELL_MS);
        loop {
            self.scan_frame(clock);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Event {
        Select(DigitPos),
        Show(u8),
    }

    #[derive(Default)]
    struct RecordingDisplay {
        events: Vec<Event>,
    }

    impl DigitDisplay for &mut RecordingDisplay {
        fn select(&mut self, pos: DigitPos) {
            self.events.push(Event::Select(pos));
        }

        fn show(&mut self, digit: u8) {
            self.events.push(Event::Show(digit));
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        calls: Vec<u16>,
    }

    impl DelayMs<u16> for &mut CountingDelay {
        fn delay_ms(&mut self, ms: u16) {
            self.calls.push(ms);
        }
    }

    fn clock_at(hour: u8, min: u8, sec: u8) -> SharedClock {
        let clock = SharedClock::new();
        let target = u32::from(hour) * 3600 + u32::from(min) * 60 + u32::from(sec);
        for _ in 0..target {
            clock.advance();
        }
        clock
    }

    #[test]
    fn frame_digits_splits_fields_in_scan_order() {
        assert_eq!(
            frame_digits(ClockValue::new(3, 45, 7)),
            [7, 0, 5, 4, 3, 0]
        );
        assert_eq!(frame_digits(ClockValue::ZERO), [0; 6]);
        assert_eq!(
            frame_digits(ClockValue::new(23, 59, 58)),
            [8, 5, 9, 5, 3, 2]
        );
    }

    #[test]
    fn position_indices_follow_scan_order() {
        for (expected, pos) in DigitPos::SCAN_ORDER.iter().enumerate() {
            assert_eq!(pos.index(), expected);
        }
    }

    #[test]
    fn scan_frame_selects_then_shows_each_position() {
        let clock = clock_at(3, 45, 7);
        let mut rec = RecordingDisplay::default();
        let mut delay = CountingDelay::default();

        Scanner::new(&mut rec, &mut delay).scan_frame(&clock);

        let mut expected = Vec::new();
        for (pos, digit) in DigitPos::SCAN_ORDER.iter().zip([7, 0, 5, 4, 3, 0]) {
            expected.push(Event::Select(*pos));
            expected.push(Event::Show(digit));
        }
        assert_eq!(rec.events, expected);
        assert_eq!(delay.calls, vec![4u16; 6]);
    }

    struct TearingDisplay<'a> {
        clock: &'a SharedClock,
        shown: Vec<u8>,
        selects: usize,
        advance_at: usize,
    }

    impl DigitDisplay for TearingDisplay<'_> {
        fn select(&mut self, _pos: DigitPos) {
            self.selects += 1;
            if self.selects == self.advance_at {
                self.clock.advance();
            }
        }

        fn show(&mut self, digit: u8) {
            self.shown.push(digit);
        }
    }

    #[test]
    fn carry_mid_frame_mixes_fields_for_one_frame_only() {
        let clock = clock_at(0, 0, 59);
        let mut delay = CountingDelay::default();
        let display = TearingDisplay {
            clock: &clock,
            shown: Vec::new(),
            selects: 0,
            advance_at: 2,
        };
        let mut scanner = Scanner::new(display, &mut delay);

        // The counter rolls 00:00:59 over to 00:01:00 after the seconds
        // digits were latched: the frame shows stale seconds next to the
        // new minutes.
        scanner.scan_frame(&clock);
        assert_eq!(scanner.display.shown, vec![9, 5, 1, 0, 0, 0]);

        scanner.display.shown.clear();
        scanner.scan_frame(&clock);
        assert_eq!(scanner.display.shown, vec![0, 0, 1, 0, 0, 0]);
    }
}
