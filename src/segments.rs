use embedded_hal::digital::v2::OutputPin;

use crate::display::{DigitDisplay, DigitPos};
use crate::warning;

/// Segment patterns for the digits 0 through 9 on a common-cathode display.
/// Bit 0 is segment a, bit 6 is segment g; a set bit lights the segment.
pub const DIGIT_SEGMENTS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

/// Six-digit seven-segment bus: one select line per digit position, and
/// seven segment lines shared by all positions.
pub struct SevenSegment<P> {
    selects: [P; 6],
    segments: [P; 7],
}

impl<P: OutputPin> SevenSegment<P> {
    pub fn new(selects: [P; 6], segments: [P; 7]) -> Self {
        Self { selects, segments }
    }
}

impl<P: OutputPin> DigitDisplay for SevenSegment<P> {
    /// Break before make: every select line is released before the one
    /// position is asserted, so two positions never light together.
    fn select(&mut self, pos: DigitPos) {
        for line in self.selects.iter_mut() {
            line.set_low().ok();
        }
        self.selects[pos.index()].set_high().ok();
    }

    fn show(&mut self, digit: u8) {
        let pattern = match DIGIT_SEGMENTS.get(usize::from(digit)) {
            Some(&pattern) => pattern,
            None => {
                // The clock projection only produces 0 to 9; blank anything else.
                warning!("no segment pattern for digit {}, blanking", digit);
                0
            }
        };
        for (bit, line) in self.segments.iter_mut().enumerate() {
            if pattern & (1 << bit) != 0 {
                line.set_high().ok();
            } else {
                line.set_low().ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct TestPin {
        level: Rc<Cell<bool>>,
    }

    impl TestPin {
        fn is_high(&self) -> bool {
            self.level.get()
        }
    }

    impl OutputPin for TestPin {
        type Error = core::convert::Infallible;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.level.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.level.set(true);
            Ok(())
        }
    }

    fn test_bus() -> ([TestPin; 6], [TestPin; 7], SevenSegment<TestPin>) {
        let selects: [TestPin; 6] = Default::default();
        let segments: [TestPin; 7] = Default::default();
        let bus = SevenSegment::new(selects.clone(), segments.clone());
        (selects, segments, bus)
    }

    fn lit(segments: &[TestPin; 7]) -> u8 {
        segments
            .iter()
            .enumerate()
            .fold(0, |acc, (bit, pin)| acc | (u8::from(pin.is_high()) << bit))
    }

    #[test]
    fn select_activates_exactly_one_position() {
        let (selects, _, mut bus) = test_bus();
        for pos in DigitPos::SCAN_ORDER {
            bus.select(pos);
            for (index, pin) in selects.iter().enumerate() {
                assert_eq!(pin.is_high(), index == pos.index(), "position {index}");
            }
        }
    }

    #[test]
    fn digits_drive_their_patterns() {
        let (_, segments, mut bus) = test_bus();
        for digit in 0..10u8 {
            bus.show(digit);
            assert_eq!(lit(&segments), DIGIT_SEGMENTS[usize::from(digit)]);
        }
    }

    #[test]
    fn eight_lights_all_segments_one_lights_two() {
        let (_, segments, mut bus) = test_bus();
        bus.show(8);
        assert_eq!(lit(&segments).count_ones(), 7);
        bus.show(1);
        assert_eq!(lit(&segments).count_ones(), 2);
    }

    #[test]
    fn out_of_range_digit_blanks_the_segments() {
        let (_, segments, mut bus) = test_bus();
        bus.show(8);
        bus.show(200);
        assert_eq!(lit(&segments), 0);
    }
}
