#![cfg_attr(not(test), no_std)]

//! Core logic for a six-digit seven-segment stopwatch.
//!
//! Everything with real behavior lives here behind small hardware
//! capability traits. [`TickSource`] is the periodic hardware timer,
//! [`EdgeControl`] the external-interrupt lines behind the push-buttons,
//! [`DigitDisplay`] the multiplexed digit bus, and the pin and delay traits
//! come from `embedded-hal`. The crate builds and tests on the host with
//! plain `cargo test` and runs unchanged on a microcontroller.
//!
//! Interrupt handlers own all mutation. The periodic tick advances the
//! counter and the three control lines reset it, pause it or resume it,
//! where pausing halts the tick source itself through [`TimerGate`]. The
//! main loop never writes; it multiplexes the counter onto the six digits
//! over and over. Reads are deliberately unsynchronized, see
//! [`SharedClock`] for the torn-read contract.

mod macros;

pub mod clock;
pub mod controls;
pub mod display;
pub mod gate;
pub mod segments;

pub use clock::{ClockValue, SharedClock};
pub use controls::{ControlConfig, ControlLine, EdgeControl, Trigger};
pub use display::{DigitDisplay, DigitPos, Scanner};
pub use gate::{GateState, Prescaler, TickConfig, TickMode, TickSource, TimerGate};
pub use segments::SevenSegment;

pub(crate) use macros::{debug, info, warning};
