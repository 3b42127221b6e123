//! Pico wiring: the alarm behind the tick source and the pins behind the
//! control lines.

use rp_pico::hal::fugit::ExtU32;
use rp_pico::hal::gpio::{
    bank0, DynPinId, FunctionSio, Interrupt, Pin, PullDown, PullUp, SioInput, SioOutput,
};
use rp_pico::hal::timer::{Alarm, Alarm0};

use stopwatch_core::{ControlLine, EdgeControl, TickConfig, TickSource, Trigger};

/// Display select and segment outputs, after type erasure.
pub type OutPin = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;
/// Button inputs, after type erasure.
pub type ButtonPin = Pin<DynPinId, FunctionSio<SioInput>, PullUp>;
pub type LedPin = Pin<bank0::Gpio25, FunctionSio<SioOutput>, PullDown>;

/// Source clock the tick configuration is quoted against.
pub const TICK_SOURCE_HZ: u32 = TickConfig::REFERENCE_HZ;

/// Alarm 0 as the stopwatch tick source.
///
/// The alarm is one-shot, so the tick handler re-arms it through the gate
/// every period. Halting cancels the scheduled fire and clears any latched
/// one, so resuming cannot deliver a stale tick.
pub struct AlarmTick {
    alarm: Alarm0,
}

impl AlarmTick {
    pub fn new(alarm: Alarm0) -> Self {
        Self { alarm }
    }

    /// Clears the pending fire. First thing in the tick handler.
    pub fn acknowledge(&mut self) {
        self.alarm.clear_interrupt();
    }
}

impl TickSource for AlarmTick {
    fn arm(&mut self, config: &TickConfig) {
        let period = config.period_micros(TICK_SOURCE_HZ);
        self.alarm.schedule(period.micros()).ok();
        self.alarm.enable_interrupt();
    }

    fn halt(&mut self) {
        self.alarm.disable_interrupt();
        self.alarm.cancel().ok();
        self.alarm.clear_interrupt();
    }
}

const LINES: [ControlLine; 3] = [ControlLine::Reset, ControlLine::Pause, ControlLine::Resume];

fn idx(line: ControlLine) -> usize {
    match line {
        ControlLine::Reset => 0,
        ControlLine::Pause => 1,
        ControlLine::Resume => 2,
    }
}

/// Interrupt kinds a trigger binding maps to on this gpio block.
fn irq_kinds(trigger: Trigger) -> &'static [Interrupt] {
    match trigger {
        Trigger::LowLevel => &[Interrupt::LevelLow],
        Trigger::AnyEdge => &[Interrupt::EdgeLow, Interrupt::EdgeHigh],
        Trigger::FallingEdge => &[Interrupt::EdgeLow],
        Trigger::RisingEdge => &[Interrupt::EdgeHigh],
    }
}

/// The three control buttons behind the shared bank 0 interrupt.
///
/// Each line remembers the trigger it was bound to, so enabling, disabling
/// and status checks touch exactly the interrupt kinds of that binding.
pub struct PicoButtons {
    pins: [ButtonPin; 3],
    triggers: [Option<Trigger>; 3],
}

impl PicoButtons {
    /// `pins` in line order: reset, pause, resume.
    pub fn new(pins: [ButtonPin; 3]) -> Self {
        Self {
            pins,
            triggers: [None; 3],
        }
    }

    /// Takes one pending button event, clearing its latch. The bank raises
    /// a single interrupt for all pins, so the handler calls this until it
    /// runs dry.
    pub fn take_event(&mut self) -> Option<ControlLine> {
        for line in LINES {
            let trigger = match self.triggers[idx(line)] {
                Some(trigger) => trigger,
                None => continue,
            };
            let pin = &mut self.pins[idx(line)];
            for &kind in irq_kinds(trigger) {
                if pin.interrupt_status(kind) {
                    pin.clear_interrupt(kind);
                    return Some(line);
                }
            }
        }
        None
    }
}

impl EdgeControl for PicoButtons {
    fn configure(&mut self, line: ControlLine, trigger: Trigger) {
        if let Some(old) = self.triggers[idx(line)].replace(trigger) {
            for &kind in irq_kinds(old) {
                self.pins[idx(line)].set_interrupt_enabled(kind, false);
            }
        }
        // Drop anything latched before the line was bound.
        for &kind in irq_kinds(trigger) {
            self.pins[idx(line)].clear_interrupt(kind);
        }
    }

    fn enable(&mut self, line: ControlLine) {
        if let Some(trigger) = self.triggers[idx(line)] {
            for &kind in irq_kinds(trigger) {
                self.pins[idx(line)].set_interrupt_enabled(kind, true);
            }
        }
    }

    fn disable(&mut self, line: ControlLine) {
        if let Some(trigger) = self.triggers[idx(line)] {
            for &kind in irq_kinds(trigger) {
                self.pins[idx(line)].set_interrupt_enabled(kind, false);
            }
        }
    }
}
