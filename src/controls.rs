use crate::clock::SharedClock;
use crate::gate::{TickSource, TimerGate};
use crate::{debug, info, warning};

/// The three asynchronous control lines, one push-button each.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLine {
    Reset,
    Pause,
    Resume,
}

/// Trigger condition an interrupt line can be bound to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    LowLevel,
    AnyEdge,
    FallingEdge,
    RisingEdge,
}

impl ControlLine {
    /// Whether this line's detector can be bound to `trigger`. The resume
    /// line has a single edge-select bit and detects nothing but edges.
    pub fn supports(self, trigger: Trigger) -> bool {
        match self {
            ControlLine::Resume => {
                matches!(trigger, Trigger::FallingEdge | Trigger::RisingEdge)
            }
            ControlLine::Reset | ControlLine::Pause => true,
        }
    }

    // Only the logging backends look at the labels.
    #[cfg(any(feature = "defmt", feature = "log"))]
    fn label(self) -> &'static str {
        match self {
            ControlLine::Reset => "reset",
            ControlLine::Pause => "pause",
            ControlLine::Resume => "resume",
        }
    }
}

impl Trigger {
    #[cfg(any(feature = "defmt", feature = "log"))]
    fn label(self) -> &'static str {
        match self {
            Trigger::LowLevel => "low level",
            Trigger::AnyEdge => "any edge",
            Trigger::FallingEdge => "falling edge",
            Trigger::RisingEdge => "rising edge",
        }
    }
}

/// Interrupt-line capability: binds a line to a trigger condition and gates
/// whether its handler fires.
pub trait EdgeControl {
    /// Binds `line` to fire on `trigger`, replacing any previous binding.
    fn configure(&mut self, line: ControlLine, trigger: Trigger);
    /// Lets the bound handler fire.
    fn enable(&mut self, line: ControlLine);
    /// Disarms the line; its handler no longer fires.
    fn disable(&mut self, line: ControlLine);
}

/// Trigger assignment for the three lines.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlConfig {
    pub reset: Trigger,
    pub pause: Trigger,
    pub resume: Trigger,
}

impl Default for ControlConfig {
    /// Reference wiring: reset and resume fire on the falling edge of their
    /// pulled-up buttons, pause on the rising edge.
    fn default() -> Self {
        Self {
            reset: Trigger::FallingEdge,
            pause: Trigger::RisingEdge,
            resume: Trigger::FallingEdge,
        }
    }
}

impl ControlConfig {
    fn lines(self) -> [(ControlLine, Trigger); 3] {
        [
            (ControlLine::Reset, self.reset),
            (ControlLine::Pause, self.pause),
            (ControlLine::Resume, self.resume),
        ]
    }
}

/// Binds and enables the three control lines. A line asked for a trigger its
/// detector cannot do is skipped and left unconfigured; the other lines
/// still come up.
pub fn configure_controls(ctl: &mut impl EdgeControl, config: &ControlConfig) {
    for (line, trigger) in config.lines() {
        if !line.supports(trigger) {
            warning!(
                "{} line cannot trigger on {}, leaving it unconfigured",
                line.label(),
                trigger.label()
            );
            continue;
        }
        ctl.configure(line, trigger);
        ctl.enable(line);
        debug!("{} line armed on {}", line.label(), trigger.label());
    }
}

/// Applies one control event to the stopwatch.
///
/// Reset zeroes the counter whether the stopwatch is running or paused and
/// leaves the gate alone; pause and resume flip the gate and leave the
/// counter alone. Events are taken at face value: a bouncing switch simply
/// applies its action more than once, which every action tolerates.
pub fn apply<T: TickSource>(line: ControlLine, clock: &SharedClock, gate: &mut TimerGate<T>) {
    debug!("control event: {}", line.label());
    match line {
        ControlLine::Reset => {
            clock.reset();
            info!("counter reset");
        }
        ControlLine::Pause => gate.disable(),
        ControlLine::Resume => gate.enable(),
    }
}
