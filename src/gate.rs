use crate::{info, warning};

/// Clock tap feeding the tick counter, as a divisor of the source clock.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    Div1,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    pub fn divisor(self) -> u32 {
        match self {
            Prescaler::Div1 => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

/// Counting mode of the tick counter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickMode {
    /// Counts through the full 16-bit range and wraps.
    FreeRunning,
    /// Clears when the count reaches `compare` and raises the tick there.
    ClearOnCompare,
}

/// Configuration for the periodic tick source.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickConfig {
    /// Count the counter starts from when armed.
    pub initial_count: u16,
    /// Top value in [`TickMode::ClearOnCompare`]; ignored when free-running.
    pub compare: u16,
    pub prescaler: Prescaler,
    pub mode: TickMode,
}

impl TickConfig {
    /// Source clock the reference configuration is derived against, in Hz.
    pub const REFERENCE_HZ: u32 = 1_024_000;

    /// Reference configuration: a 1.024 MHz source behind the /1024 tap
    /// counts at 1 kHz, and clearing after the thousandth count makes the
    /// tick period exactly one second.
    pub const ONE_SECOND: TickConfig = TickConfig {
        initial_count: 0,
        compare: 999,
        prescaler: Prescaler::Div1024,
        mode: TickMode::ClearOnCompare,
    };

    /// Tick period against `source_hz`, in microseconds:
    /// `prescaler * (1 + compare) / source_hz` when clearing on compare,
    /// the full counter range otherwise. Degenerate inputs give 0 instead
    /// of dividing by zero.
    pub fn period_micros(&self, source_hz: u32) -> u32 {
        let counts = match self.mode {
            TickMode::ClearOnCompare => u64::from(self.compare) + 1,
            TickMode::FreeRunning => 1u64 << 16,
        };
        let micros = (u64::from(self.prescaler.divisor()) * counts * 1_000_000)
            .checked_div(u64::from(source_hz))
            .unwrap_or(0);
        u32::try_from(micros).unwrap_or(u32::MAX)
    }

    /// Whether the hardware can actually run this configuration. Clearing on
    /// compare needs a nonzero top with the start count at or below it; a
    /// free-running counter takes anything.
    pub fn is_valid(&self) -> bool {
        match self.mode {
            TickMode::ClearOnCompare => self.compare > 0 && self.initial_count <= self.compare,
            TickMode::FreeRunning => true,
        }
    }
}

/// Periodic hardware tick source.
///
/// `arm` starts the source per the given configuration and `halt` stops it
/// at the clock, so no further ticks are generated at all. One-shot sources
/// get re-armed through [`TimerGate::rearm`] every period.
pub trait TickSource {
    fn arm(&mut self, config: &TickConfig);
    fn halt(&mut self);
}

/// Whether ticks are currently being generated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateState {
    Running,
    Paused,
}

/// On/off switch in front of the tick source.
///
/// Pausing halts the source itself rather than counting ticks and throwing
/// them away, and resuming re-arms it with the exact configuration it was
/// started with, so the period cannot drift across a pause. Neither
/// transition touches the counter value.
pub struct TimerGate<T> {
    source: T,
    config: TickConfig,
    state: GateState,
}

impl<T: TickSource> TimerGate<T> {
    /// Arms `source` with `config` and comes up running.
    pub fn start(source: T, config: TickConfig) -> Self {
        let mut gate = Self {
            source,
            config,
            state: GateState::Running,
        };
        gate.arm_source();
        gate
    }

    /// Stops tick generation. Does nothing when already paused.
    pub fn disable(&mut self) {
        if self.state == GateState::Paused {
            return;
        }
        self.source.halt();
        self.state = GateState::Paused;
        info!("stopwatch paused");
    }

    /// Restarts tick generation with the original configuration. Does
    /// nothing when already running.
    pub fn enable(&mut self) {
        if self.state == GateState::Running {
            return;
        }
        self.arm_source();
        self.state = GateState::Running;
        info!("stopwatch resumed");
    }

    /// Schedules the next period on a one-shot source. Does nothing while
    /// paused, so a tick that was already in flight when the pause landed
    /// cannot quietly re-arm the source.
    pub fn rearm(&mut self) {
        if self.state == GateState::Running {
            self.arm_source();
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// The underlying source, for servicing its interrupt flags.
    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }

    fn arm_source(&mut self) {
        if self.config.is_valid() {
            self.source.arm(&self.config);
        } else {
            warning!("tick configuration rejected, source left unarmed");
        }
    }
}
