#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

use stopwatch_core::SharedClock;

mod board;

/// Elapsed-time counter shared by the interrupt side (writers) and the
/// display scan loop (reader). Atomic fields, no lock.
static CLOCK: SharedClock = SharedClock::new();

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use cortex_m::delay::Delay;
    use embedded_hal::digital::v2::ToggleableOutputPin;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        sio::Sio,
        timer::Timer,
        watchdog::Watchdog,
    };
    use stopwatch_core::{controls, ControlConfig, Scanner, SevenSegment, TickConfig, TimerGate};

    use crate::board::{AlarmTick, ButtonPin, LedPin, OutPin, PicoButtons, TICK_SOURCE_HZ};

    type Display = SevenSegment<OutPin>;

    #[shared]
    struct Shared {
        gate: TimerGate<AlarmTick>,
    }

    #[local]
    struct Local {
        buttons: PicoButtons,
        scanner: Scanner<Display, Delay>,
        led: LedPin,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let alarm = timer.alarm_0().unwrap();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();

        let selects: [OutPin; 6] = [
            pins.gpio2.into_push_pull_output().into_dyn_pin(),
            pins.gpio3.into_push_pull_output().into_dyn_pin(),
            pins.gpio4.into_push_pull_output().into_dyn_pin(),
            pins.gpio5.into_push_pull_output().into_dyn_pin(),
            pins.gpio6.into_push_pull_output().into_dyn_pin(),
            pins.gpio7.into_push_pull_output().into_dyn_pin(),
        ];
        let segments: [OutPin; 7] = [
            pins.gpio8.into_push_pull_output().into_dyn_pin(),
            pins.gpio9.into_push_pull_output().into_dyn_pin(),
            pins.gpio10.into_push_pull_output().into_dyn_pin(),
            pins.gpio11.into_push_pull_output().into_dyn_pin(),
            pins.gpio12.into_push_pull_output().into_dyn_pin(),
            pins.gpio13.into_push_pull_output().into_dyn_pin(),
            pins.gpio14.into_push_pull_output().into_dyn_pin(),
        ];
        let delay = Delay::new(ctx.core.SYST, clocks.system_clock.freq().to_Hz());
        let scanner = Scanner::new(SevenSegment::new(selects, segments), delay);

        let button_pins: [ButtonPin; 3] = [
            pins.gpio15.into_pull_up_input().into_dyn_pin(),
            pins.gpio16.into_pull_up_input().into_dyn_pin(),
            pins.gpio17.into_pull_up_input().into_dyn_pin(),
        ];
        let mut buttons = PicoButtons::new(button_pins);
        controls::configure_controls(&mut buttons, &ControlConfig::default());

        let gate = TimerGate::start(AlarmTick::new(alarm), TickConfig::ONE_SECOND);
        defmt::info!(
            "stopwatch running, tick period {} us",
            TickConfig::ONE_SECOND.period_micros(TICK_SOURCE_HZ)
        );

        (
            Shared { gate },
            Local {
                buttons,
                scanner,
                led,
            },
            init::Monotonics(),
        )
    }

    // Hardware task: periodic tick (1 Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [gate], local = [led])]
    fn timer_tick(mut ctx: timer_tick::Context) {
        ctx.shared.gate.lock(|gate| {
            gate.source_mut().acknowledge();
            gate.rearm();
        });
        CLOCK.advance();
        ctx.local.led.toggle().unwrap();
    }

    // Hardware task: button edges, all three lines share the bank interrupt
    #[task(binds = IO_IRQ_BANK0, priority = 1, shared = [gate], local = [buttons])]
    fn button_press(mut ctx: button_press::Context) {
        while let Some(line) = ctx.local.buttons.take_event() {
            ctx.shared
                .gate
                .lock(|gate| controls::apply(line, &CLOCK, gate));
        }
    }

    #[idle(local = [scanner])]
    fn idle(ctx: idle::Context) -> ! {
        ctx.local.scanner.run(&CLOCK)
    }
}
