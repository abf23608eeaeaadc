//! ms-footswitch firmware entry point (nRF52840).
//!
//! One cooperative loop drives everything: scan the footswitches, route
//! gestures, talk to the pedal, render. The pedal hangs off a USB-host
//! MIDI bridge that forwards raw 4-byte USB-MIDI event packets over a
//! 31250 baud UART, so a blocking exchange stalls the loop, but never
//! for longer than the response timeout.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_futures::block_on;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin};
use embassy_nrf::uarte::{self, UarteRxWithIdle, UarteTx};
use embassy_nrf::{bind_interrupts, peripherals, spim, twim};
use embassy_time::{with_timeout, Delay, Duration, Instant, Ticker};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ms_footswitch::button::{ButtonConfig, ButtonPad, Gesture};
use ms_footswitch::config;
use ms_footswitch::control::{GestureRouter, PedalSwitch, RouterAction};
use ms_footswitch::error::Error;
use ms_footswitch::midi::session::DeviceSession;
use ms_footswitch::midi::transport::{MidiLink, RawMidiBus};
use ms_footswitch::ui::buttons::{Footswitches, BYPASS, NEXT, PREV};
use ms_footswitch::ui::display::{LcdDisplay, OledDisplay};
use ms_footswitch::ui::view::{preload_label, DisplayKind, PatchDisplay};

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

/// UART link to the USB-host MIDI bridge.
///
/// The bridge forwards USB-MIDI event packets verbatim, so both
/// directions carry the 4-byte packet framing that
/// `midi::transport` packs and strips.
struct BridgePort {
    tx: UarteTx<'static, peripherals::UARTE0>,
    rx: UarteRxWithIdle<'static, peripherals::UARTE0, peripherals::TIMER0>,
}

impl RawMidiBus for BridgePort {
    fn write_packets(&mut self, packets: &[u8]) -> Result<(), Error> {
        block_on(self.tx.write(packets)).map_err(|_| Error::Transport)
    }

    fn read_packets(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        // One bounded poll; the transport layer owns the retry loop.
        let poll = Duration::from_millis(config::RESPONSE_POLL_MS as u64);
        match block_on(with_timeout(poll, self.rx.read_until_idle(buf))) {
            Ok(Ok(n)) => Ok(n),
            Ok(Err(_)) => Err(Error::Transport),
            Err(_) => Ok(0),
        }
    }
}

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Bring the session up from scratch: handshake, editor mode, current
/// patch state. Loops until a pedal answers.
fn connect(
    session: &mut DeviceSession<MidiLink<BridgePort, Delay>, Delay>,
    display: &mut dyn PatchDisplay,
) {
    loop {
        match session.identify() {
            Ok(model) => {
                info!("device: {} fw {}", model.name(), session.firmware_version());
                display.show_device_info(model.name(), session.firmware_version());
                break;
            }
            Err(e) => {
                warn!("identify failed: {}", e);
                display.clear();
                display.show_string("NO DEVICE", 0, 0);
            }
        }
    }

    if let Err(e) = session
        .set_editor_mode(true)
        .and_then(|_| session.fetch_patch_index().map(|_| ()))
        .and_then(|_| session.fetch_patch_data())
    {
        warn!("initial patch state fetch failed: {}", e);
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("ms-footswitch up");

    // Display backend, picked once at startup.
    static OLED: StaticCell<OledDisplay<twim::Twim<'static, peripherals::TWISPI0>>> =
        StaticCell::new();
    type LcdSpi = ExclusiveDevice<
        spim::Spim<'static, peripherals::SPI3>,
        Output<'static>,
        embassy_time::Delay,
    >;
    static LCD: StaticCell<LcdDisplay<LcdSpi, Output<'static>, Output<'static>>> =
        StaticCell::new();

    let display: &mut dyn PatchDisplay = match config::DISPLAY_KIND {
        DisplayKind::Oled128x32 => {
            let twi_config = twim::Config::default();
            let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twi_config);
            OLED.init(OledDisplay::new(i2c))
        }
        DisplayKind::Lcd160x80 => {
            let mut spi_config = spim::Config::default();
            spi_config.frequency = spim::Frequency::M16;
            let spi = spim::Spim::new_txonly(p.SPI3, Irqs, p.P0_14, p.P0_13, spi_config);
            let cs = Output::new(p.P0_17, Level::High, OutputDrive::Standard);
            let dc = Output::new(p.P0_15, Level::Low, OutputDrive::Standard);
            let rst = Output::new(p.P0_16, Level::High, OutputDrive::Standard);
            let spi_dev = ExclusiveDevice::new(spi, cs, embassy_time::Delay).unwrap();
            LCD.init(LcdDisplay::new(spi_dev, dc, rst, &mut Delay))
        }
    };

    display.show_remote_info(env!("GIT_TAG"), env!("GIT_HASH"));

    // MIDI bridge UART at the DIN-MIDI rate.
    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD31250;
    let uart = uarte::Uarte::new(p.UARTE0, Irqs, p.P1_08, p.P0_08, uart_config);
    let (tx, rx) = uart.split_with_idle(p.TIMER0, p.PPI_CH0, p.PPI_CH1);
    let port = BridgePort { tx, rx };

    let mut session = DeviceSession::new(MidiLink::new(port, Delay), Delay);
    connect(&mut session, display);

    if config::PRELOAD_PATCH_NAMES && session.model().is_valid() {
        display.clear();
        display.show_string("Preloading...", 0, 0);
        let result = session.preload_patch_names(|index, name| {
            info!("{}/50 - {}", index + 1, name);
            display.show_string(&preload_label(index), 0, 1);
        });
        if let Err(e) = result {
            warn!("preload failed: {}", e);
        }
    }

    display.show_patch(session.patch_index(), session.patch_name());

    // Inputs and bypass indicator.
    let switches = Footswitches::new(
        p.P0_11.degrade(),
        p.P0_12.degrade(),
        p.P0_24.degrade(),
    );
    let mut led = Output::new(p.P0_06, Level::Low, OutputDrive::Standard);

    let mut pad = ButtonPad::<3>::new(ButtonConfig {
        debounce_ms: config::BUTTON_DEBOUNCE_MS,
        longpress_ms: config::BUTTON_LONGPRESS_MS,
    });
    let mut router = GestureRouter::new(config::AUTO_CYCLE_MS, config::FULL_BYPASS);

    let mut ticker = Ticker::every(Duration::from_millis(config::TICK_MS));
    loop {
        ticker.next().await;

        let now = now_ms();
        let levels = switches.levels();
        let mut gestures: heapless::Vec<(usize, Gesture), 8> = heapless::Vec::new();
        pad.tick(now, &levels, |i, g| {
            let _ = gestures.push((i, g));
        });

        for (channel, gesture) in gestures {
            let switch = match channel {
                PREV => PedalSwitch::Prev,
                NEXT => PedalSwitch::Next,
                BYPASS => PedalSwitch::Bypass,
                _ => continue,
            };
            let Some(action) = router.on_gesture(switch, gesture, now, session.tuner_enabled())
            else {
                continue;
            };

            if let Err(e) = apply(action, &mut session, display, &mut led) {
                // Treat any exchange failure as a lost pedal and redo the
                // handshake; the loop picks back up afterwards.
                warn!("command failed: {} - reconnecting", e);
                display.clear();
                display.show_string("DISCONNECTED", 0, 0);
                connect(&mut session, display);
                display.show_patch(session.patch_index(), session.patch_name());
            }
        }
    }
}

fn apply(
    action: RouterAction,
    session: &mut DeviceSession<MidiLink<BridgePort, Delay>, Delay>,
    display: &mut dyn PatchDisplay,
    led: &mut Output<'static>,
) -> Result<(), Error> {
    match action {
        RouterAction::PatchStep(delta) => {
            let index = session.increment_patch(delta)?;
            info!("patch {} - {}", index + 1, session.patch_name());
            display.show_patch(index, session.patch_name());
        }
        RouterAction::ToggleTuner => {
            let on = session.toggle_tuner()?;
            info!("tuner {}", on);
            if on {
                display.clear();
                display.show_string("TUNER", 0, 0);
            } else {
                display.show_patch(session.patch_index(), session.patch_name());
            }
        }
        RouterAction::ToggleBypass => {
            let bypassed = session.toggle_bypass()?;
            led.set_level(if bypassed { Level::High } else { Level::Low });
        }
        RouterAction::ToggleFullBypass => {
            let bypassed = session.toggle_full_bypass()?;
            led.set_level(if bypassed { Level::High } else { Level::Low });
        }
    }
    Ok(())
}
