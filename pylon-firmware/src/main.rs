//! Pylon - Automated Car Park Controller
//!
//! Firmware binary for RP2040-based boards. One cooperative executor
//! runs four tasks: the 50ms control loop that owns all lot state, the
//! dashboard UART server, the LCD mirror and the receipt notifier.
//!
//! Named after the Greek "pylon" (πυλών) meaning "gateway" - the
//! firmware's whole job is deciding when the gateway opens.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart, UartTx};
use embassy_time::Delay;
use fixed::traits::ToFixed;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pylon_drivers::display::Lcd1602;
use pylon_drivers::gpio::GpioLed;
use pylon_drivers::sensor::{Hcsr04, IrSensor};
use pylon_drivers::servo::compare_for_angle;

use crate::hw::{BarrierServo, UptimeTimer, SERVO_PWM_TOP};
use crate::tasks::notifier::BridgeLink;

mod channels;
mod hw;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// PCF8574 backpack address
const LCD_ADDR: u8 = 0x27;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pylon firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Entry gate ultrasonic sensor: TRIG=GPIO2, ECHO=GPIO3
    let trig = Output::new(p.PIN_2, Level::Low);
    let echo = Input::new(p.PIN_3, Pull::None);
    let entry_sensor = Hcsr04::new(trig, echo, Delay, UptimeTimer);

    // Per-bay IR sensors (active low, open collector): GPIO10..GPIO12
    let bays = [
        IrSensor::new(Input::new(p.PIN_10, Pull::Up)),
        IrSensor::new(Input::new(p.PIN_11, Pull::Up)),
        IrSensor::new(Input::new(p.PIN_12, Pull::Up)),
    ];

    // Barrier servo on GPIO16, PWM slice 0 channel A.
    // 125MHz sys clock / 125 = 1MHz tick; top 19999 gives the 20ms servo
    // period with one count per microsecond.
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = 125.to_fixed();
    pwm_config.top = SERVO_PWM_TOP;
    pwm_config.compare_a = compare_for_angle(0, SERVO_PWM_TOP);
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config.clone());
    let servo = BarrierServo::new(pwm, pwm_config);
    info!("Barrier servo initialized");

    // Indicator LEDs: gate motion on GPIO14, lot-full on GPIO15
    let gate_led = GpioLed::new(Output::new(p.PIN_14, Level::Low));
    let full_led = GpioLed::new(Output::new(p.PIN_15, Level::Low));

    // UART0 (buffered) serves the dashboard through the serial bridge
    let tx_buf = TX_BUF.init([0u8; 1024]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (dash_tx, dash_rx) = uart.split();
    info!("Dashboard UART initialized");

    // UART1 TX feeds the receipt bridge
    let notify_tx = UartTx::new_blocking(p.UART1, p.PIN_8, UartConfig::default());
    let bridge = BridgeLink::new(notify_tx);

    // 16x2 status panel on I2C0: SDA=GPIO4, SCL=GPIO5
    let i2c_bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    match Lcd1602::new(i2c_bus, LCD_ADDR, Delay) {
        Ok(panel) => {
            spawner.spawn(tasks::lcd_task(panel)).unwrap();
            info!("LCD initialized");
        }
        Err(_) => {
            warn!("LCD not responding at {=u8:#04x}, running without panel", LCD_ADDR);
        }
    }

    // Spawn tasks
    spawner
        .spawn(tasks::control_task(
            entry_sensor,
            bays,
            servo,
            gate_led,
            full_led,
        ))
        .unwrap();
    spawner.spawn(tasks::dashboard_task(dash_rx, dash_tx)).unwrap();
    spawner.spawn(tasks::notifier_task(bridge)).unwrap();

    info!("All tasks spawned, controller running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
