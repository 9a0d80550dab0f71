//! Chromasort - Color Sorting Arm Firmware
//!
//! Main firmware binary for an RP2040 board driving a five-servo
//! pick-and-place arm and a TCS3200 color sensor. Each object is picked
//! up, classified by color while held, and dropped into that color's bin.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::pwm::{Pwm, PwmOutput};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use chromasort_core::traits::ColorSensor;
use chromasort_drivers::arm::ServoArm;
use chromasort_drivers::sensor::{Tcs3200, Tcs3200Pins};
use chromasort_drivers::servo::ServoConfig;
use chromasort_hal_rp2040::{
    servo_pwm_config, EmbassyClock, PolledPulseInput, RpInput, RpOutput,
};

mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Chromasort firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    config::log_config(&config);

    // Color sensor
    // Pin assignments are board-specific (S0=GPIO2, S1=GPIO3, S2=GPIO4,
    // S3=GPIO5, OUT=GPIO6)
    let pins = Tcs3200Pins {
        s0: RpOutput::new(p.PIN_2.into()),
        s1: RpOutput::new(p.PIN_3.into()),
        s2: RpOutput::new(p.PIN_4.into()),
        s3: RpOutput::new(p.PIN_5.into()),
    };
    let out = PolledPulseInput::new(RpInput::new(p.PIN_6.into()), EmbassyClock);
    let mut sensor = Tcs3200::new(pins, out, Delay, &config.sensor);

    info!("Color sensor initialized");

    // Test the color sensor before the arm starts moving
    let policy = config.classifier.policy();
    let check = sensor.classify(&policy);
    info!(
        "Sensor check: red={} green={} blue={} -> {}",
        check.reading.red.us(),
        check.reading.green.us(),
        check.reading.blue.us(),
        check.label.name()
    );
    tasks::report(&check, &policy);
    Timer::after_millis(config.arm.settle_ms as u64).await;

    // Servos, one PWM slice each on channel A
    // Base=GPIO10, Arm=GPIO12, Wrist=GPIO14, Tilt=GPIO16, Gripper=GPIO18
    let pwm_config = servo_pwm_config();
    let servos: [PwmOutput<'static>; 5] = [
        servo_output(Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, pwm_config.clone())),
        servo_output(Pwm::new_output_a(p.PWM_SLICE6, p.PIN_12, pwm_config.clone())),
        servo_output(Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, pwm_config.clone())),
        servo_output(Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config.clone())),
        servo_output(Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, pwm_config)),
    ];
    let arm = unwrap!(ServoArm::new(servos, ServoConfig::default(), Delay));

    info!("Servos initialized");

    tasks::sort_loop(arm, sensor, config).await
}

/// Take channel A of a PWM slice
fn servo_output(pwm: Pwm<'static>) -> PwmOutput<'static> {
    let (a, _b) = pwm.split();
    unwrap!(a)
}
