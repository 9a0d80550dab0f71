//! Servo PWM configuration
//!
//! A PWM slice counts from 0 to `top` at SYS_CLK / divider. For a 50 Hz
//! servo signal with a divider of 64:
//!
//! 125 MHz / 64 = 1.953125 MHz, and 1_953_125 / 50 = 39_062 counts per
//! period, so `top` = 39_061.
//!
//! The resulting outputs implement `embedded_hal::pwm::SetDutyCycle`, which
//! the servo driver scales against.

use embassy_rp::pwm::Config;
use fixed::types::extra::U4;
use fixed::FixedU16;

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Servo refresh rate
pub const SERVO_PWM_HZ: u32 = 50;

/// Integer clock divider for servo slices
pub const SERVO_DIVIDER: u8 = 64;

/// Counter wrap value for a given output frequency
///
/// Returns `None` if the period does not fit the 16-bit counter.
pub fn calc_top(freq_hz: u32, divider: u8) -> Option<u16> {
    if freq_hz == 0 || divider == 0 {
        return None;
    }
    let counts = SYS_CLK_HZ / divider as u32 / freq_hz;
    u16::try_from(counts.checked_sub(1)?).ok()
}

/// Slice configuration for 50 Hz servo outputs, starting at 0% duty
pub fn servo_pwm_config() -> Config {
    let mut config = Config::default();
    config.divider = FixedU16::<U4>::from_num(SERVO_DIVIDER);
    // 125 MHz / 64 / 50 Hz always fits
    config.top = calc_top(SERVO_PWM_HZ, SERVO_DIVIDER).unwrap_or(u16::MAX);
    config.compare_a = 0;
    config.compare_b = 0;
    config
}
