//! Simple TOML parser for machine configuration
//!
//! A minimal, allocation-free parser for the subset of TOML the machine
//! config uses. It does NOT support all of TOML.
//!
//! Supported features:
//! - `[section]` headers (`sensor`, `classifier`, `bins`, `arm`)
//! - `key = value` pairs (quoted string, unsigned integer)
//! - Underscores in integers (`1_000_000`)
//! - Comments (`# ...`), including after a value
//!
//! Unknown keys are ignored; the firmware build validates the file
//! strictly before it is embedded.

use super::hardware::FrequencyScaling;
use super::types::ClassifierKind;
use super::{ConfigError, MachineConfig};
use crate::color::BinPosition;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range for its field
    InvalidValue,
    /// Parsed config failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sensor,
    Classifier,
    Bins,
    Arm,
}

/// Parse TOML configuration into MachineConfig
///
/// Missing sections and keys keep their defaults. The result is validated
/// before it is returned.
pub fn parse_config(input: &str) -> Result<MachineConfig, ParseError> {
    let mut config = MachineConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse section header like "sensor" or "arm"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "sensor" => Ok(Section::Sensor),
        "classifier" => Ok(Section::Classifier),
        "bins" => Ok(Section::Bins),
        "arm" => Ok(Section::Arm),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Remove a trailing comment, leaving `#` inside strings alone
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse an unsigned integer, allowing `_` separators
fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let mut result: u32 = 0;
    let mut digits = 0;

    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }

    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(result)
}

fn parse_u16(value: &str) -> Result<u16, ParseError> {
    u16::try_from(parse_u32(value)?).map_err(|_| ParseError::InvalidValue)
}

fn parse_angle(value: &str) -> Result<u8, ParseError> {
    u8::try_from(parse_u32(value)?).map_err(|_| ParseError::InvalidValue)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MachineConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Sensor => {
            let sensor = &mut config.sensor;
            match key {
                "frequency_scaling" => {
                    sensor.frequency_scaling = FrequencyScaling::from_name(parse_string(value)?)
                        .ok_or(ParseError::InvalidValue)?;
                }
                "settling_ms" => sensor.settling_ms = parse_u16(value)?,
                "timeout_us" => sensor.timeout_us = parse_u32(value)?,
                _ => {}
            }
        }
        Section::Classifier => {
            let classifier = &mut config.classifier;
            match key {
                "policy" => {
                    classifier.policy = ClassifierKind::from_name(parse_string(value)?)
                        .ok_or(ParseError::InvalidValue)?;
                }
                "min_valid" => classifier.min_valid = parse_u32(value)?,
                "max_valid" => classifier.max_valid = parse_u32(value)?,
                "dominance_permille" => classifier.dominance_permille = parse_u16(value)?,
                "ceiling" => classifier.ceiling = parse_u32(value)?,
                _ => {}
            }
        }
        Section::Bins => {
            let bin = BinPosition(parse_angle(value)?);
            match key {
                "red" => config.bins.red = bin,
                "green" => config.bins.green = bin,
                "blue" => config.bins.blue = bin,
                "unknown" => config.bins.unknown = bin,
                _ => {}
            }
        }
        Section::Arm => {
            let arm = &mut config.arm;
            match key {
                "base_pick" => arm.base_pick = parse_angle(value)?,
                "arm_rest" => arm.arm_rest = parse_angle(value)?,
                "arm_mid" => arm.arm_mid = parse_angle(value)?,
                "arm_pick" => arm.arm_pick = parse_angle(value)?,
                "arm_release" => arm.arm_release = parse_angle(value)?,
                "wrist_pick" => arm.wrist_pick = parse_angle(value)?,
                "wrist_lift" => arm.wrist_lift = parse_angle(value)?,
                "tilt_initial" => arm.tilt_initial = parse_angle(value)?,
                "tilt_grip" => arm.tilt_grip = parse_angle(value)?,
                "gripper_open" => arm.gripper_open = parse_angle(value)?,
                "gripper_closed" => arm.gripper_closed = parse_angle(value)?,
                "step_delay_ms" => arm.step_delay_ms = parse_u16(value)?,
                "base_step_delay_ms" => arm.base_step_delay_ms = parse_u16(value)?,
                "settle_ms" => arm.settle_ms = parse_u32(value)?,
                "long_settle_ms" => arm.long_settle_ms = parse_u32(value)?,
                "attach_settle_ms" => arm.attach_settle_ms = parse_u32(value)?,
                "phase_gap_ms" => arm.phase_gap_ms = parse_u32(value)?,
                "cycle_pause_ms" => arm.cycle_pause_ms = parse_u32(value)?,
                "ready_ms" => arm.ready_ms = parse_u32(value)?,
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ClassifierPolicy, ColorLabel};
    use crate::config::ConfigError;

    const FULL_CONFIG: &str = r#"
# Reference arm
[sensor]
frequency_scaling = "20%"
settling_ms = 50          # faster sampling
timeout_us = 250_000

[classifier]
policy = "thresholded_argmin"
ceiling = 50

[bins]
red = 60
green = 30
blue = 90
unknown = 120

[arm]
arm_pick = 135
step_delay_ms = 10
phase_gap_ms = 750
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(FULL_CONFIG).unwrap();

        assert_eq!(config.sensor.frequency_scaling, FrequencyScaling::Percent20);
        assert_eq!(config.sensor.settling_ms, 50);
        assert_eq!(config.sensor.timeout_us, 250_000);

        assert_eq!(
            config.classifier.policy(),
            ClassifierPolicy::ThresholdedArgmin { ceiling: 50 }
        );

        assert_eq!(config.bins.bin_for(ColorLabel::Unknown), BinPosition(120));
        assert_eq!(config.bins.bin_for(ColorLabel::Green), BinPosition(30));

        assert_eq!(config.arm.arm_pick, 135);
        assert_eq!(config.arm.step_delay_ms, 10);
        assert_eq!(config.arm.phase_gap_ms, 750);
        // Untouched keys keep defaults
        assert_eq!(config.arm.arm_mid, 60);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), MachineConfig::default());
        assert_eq!(
            parse_config("# nothing here\n\n").unwrap(),
            MachineConfig::default()
        );
    }

    #[test]
    fn test_unknown_section() {
        let result = parse_config("[stepper]\nspeed = 10\n");
        assert_eq!(result, Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let config = parse_config("[sensor]\ncolour = \"blue\"\nsettling_ms = 80\n").unwrap();
        assert_eq!(config.sensor.settling_ms, 80);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[bins]\nred = 300\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[sensor]\nsettling_ms = fast\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[sensor]\nfrequency_scaling = 20\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[classifier]\npolicy = \"best\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[sensor]\ntimeout_us = 99999999999\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_invalid_line() {
        assert_eq!(
            parse_config("[sensor]\nsettling_ms\n"),
            Err(ParseError::InvalidLine)
        );
    }

    #[test]
    fn test_validation_runs() {
        assert_eq!(
            parse_config("[classifier]\nmin_valid = 50\nmax_valid = 10\n"),
            Err(ParseError::Invalid(ConfigError::EmptyValidRange))
        );
        assert_eq!(
            parse_config("[arm]\nbase_pick = 190\n"),
            Err(ParseError::Invalid(ConfigError::AngleOutOfRange))
        );
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("a = 1 # note"), "a = 1 ");
        assert_eq!(strip_comment("a = \"#1\""), "a = \"#1\"");
        assert_eq!(strip_comment("# all comment"), "");
    }

    #[test]
    fn test_parse_u32() {
        assert_eq!(parse_u32("1_000_000"), Ok(1_000_000));
        assert_eq!(parse_u32("0"), Ok(0));
        assert_eq!(parse_u32("_"), Err(ParseError::InvalidValue));
        assert_eq!(parse_u32("-5"), Err(ParseError::InvalidValue));
        assert_eq!(parse_u32("4294967296"), Err(ParseError::InvalidValue));
    }
}
