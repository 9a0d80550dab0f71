//! Configuration loading
//!
//! The machine config is compiled into the firmware from machine.toml.
//! build.rs has already rejected invalid files, so a parse failure here
//! means the embedded text and the parser disagree; fall back to the
//! reference defaults rather than refusing to run.

use defmt::*;

use chromasort_core::config::{parse_config, MachineConfig};

/// Embedded configuration (compiled into firmware)
/// Edit machine.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../machine.toml");

/// Parse the embedded config, or use defaults
pub fn load_config() -> MachineConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded machine.toml");
            config
        }
        Err(e) => {
            error!("machine.toml rejected ({}), using defaults", e);
            MachineConfig::default()
        }
    }
}

/// Log the settings that matter when tuning the classifier
pub fn log_config(config: &MachineConfig) {
    info!(
        "Sensor: scaling={}, settling={}ms, timeout={}us",
        config.sensor.frequency_scaling, config.sensor.settling_ms, config.sensor.timeout_us
    );
    info!("Classifier: {}", config.classifier.policy());
    info!(
        "Bins: red={} green={} blue={} unknown={}",
        config.bins.red.degrees(),
        config.bins.green.degrees(),
        config.bins.blue.degrees(),
        config.bins.unknown.degrees()
    );
}
