//! Sorting loop
//!
//! Drives the sort cycle: performs arm actions, waits out dwells without
//! blocking the executor, and classifies the held object when asked.
//! Servo moves and sensor sampling block this task for their duration.

use defmt::*;
use embassy_time::Timer;

use chromasort_core::color::{Channel, Classification, ClassifierPolicy, Outcome};
use chromasort_core::config::MachineConfig;
use chromasort_core::sequence::{Action, Phase, SortCycle};
use chromasort_core::traits::{ArmActuator, ColorSensor};

/// Run the pick-classify-place cycle forever
pub async fn sort_loop<A: ArmActuator, S: ColorSensor>(
    mut arm: A,
    mut sensor: S,
    config: MachineConfig,
) -> ! {
    let policy = config.classifier.policy();
    let mut cycle = SortCycle::new(config.arm, config.bins);
    let mut phase = cycle.phase();

    info!("Sorter started: {}", phase);

    loop {
        let action = cycle.next_action();

        if cycle.phase() != phase {
            phase = cycle.phase();
            match phase {
                Phase::Picking => info!("Picking object #{}", cycle.cycles() + 1),
                Phase::Complete => info!("Cycle complete ({} sorted)", cycle.cycles()),
                _ => info!("Phase: {}", phase),
            }
        }

        match action {
            Action::Dwell { ms } => Timer::after_millis(ms as u64).await,
            Action::Classify => {
                let result = sensor.classify(&policy);
                report(&result, &policy);
                cycle.record_classification(result.label);
                info!(
                    "Moving base to {} bin ({} deg)",
                    result.label.name(),
                    cycle.target_bin().degrees()
                );
            }
            action => {
                // Open loop: a failed servo write is logged and the cycle
                // carries on with the next step
                if let Err(e) = action.apply(&mut arm) {
                    warn!("{} failed: {}", action, e);
                }
            }
        }
    }
}

/// Log raw readings, per-channel status and the decision
pub fn report(result: &Classification, policy: &ClassifierPolicy) {
    for channel in Channel::ALL {
        debug!(
            "{}: {} us ({})",
            channel,
            result.reading.get(channel).us(),
            result.status_of(channel)
        );
    }

    match result.outcome {
        Outcome::Dominant(channel) => info!("Detected {} object", channel),
        Outcome::Ambiguous { lowest } => {
            warn!("Ambiguous reading (lowest: {}), using fallback bin", lowest)
        }
        Outcome::NoValidReadings => {
            warn!("No valid readings under {}, using fallback bin", policy)
        }
    }
}
