//! Input poll task
//!
//! Owns the knob controller and drives it at a fixed cadence. All
//! interpretation lives in strophe-core; this task just wires the board
//! peripherals into it.

use defmt::*;
use embassy_time::{Duration, Ticker};

use strophe_core::config::KnobConfig;
use strophe_core::controller::KnobController;

use crate::hardware::{BoardIndicator, KnobSensors};
use crate::hid::UsbHidSink;

/// Poll interval for the input loop
const POLL_INTERVAL_MS: u64 = 10;

#[embassy_executor::task]
pub async fn poll_task(
    config: KnobConfig,
    mut sensors: KnobSensors,
    mut indicator: BoardIndicator,
) {
    info!("Poll task started");

    let mut hid = UsbHidSink::new();

    let mut controller = match KnobController::new(config, &mut sensors, &mut indicator) {
        Ok(c) => c,
        Err(e) => {
            error!("Controller init failed: {}", e);
            panic!("unusable keymap");
        }
    };

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;
        controller.poll_tick(&mut sensors, &mut hid, &mut indicator);
    }
}
