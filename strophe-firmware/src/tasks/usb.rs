//! USB device and HID report writer tasks

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::HidWriter;
use embassy_usb::driver::EndpointError;
use embassy_usb::UsbDevice;

use crate::channels::{HidReport, HID_CHANNEL};

/// Runs the USB device state machine
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, Driver<'static, USB>>) {
    info!("USB task started");
    device.run().await;
}

/// Drains the HID report channel into the matching IN endpoint
///
/// A report that fails to write (host suspended, endpoint stalled) is
/// dropped; the next input event produces a fresh one.
#[embassy_executor::task]
pub async fn hid_writer_task(
    mut keyboard: HidWriter<'static, Driver<'static, USB>, 8>,
    mut consumer: HidWriter<'static, Driver<'static, USB>, 2>,
    mut mouse: HidWriter<'static, Driver<'static, USB>, 5>,
) {
    info!("HID writer task started");

    loop {
        let result = match HID_CHANNEL.receive().await {
            HidReport::Keyboard(report) => keyboard.write_serialize(&report).await,
            HidReport::Consumer(report) => consumer.write_serialize(&report).await,
            HidReport::Mouse(report) => mouse.write_serialize(&report).await,
        };

        if let Err(e) = result {
            match e {
                EndpointError::BufferOverflow => warn!("HID report too large for endpoint"),
                EndpointError::Disabled => debug!("HID endpoint disabled, report dropped"),
            }
        }
    }
}
