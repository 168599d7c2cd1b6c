//! Status pixel task
//!
//! Drives the single WS2812 status LED through PIO. Sleeps until the
//! poll loop signals a new color.

use defmt::*;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use smart_leds::RGB8;

use crate::channels::PIXEL_COLOR;

#[embassy_executor::task]
pub async fn pixel_task(mut ws2812: PioWs2812<'static, PIO0, 0, 1>) {
    info!("Pixel task started");

    loop {
        let color = PIXEL_COLOR.wait().await;
        ws2812
            .write(&[RGB8::new(color.r, color.g, color.b)])
            .await;
    }
}
