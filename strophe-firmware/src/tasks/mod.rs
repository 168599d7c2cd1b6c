//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod encoder;
pub mod pixel;
pub mod poll;
pub mod usb;

pub use encoder::{encoder_task, ENCODER_POSITION};
pub use pixel::pixel_task;
pub use poll::poll_task;
pub use usb::{hid_writer_task, usb_task};
