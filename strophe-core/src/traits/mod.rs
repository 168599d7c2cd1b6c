//! Capability traits
//!
//! These traits define the interface between the input core and
//! hardware-specific implementations. The controller only ever talks
//! to hardware through them, so tests substitute recording fakes.

pub mod hid;
pub mod indicator;
pub mod sensors;

pub use hid::HidSink;
pub use indicator::Indicator;
pub use sensors::Sensors;
