//! HID output trait

/// Sink for HID output events
///
/// Implementations assemble and emit the actual USB reports. Calls are
/// fire-and-forget from the core's point of view; queueing and
/// delivery failures are the implementation's concern.
pub trait HidSink {
    /// Assert a keyboard usage
    fn key_down(&mut self, code: u8);

    /// Release a keyboard usage
    fn key_up(&mut self, code: u8);

    /// Assert a consumer-control usage
    fn consumer_down(&mut self, usage: u16);

    /// Release a consumer-control usage
    fn consumer_up(&mut self, usage: u16);

    /// Emit a relative pointer movement
    fn pointer_move(&mut self, dx: i8, dy: i8);
}
