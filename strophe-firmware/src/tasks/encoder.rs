//! Rotary encoder decoding task
//!
//! Decodes quadrature encoder signals into a net detent count. Uses a
//! state machine for reliable decoding with noise rejection; the count
//! is published through an atomic so the poll loop reads it as a plain
//! position sample.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use portable_atomic::{AtomicI32, Ordering};

/// Net encoder rotation in detents since startup
pub static ENCODER_POSITION: AtomicI32 = AtomicI32::new(0);

/// Poll interval; quadrature edges must be sampled fast
const POLL_INTERVAL_MS: u64 = 2;

/// Decoder state machine states
#[derive(Clone, Copy, PartialEq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature decoder
///
/// Quadrature encoding:
/// CW:  A leads B (A changes first when rotating clockwise)
/// CCW: B leads A (B changes first when rotating counter-clockwise)
///
/// One full Idle -> Step1 -> Step2 -> Idle cycle is one detent.
struct Decoder {
    state: State,
    last_a: bool,
    last_b: bool,
}

impl Decoder {
    fn new(a: bool, b: bool) -> Self {
        Self {
            state: State::Idle,
            last_a: a,
            last_b: b,
        }
    }

    /// Feed a fresh sample pair, returning the detent delta if a full
    /// cycle completed
    fn update(&mut self, a: bool, b: bool) -> Option<i32> {
        // No change
        if a == self.last_a && b == self.last_b {
            return None;
        }

        let delta = self.decode(a, b);

        self.last_a = a;
        self.last_b = b;

        delta
    }

    fn decode(&mut self, a: bool, b: bool) -> Option<i32> {
        match self.state {
            State::Idle => {
                if !a && b {
                    // A fell first -> CW direction
                    self.state = State::CwStep1;
                } else if a && !b {
                    // B fell first -> CCW direction
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 => {
                if !a && !b {
                    // Both low -> continue CW
                    self.state = State::CwStep2;
                } else if a && b {
                    // Back to idle (noise/bounce)
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 => {
                if a || b {
                    // Either went high -> complete CW detent
                    self.state = State::Idle;
                    return Some(1);
                }
                None
            }
            State::CcwStep1 => {
                if !a && !b {
                    self.state = State::CcwStep2;
                } else if a && b {
                    self.state = State::Idle;
                }
                None
            }
            State::CcwStep2 => {
                if a || b {
                    // Either went high -> complete CCW detent
                    self.state = State::Idle;
                    return Some(-1);
                }
                None
            }
        }
    }
}

/// Encoder task: samples the CLK/DT pins and maintains the detent count
#[embassy_executor::task]
pub async fn encoder_task(clk: Input<'static>, dt: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = Decoder::new(clk.is_high(), dt.is_high());
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        if let Some(delta) = decoder.update(clk.is_high(), dt.is_high()) {
            ENCODER_POSITION.fetch_add(delta, Ordering::Relaxed);
        }
    }
}
