// Glytch Band — Driver Interface Boundary
//
// The core never touches hardware directly. Everything it needs from the
// outside world comes through these traits, so the same pipeline runs against
// the real I2C/GPIO drivers on-device and against scripted doubles on the
// host.

pub mod host;

use crate::events::{ImpactSample, MotionSample};

/// Monotonic millisecond time source. The counter is free-running and may
/// wrap (u32 rolls over after ~49 days), so interval math must go through
/// `wrapping_sub`, never direct comparison.
pub trait Clock {
    fn now_ms(&self) -> u32;

    /// Block the calling thread for `ms`. Only the one-time calibration
    /// burst is allowed to use this; steady-state timing is computed from
    /// timestamps instead.
    fn delay_ms(&self, ms: u32);
}

/// 6-axis inertial sensor (accelerometer + gyro).
pub trait MotionSource {
    /// Whether the sensor answers on the bus. Checked once at startup; a
    /// failure is fatal.
    fn is_connected(&mut self) -> bool;

    /// Read one sample, stamped with the caller-provided tick time. Reads
    /// during steady state always yield a value, stale or not.
    fn read_sample(&mut self, now_ms: u32) -> MotionSample;
}

/// Piezo impulse sensor.
pub trait ImpactSource {
    fn read_impact(&mut self, now_ms: u32) -> ImpactSample;
}

/// Binary vibration motor line. Exclusively owned by the haptic controller —
/// nothing else writes it.
pub trait Actuator {
    fn set_active(&mut self, on: bool);
}

/// Outbound event transport (wireless serial link to the phone).
/// Fire-and-forget: framing, delivery, and retries are the transport's
/// problem, not the core's.
pub trait EventSink {
    fn send_line(&mut self, line: &str);
}
