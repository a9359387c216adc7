// Glytch Band — Shared Data Model & Events

use thiserror::Error;

// ---------------------------------------------------------------------------
// Sensor samples (raw integer readings, one per loop tick)
// ---------------------------------------------------------------------------

/// One 6-axis IMU reading: 3-axis acceleration plus 3-axis angular rate, in
/// raw sensor units, stamped with the tick time. Not retained past the tick
/// that consumes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionSample {
    pub ax: i16,
    pub ay: i16,
    pub az: i16,
    pub gx: i16,
    pub gy: i16,
    pub gz: i16,
    pub timestamp_ms: u32,
}

impl MotionSample {
    /// Squared magnitude of the acceleration vector. Three i16² terms can
    /// reach ~3.2e9, past i32 — widened to i64.
    pub fn acc_mag_sq(&self) -> i64 {
        let (ax, ay, az) = (self.ax as i64, self.ay as i64, self.az as i64);
        ax * ax + ay * ay + az * az
    }
}

/// One piezo impulse reading (raw ADC units).
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactSample {
    pub magnitude: i32,
    pub timestamp_ms: u32,
}

// ---------------------------------------------------------------------------
// Gyro baseline
// ---------------------------------------------------------------------------

/// Per-axis angular-rate bias measured at startup while the wrist is still.
/// Immutable after calibration unless recalibration is explicitly requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaselineOffset {
    pub gx: i16,
    pub gy: i16,
    pub gz: i16,
}

// ---------------------------------------------------------------------------
// Detected events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Yes,
    No,
}

impl Gesture {
    /// The line shipped to the transport — the phone side parses these
    /// literally, so the format is part of the protocol.
    pub fn wire_message(&self) -> &'static str {
        match self {
            Self::Yes => "GESTURE:YES",
            Self::No => "GESTURE:NO",
        }
    }
}

/// Wire message for a fall detection.
pub const FALL_MESSAGE: &str = "EVENT:FALL";

/// A declared fall: both sensors crossed their thresholds in the same
/// evaluation. Carries the readings for logging.
#[derive(Debug, Clone, Copy)]
pub struct FallEvent {
    pub impact: i32,
    pub acc_mag_sq: i64,
    pub timestamp_ms: u32,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The one unrecoverable condition in the design: without a responding IMU
/// there is no baseline and nothing downstream may run.
#[derive(Debug, Error)]
pub enum BandError {
    #[error("inertial sensor did not respond during startup")]
    ImuUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acc_mag_sq_widens_past_i32() {
        // Full-scale on all three axes would overflow a 32-bit accumulator.
        let s = MotionSample {
            ax: i16::MIN,
            ay: i16::MIN,
            az: i16::MIN,
            ..Default::default()
        };
        assert_eq!(s.acc_mag_sq(), 3 * (32768i64 * 32768));
    }

    #[test]
    fn wire_messages_are_exact() {
        assert_eq!(Gesture::Yes.wire_message(), "GESTURE:YES");
        assert_eq!(Gesture::No.wire_message(), "GESTURE:NO");
        assert_eq!(FALL_MESSAGE, "EVENT:FALL");
    }
}
