// Glytch Band — Tuning & Timing Configuration
//
// Every threshold in the detection pipeline is an empirically tuned value.
// The defaults live here, grouped into per-component config structs, so the
// numbers can be adjusted in one place instead of hiding inside the
// detectors.

// ---------------------------------------------------------------------------
// Gesture detection (wrist twist)
// ---------------------------------------------------------------------------
pub const GYRO_SENSITIVITY: f32 = 131.0;     // LSB per °/s at ±250 °/s
pub const DEADZONE_DPS: f32 = 40.0;          // below this is sensor noise
pub const TWIST_THRESHOLD_DPS: f32 = 200.0;  // deliberate-twist firing rate
pub const GESTURE_COOLDOWN_MS: u32 = 600;

// ---------------------------------------------------------------------------
// Fall detection
// ---------------------------------------------------------------------------
pub const IMPACT_THRESHOLD: i32 = 2500;              // raw piezo ADC units
pub const ACC_MAG_SQ_THRESHOLD: i64 = 400_000_000;   // raw accel units²
pub const FALL_DEBOUNCE_MS: u32 = 1000;

// ---------------------------------------------------------------------------
// Gyro baseline calibration
// ---------------------------------------------------------------------------
pub const CALIBRATION_SAMPLES: u32 = 200;
pub const CALIBRATION_INTERVAL_MS: u32 = 5;

// ---------------------------------------------------------------------------
// Haptic pattern timing (milliseconds)
// ---------------------------------------------------------------------------
pub const YES_PULSE_MS: u32 = 150;   // single short buzz
pub const NO_PHASE_MS: u32 = 120;    // each leg of the on-off-on double buzz
pub const FALL_PULSE_MS: u32 = 400;  // single long buzz

// ---------------------------------------------------------------------------
// Control loop
// ---------------------------------------------------------------------------
pub const LOOP_PACE_MS: u32 = 5;
pub const TELEMETRY_INTERVAL_MS: u32 = 500;

/// Which gyro axis carries the wrist-twist motion. Depends on how the band
/// sits on the wrist; Y for the reference strap orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwistAxis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone)]
pub struct GestureConfig {
    pub twist_axis: TwistAxis,
    /// +1.0 or -1.0 — flips the twist direction for a band worn mirrored.
    pub invert_sign: f32,
    /// Raw gyro LSB per °/s.
    pub gyro_sensitivity: f32,
    pub deadzone_dps: f32,
    pub twist_threshold_dps: f32,
    pub cooldown_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            twist_axis: TwistAxis::Y,
            invert_sign: 1.0,
            gyro_sensitivity: GYRO_SENSITIVITY,
            deadzone_dps: DEADZONE_DPS,
            twist_threshold_dps: TWIST_THRESHOLD_DPS,
            cooldown_ms: GESTURE_COOLDOWN_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FallConfig {
    pub impact_threshold: i32,
    pub acc_mag_sq_threshold: i64,
    pub debounce_ms: u32,
}

impl Default for FallConfig {
    fn default() -> Self {
        Self {
            impact_threshold: IMPACT_THRESHOLD,
            acc_mag_sq_threshold: ACC_MAG_SQ_THRESHOLD,
            debounce_ms: FALL_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    pub samples: u32,
    pub interval_ms: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            samples: CALIBRATION_SAMPLES,
            interval_ms: CALIBRATION_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HapticConfig {
    pub yes_pulse_ms: u32,
    pub no_phase_ms: u32,
    pub fall_pulse_ms: u32,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            yes_pulse_ms: YES_PULSE_MS,
            no_phase_ms: NO_PHASE_MS,
            fall_pulse_ms: FALL_PULSE_MS,
        }
    }
}

/// Everything the band needs, bundled. Fixed at start time.
#[derive(Debug, Clone)]
pub struct BandConfig {
    pub gesture: GestureConfig,
    pub fall: FallConfig,
    pub calibration: CalibrationConfig,
    pub haptic: HapticConfig,
    pub loop_pace_ms: u32,
    pub telemetry_interval_ms: u32,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            fall: FallConfig::default(),
            calibration: CalibrationConfig::default(),
            haptic: HapticConfig::default(),
            loop_pace_ms: LOOP_PACE_MS,
            telemetry_interval_ms: TELEMETRY_INTERVAL_MS,
        }
    }
}
