//! Glytch Band — wrist gesture and fall detection core.
//!
//! Converts raw 6-axis IMU and piezo impulse readings into YES/NO wrist-twist
//! gestures and FALL events, drives a vibration motor with timed non-blocking
//! feedback patterns, and reports each detection as one line of text to an
//! external transport.
//!
//! The pipeline is single-threaded and cooperative: one control loop advances
//! the haptic state machine, pulls fresh samples, and runs the fall and
//! gesture detectors, all against a wrapping millisecond clock. Hardware sits
//! behind the traits in [`drivers`], so the same core runs on-device and
//! under test.

pub mod band;
pub mod calibration;
pub mod config;
pub mod drivers;
pub mod events;
pub mod fall;
pub mod gesture;
pub mod haptic;

pub use band::Band;
pub use config::BandConfig;
pub use events::{BandError, BaselineOffset, FallEvent, Gesture, ImpactSample, MotionSample};
