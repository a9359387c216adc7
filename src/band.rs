// Glytch Band — Steady-State Control Loop
//
// One tick: sample the clock once, advance the haptics, pull fresh sensor
// readings, evaluate fall then gesture, and fan any detection out to the
// motor and the transport. The haptic controller is advanced before the
// detectors run, so a trigger recorded on the previous tick reaches the
// motor before this tick can preempt it.
//
// Everything here is single-threaded and cooperative: the three state
// machines (gesture, fall, haptic) share one logical thread of execution, so
// no locking is needed around the baseline, the guard timestamps, or the
// motor line.

use crate::calibration::Calibrator;
use crate::config::BandConfig;
use crate::drivers::{Actuator, Clock, EventSink, ImpactSource, MotionSource};
use crate::events::{BandError, BaselineOffset, Gesture, FALL_MESSAGE};
use crate::fall::FallDetector;
use crate::gesture::GestureDetector;
use crate::haptic::HapticController;

pub struct Band<C, M, P, A, S> {
    config: BandConfig,
    clock: C,
    imu: M,
    piezo: P,
    actuator: A,
    sink: S,

    baseline: BaselineOffset,
    gesture: GestureDetector,
    fall: FallDetector,
    haptic: HapticController,

    last_telemetry_ms: u32,
}

impl<C, M, P, A, S> Band<C, M, P, A, S>
where
    C: Clock,
    M: MotionSource,
    P: ImpactSource,
    A: Actuator,
    S: EventSink,
{
    /// Calibrate and assemble the loop. No gesture, fall, or haptic
    /// processing happens before this returns: a sensor that fails its
    /// connection check is fatal and yields `Err` instead of a `Band`.
    pub fn init(
        config: BandConfig,
        clock: C,
        mut imu: M,
        piezo: P,
        mut actuator: A,
        sink: S,
    ) -> Result<Self, BandError> {
        // Motor known-off before anything else runs.
        actuator.set_active(false);

        let baseline = Calibrator::new(config.calibration.clone()).calibrate(&mut imu, &clock)?;

        let now = clock.now_ms();
        Ok(Self {
            gesture: GestureDetector::new(config.gesture.clone()),
            fall: FallDetector::new(config.fall.clone()),
            haptic: HapticController::new(config.haptic.clone()),
            config,
            clock,
            imu,
            piezo,
            actuator,
            sink,
            baseline,
            last_telemetry_ms: now,
        })
    }

    /// One pass of the control loop. Never blocks.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();

        // Haptics first: last tick's trigger is reflected on the motor
        // before this tick's detection can preempt it mid-phase.
        self.haptic.update(now, &mut self.actuator);

        let motion = self.imu.read_sample(now);
        let impact = self.piezo.read_impact(now);

        if let Some(fall) = self.fall.evaluate(&motion, &impact) {
            log::warn!(
                "FALL detected (impact {}, |a|² {})",
                fall.impact,
                fall.acc_mag_sq
            );
            self.sink.send_line(FALL_MESSAGE);
            self.haptic.trigger_fall(now);
        }

        if let Some(gesture) = self.gesture.evaluate(&motion, &self.baseline) {
            log::info!("{:?} gesture detected", gesture);
            self.sink.send_line(gesture.wire_message());
            match gesture {
                Gesture::Yes => self.haptic.trigger_yes(now),
                Gesture::No => self.haptic.trigger_no(now),
            }
        }

        // Rate-limited signal telemetry.
        if now.wrapping_sub(self.last_telemetry_ms) >= self.config.telemetry_interval_ms {
            log::debug!(
                "piezo: {}  twist: {:.1} dps",
                impact.magnitude,
                self.gesture.last_twist_dps()
            );
            self.last_telemetry_ms = now;
        }
    }

    /// Steady-state loop. The pace delay only spaces ticks out — every
    /// pattern and guard interval is computed from timestamps, so jitter
    /// here cannot desynchronize haptic phases.
    pub fn run(&mut self) -> ! {
        log::info!("Entering steady-state loop");
        loop {
            self.tick();
            self.clock.delay_ms(self.config.loop_pace_ms);
        }
    }

    /// Rerun the calibration burst and replace the baseline. The wrist must
    /// be held still for the duration, same as at startup.
    pub fn recalibrate(&mut self) -> Result<(), BandError> {
        self.baseline =
            Calibrator::new(self.config.calibration.clone()).calibrate(&mut self.imu, &self.clock)?;
        Ok(())
    }

    pub fn baseline(&self) -> BaselineOffset {
        self.baseline
    }

    pub fn haptic(&self) -> &HapticController {
        &self.haptic
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::host::{ManualClock, RecordingActuator, RecordingSink, ScriptedImu, ScriptedPiezo};
    use crate::haptic::HapticPattern;

    type TestBand = Band<ManualClock, ScriptedImu, ScriptedPiezo, RecordingActuator, RecordingSink>;

    /// An IMU whose first 200 readings (the calibration burst) are zeros;
    /// session samples get pushed after.
    fn still_imu() -> ScriptedImu {
        let mut imu = ScriptedImu::new();
        imu.push_n([0, 0, 0, 0, 0, 0], 200);
        imu
    }

    /// Boot a band against the given scripts. Calibration consumes the first
    /// 200 IMU readings; the piezo is not read until steady state.
    fn boot(imu: ScriptedImu, piezo: ScriptedPiezo) -> (TestBand, ManualClock) {
        let clock = ManualClock::new();
        let band = Band::init(
            BandConfig::default(),
            clock.clone(),
            imu,
            piezo,
            RecordingActuator::new(),
            RecordingSink::new(),
        )
        .expect("calibration should succeed");
        (band, clock)
    }

    #[test]
    fn disconnected_imu_makes_init_fatal() {
        let result = Band::init(
            BandConfig::default(),
            ManualClock::new(),
            ScriptedImu::disconnected(),
            ScriptedPiezo::new(),
            RecordingActuator::new(),
            RecordingSink::new(),
        );
        assert!(matches!(result, Err(BandError::ImuUnavailable)));
    }

    // A biased gyro is calibrated out, and the residual rate lands deep in
    // the deadzone.
    #[test]
    fn calibrated_bias_does_not_register_as_a_gesture() {
        let mut imu = ScriptedImu::new();
        imu.push_n([0, 0, 0, 0, 5, 0], 200); // calibration burst, gy bias 5
        imu.push([0, 0, 0, 0, 250, 0]); // (250-5)/131 ≈ 1.87 dps

        let (mut band, _clock) = boot(imu, ScriptedPiezo::new());
        assert_eq!(band.baseline().gy, 5);

        band.tick();
        assert!(band.sink().lines.is_empty());
        assert!(!band.actuator().is_on());
    }

    #[test]
    fn hard_twist_emits_yes_and_pulses_the_motor_once() {
        let mut imu = still_imu();
        imu.push([0, 0, 0, 0, 30_000, 0]); // ~229 dps from a zero baseline

        let (mut band, clock) = boot(imu, ScriptedPiezo::new());
        let trigger_ms = clock.now_ms();

        band.tick();
        assert_eq!(band.sink().lines, vec!["GESTURE:YES"]);
        // Trigger recorded this tick; the motor turns on at the next advance.
        assert!(!band.actuator().is_on());

        // Pulse runs for the configured 150 ms, then the motor drops.
        loop {
            clock.advance(5);
            band.tick();
            let elapsed = clock.now_ms().wrapping_sub(trigger_ms);
            if elapsed < 150 {
                assert!(band.actuator().is_on(), "motor off at {elapsed} ms");
            } else {
                assert!(!band.actuator().is_on());
                break;
            }
        }
        assert_eq!(band.haptic().pattern(), HapticPattern::Idle);

        // The IMU holds the twist rate; hysteresis keeps it a single event.
        assert_eq!(band.sink().lines.len(), 1);
    }

    #[test]
    fn fall_requires_both_sensors_and_respects_debounce() {
        let mut imu = still_imu();
        let mut piezo = ScriptedPiezo::new();
        // |a|² = 22_000² + 10_000² ≈ 5.8e8 > 4e8, impact 3000 > 2500.
        imu.push([22_000, 10_000, 0, 0, 0, 0]);
        piezo.push(3000);

        let (mut band, clock) = boot(imu, piezo);

        band.tick();
        assert_eq!(band.sink().lines, vec!["EVENT:FALL"]);

        // Identical input 200 ms later (scripts hold): debounced.
        clock.advance(200);
        band.tick();
        assert_eq!(band.sink().lines.len(), 1);

        // Past the 1000 ms window the guard releases.
        clock.advance(900);
        band.tick();
        assert_eq!(band.sink().lines, vec!["EVENT:FALL", "EVENT:FALL"]);
    }

    #[test]
    fn gesture_in_the_same_tick_preempts_the_fall_pattern() {
        let mut imu = still_imu();
        let mut piezo = ScriptedPiezo::new();
        // Impact and a hard positive twist in one evaluation.
        imu.push([22_000, 10_000, 0, 0, 30_000, 0]);
        piezo.push(3000);

        let (mut band, _clock) = boot(imu, piezo);
        band.tick();

        // Fall is evaluated first, gesture second — and the most recent
        // trigger owns the motor.
        assert_eq!(band.sink().lines, vec!["EVENT:FALL", "GESTURE:YES"]);
        assert_eq!(band.haptic().pattern(), HapticPattern::Yes);
    }

    #[test]
    fn no_second_gesture_inside_the_cooldown_window() {
        let mut imu = still_imu();
        imu.push([0, 0, 0, 0, 30_000, 0]); // YES
        imu.push([0, 0, 0, 0, -30_000, 0]); // qualifying NO 100 ms later
        imu.push([0, 0, 0, 0, 0, 0]); // deadzone pass once cooldown is over
        imu.push([0, 0, 0, 0, -30_000, 0]); // NO again, now accepted

        let (mut band, clock) = boot(imu, ScriptedPiezo::new());

        band.tick();
        clock.advance(100);
        band.tick(); // blocked by the 600 ms cooldown
        assert_eq!(band.sink().lines, vec!["GESTURE:YES"]);

        clock.advance(600); // 700 ms since the gesture
        band.tick(); // deadzone sample re-arms the detector
        clock.advance(5);
        band.tick();
        assert_eq!(band.sink().lines, vec!["GESTURE:YES", "GESTURE:NO"]);
    }

    #[test]
    fn recalibrate_replaces_the_baseline() {
        let mut imu = ScriptedImu::new();
        imu.push_n([0, 0, 0, 0, 5, 0], 200);
        // Second burst sees a different bias.
        imu.push_n([0, 0, 0, 7, -3, 0], 200);

        let (mut band, _clock) = boot(imu, ScriptedPiezo::new());
        assert_eq!(band.baseline().gy, 5);

        band.recalibrate().unwrap();
        assert_eq!(band.baseline().gx, 7);
        assert_eq!(band.baseline().gy, -3);
    }
}
