// Glytch Band — Gyro Baseline Calibration
//
// Even at rest the gyro reports a small constant bias per axis. A burst of
// samples taken while the wrist is held still gives a per-axis mean that is
// subtracted from every reading afterwards. Runs once at startup (and again
// on explicit request); this is the only place in the system allowed to
// block on a delay.

use crate::config::CalibrationConfig;
use crate::drivers::{Clock, MotionSource};
use crate::events::{BandError, BaselineOffset};

pub struct Calibrator {
    config: CalibrationConfig,
}

impl Calibrator {
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Run the calibration burst: `samples` consecutive readings spaced
    /// `interval_ms` apart, averaged per gyro axis with truncating integer
    /// division.
    ///
    /// Checks the sensor connection first; a sensor that does not answer is
    /// fatal — no baseline exists and nothing downstream may run.
    pub fn calibrate<M, C>(&self, imu: &mut M, clock: &C) -> Result<BaselineOffset, BandError>
    where
        M: MotionSource,
        C: Clock,
    {
        if !imu.is_connected() {
            log::error!("IMU did not answer connection check — cannot calibrate");
            return Err(BandError::ImuUnavailable);
        }

        log::info!(
            "Calibrating gyro ({} samples) — keep wrist STILL",
            self.config.samples
        );

        let mut sum_gx: i64 = 0;
        let mut sum_gy: i64 = 0;
        let mut sum_gz: i64 = 0;

        for _ in 0..self.config.samples {
            let sample = imu.read_sample(clock.now_ms());
            sum_gx += sample.gx as i64;
            sum_gy += sample.gy as i64;
            sum_gz += sample.gz as i64;
            clock.delay_ms(self.config.interval_ms);
        }

        let n = self.config.samples.max(1) as i64;
        let baseline = BaselineOffset {
            gx: (sum_gx / n) as i16,
            gy: (sum_gy / n) as i16,
            gz: (sum_gz / n) as i16,
        };

        log::info!(
            "Gyro baseline: {}, {}, {}",
            baseline.gx,
            baseline.gy,
            baseline.gz
        );

        Ok(baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::host::{ManualClock, ScriptedImu};

    fn calibrate(imu: &mut ScriptedImu) -> Result<BaselineOffset, BandError> {
        let clock = ManualClock::new();
        Calibrator::new(CalibrationConfig::default()).calibrate(imu, &clock)
    }

    #[test]
    fn all_zero_burst_gives_zero_baseline() {
        let mut imu = ScriptedImu::new();
        let baseline = calibrate(&mut imu).unwrap();
        assert_eq!(baseline, BaselineOffset::default());
    }

    #[test]
    fn constant_rate_burst_gives_that_constant() {
        let mut imu = ScriptedImu::new();
        imu.push_n([0, 0, 0, -12, 5, 37], 200);
        let baseline = calibrate(&mut imu).unwrap();
        assert_eq!((baseline.gx, baseline.gy, baseline.gz), (-12, 5, 37));
    }

    #[test]
    fn mean_truncates_like_integer_division() {
        let mut imu = ScriptedImu::new();
        // 100 samples at 5 and 100 at 6 → sum 1100, mean 5.5 → truncates to 5.
        imu.push_n([0, 0, 0, 0, 5, 0], 100);
        imu.push_n([0, 0, 0, 0, 6, 0], 100);
        let baseline = calibrate(&mut imu).unwrap();
        assert_eq!(baseline.gy, 5);
    }

    #[test]
    fn disconnected_sensor_is_fatal() {
        let mut imu = ScriptedImu::disconnected();
        assert!(matches!(
            calibrate(&mut imu),
            Err(BandError::ImuUnavailable)
        ));
    }

    #[test]
    fn burst_consumes_samples_at_the_configured_interval() {
        let mut imu = ScriptedImu::new();
        let clock = ManualClock::new();
        let config = CalibrationConfig {
            samples: 10,
            interval_ms: 5,
        };
        Calibrator::new(config).calibrate(&mut imu, &clock).unwrap();
        assert_eq!(clock.now_ms(), 50);
    }
}
