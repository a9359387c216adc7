// Glytch Band — Host Demo
//
// Replays a scripted wear session through the full pipeline: gyro
// calibration, a YES twist, a NO twist, and a fall impact. Event lines land
// on stdout exactly as they would on the wireless serial link; everything
// else goes through the logger (RUST_LOG=debug shows motor edges and
// telemetry).
//
// On-device, main() would instead wire the real I2C IMU, the piezo ADC, the
// motor GPIO, and the BT serial transport into `Band::init` — and park
// forever if init reports the fatal sensor fault.

use glytch_band::config::BandConfig;
use glytch_band::drivers::host::{LogActuator, ManualClock, ScriptedImu, ScriptedPiezo, SerialSink};
use glytch_band::Band;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Glytch band — YES/NO wrist twist + FALL detection (host demo)");

    let config = BandConfig::default();
    let pace_ms = config.loop_pace_ms;
    let cooldown_ticks = (config.gesture.cooldown_ms / pace_ms) as usize;

    // ---- Script the session -------------------------------------------
    // The calibration burst consumes the first 200 readings; the band must
    // be still for those. After that the IMU holds its last reading, so
    // each pushed sample marks one tick of interest.
    let mut imu = ScriptedImu::new();
    let mut piezo = ScriptedPiezo::new();

    imu.push_n([0, 0, 0, 0, 0, 0], 200); // held still for calibration

    // Tick 1: hard positive twist (~229 °/s) → GESTURE:YES.
    imu.push([0, 0, 0, 0, 30_000, 0]);
    imu.push([0, 0, 0, 0, 0, 0]);

    // Wait out the cooldown at rest, then twist the other way → GESTURE:NO.
    imu.push_n([0, 0, 0, 0, 0, 0], cooldown_ticks);
    imu.push([0, 0, 0, 0, -30_000, 0]);
    imu.push([0, 0, 0, 0, 0, 0]);

    // Line the piezo script up with a hard-impact sample → EVENT:FALL.
    let fall_tick = 2 + cooldown_ticks + 2;
    imu.push_n([0, 0, 0, 0, 0, 0], cooldown_ticks);
    imu.push([22_000, 10_000, 0, 0, 0, 0]);
    piezo.push_quiet(fall_tick + cooldown_ticks);
    piezo.push(3000);
    piezo.push(0);

    // ---- Boot ----------------------------------------------------------
    let clock = ManualClock::new();
    let mut band = match Band::init(
        config,
        clock.clone(),
        imu,
        piezo,
        LogActuator::new(),
        SerialSink,
    ) {
        Ok(band) => band,
        Err(e) => {
            // Fatal: no baseline, nothing may run. On-device this parks in
            // an idle loop; the demo just reports it.
            log::error!("startup failed: {e}");
            return Err(e.into());
        }
    };
    log::info!("Calibration done — baseline {:?}", band.baseline());

    // ---- Steady state ----------------------------------------------------
    // Enough ticks to play the script out plus the trailing fall buzz.
    let total_ticks = fall_tick + 2 * cooldown_ticks + 100;
    for _ in 0..total_ticks {
        band.tick();
        clock.advance(pace_ms);
    }

    log::info!("Demo session complete");
    Ok(())
}
