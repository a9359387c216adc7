// Glytch Band — Host-Side Drivers & Test Doubles
//
// Implementations of the driver traits that run off-device: a wall-clock
// `SystemClock` and stdout `SerialSink` for the demo binary, plus scripted
// doubles that replay canned sensor readings for deterministic tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use crate::drivers::{Actuator, Clock, EventSink, ImpactSource, MotionSource};
use crate::events::{ImpactSample, MotionSample};

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

/// Milliseconds since construction, truncated to u32 (wraps at ~49 days —
/// fine, all consumers difference through `wrapping_sub`).
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    fn delay_ms(&self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}

/// Hand-cranked clock for scripted runs. Cloning shares the underlying
/// counter, so a test can keep a handle while the band owns the other.
/// `delay_ms` advances the counter, which makes the calibration burst consume
/// simulated rather than real time.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    fn delay_ms(&self, ms: u32) {
        self.advance(ms);
    }
}

// ---------------------------------------------------------------------------
// Scripted sensors
// ---------------------------------------------------------------------------

/// IMU double that replays pushed readings in order, then holds the last
/// scripted value (a real sensor keeps returning data whether or not
/// anything moved).
pub struct ScriptedImu {
    connected: bool,
    script: VecDeque<[i16; 6]>,
    hold: [i16; 6],
}

impl ScriptedImu {
    /// Connected, at rest: every read yields zeros until something is pushed.
    pub fn new() -> Self {
        Self {
            connected: true,
            script: VecDeque::new(),
            hold: [0; 6],
        }
    }

    /// A sensor that never answers the bus probe — calibration must refuse
    /// to run against this.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::new()
        }
    }

    /// Queue one `[ax, ay, az, gx, gy, gz]` reading.
    pub fn push(&mut self, reading: [i16; 6]) {
        self.script.push_back(reading);
    }

    /// Queue `n` copies of the same reading (e.g. a calibration burst).
    pub fn push_n(&mut self, reading: [i16; 6], n: usize) {
        for _ in 0..n {
            self.script.push_back(reading);
        }
    }
}

impl Default for ScriptedImu {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSource for ScriptedImu {
    fn is_connected(&mut self) -> bool {
        self.connected
    }

    fn read_sample(&mut self, now_ms: u32) -> MotionSample {
        if let Some(next) = self.script.pop_front() {
            self.hold = next;
        }
        let [ax, ay, az, gx, gy, gz] = self.hold;
        MotionSample {
            ax,
            ay,
            az,
            gx,
            gy,
            gz,
            timestamp_ms: now_ms,
        }
    }
}

/// Piezo double with the same replay-then-hold behavior as [`ScriptedImu`].
pub struct ScriptedPiezo {
    script: VecDeque<i32>,
    hold: i32,
}

impl ScriptedPiezo {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            hold: 0,
        }
    }

    pub fn push(&mut self, magnitude: i32) {
        self.script.push_back(magnitude);
    }

    /// Queue `n` quiet (zero) readings, to line the script up with a
    /// particular tick.
    pub fn push_quiet(&mut self, n: usize) {
        for _ in 0..n {
            self.script.push_back(0);
        }
    }
}

impl Default for ScriptedPiezo {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpactSource for ScriptedPiezo {
    fn read_impact(&mut self, now_ms: u32) -> ImpactSample {
        if let Some(next) = self.script.pop_front() {
            self.hold = next;
        }
        ImpactSample {
            magnitude: self.hold,
            timestamp_ms: now_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator / sink doubles
// ---------------------------------------------------------------------------

/// Remembers the last commanded motor level so tests can assert the haptic
/// timeline tick by tick.
#[derive(Default)]
pub struct RecordingActuator {
    on: bool,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Actuator for RecordingActuator {
    fn set_active(&mut self, on: bool) {
        self.on = on;
    }
}

/// Motor stand-in for the demo binary: logs edge transitions.
#[derive(Default)]
pub struct LogActuator {
    on: bool,
}

impl LogActuator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Actuator for LogActuator {
    fn set_active(&mut self, on: bool) {
        if on != self.on {
            self.on = on;
            log::debug!("motor {}", if on { "ON" } else { "off" });
        }
    }
}

/// Captures every line sent to the transport.
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn send_line(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}

/// Stdout transport for the demo binary — one line per event, exactly as the
/// wireless link would carry it.
pub struct SerialSink;

impl EventSink for SerialSink {
    fn send_line(&mut self, line: &str) {
        println!("{line}");
    }
}
