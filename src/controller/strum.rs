//! Strum detection from a 3-axis accelerometer.
//!
//! The controller is swung along its Y axis. A sharp positive spike is a
//! down strum, a sharp negative spike an up strum.
//!
//! ```text
//!  ay
//!  +14000 ─ ─ ─ ─ ─ ─╱╲─ ─ ─ ─ ─ ─ ─ ─ ─   fire StrumDown
//!   +4000 ─ ─ ─ ─ ─ ╱─ ─╲─ ─ ─ ─ ─ ─ ─ ─   (re-arm band)
//!       0 ─────────╱──────╲──────────────
//!   -4000
//!            Armed │ Cooldown │ Fired, waiting for |ay| < 4000 │ Armed
//! ```

use crate::io::command::{Gesture, MAX_VELOCITY};

/// Raw accelerometer reading (sensor LSBs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accel {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// Anything that can be polled for an acceleration sample.
pub trait MotionSource {
    /// Next reading, or `None` if the sensor had nothing (or failed).
    fn read_accel(&mut self) -> Option<Accel>;
}

impl<I: Iterator<Item = Accel>> MotionSource for I {
    fn read_accel(&mut self) -> Option<Accel> {
        self.next()
    }
}

/// A detected swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    /// `StrumDown` or `StrumUp`
    pub gesture: Gesture,
    pub velocity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectorState {
    Armed,
    Fired,
}

#[derive(Debug, Clone)]
pub struct StrumDetector {
    threshold: i16,
    rearm: i16,
    cooldown_polls: u8,
    cooldown: u8,
    state: DetectorState,
}

impl StrumDetector {
    pub const THRESHOLD: i16 = 14_000;
    pub const REARM: i16 = 4_000;
    pub const COOLDOWN_POLLS: u8 = 20;

    pub fn new(threshold: i16, rearm: i16, cooldown_polls: u8) -> Self {
        Self {
            threshold,
            rearm,
            cooldown_polls,
            cooldown: 0,
            state: DetectorState::Armed,
        }
    }

    /// Feed one poll's reading.
    pub fn update(&mut self, accel: Accel) -> Option<Strike> {
        let ay = accel.y;

        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }

        match self.state {
            DetectorState::Armed => {
                let gesture = if ay > self.threshold {
                    Gesture::StrumDown
                } else if ay < -self.threshold {
                    Gesture::StrumUp
                } else {
                    return None;
                };
                self.state = DetectorState::Fired;
                self.cooldown = self.cooldown_polls;
                Some(Strike {
                    gesture,
                    velocity: self.velocity(ay),
                })
            }
            DetectorState::Fired => {
                if ay > -self.rearm && ay < self.rearm {
                    self.state = DetectorState::Armed;
                }
                None
            }
        }
    }

    /// Poll `source` once. Missing readings are treated as no motion.
    pub fn poll(&mut self, source: &mut impl MotionSource) -> Option<Strike> {
        let accel = source.read_accel()?;
        self.update(accel)
    }

    /// |ay| from threshold..=i16::MAX mapped linearly onto 0..=127.
    pub fn velocity(&self, ay: i16) -> u8 {
        let magnitude = (ay as i32).abs().min(i16::MAX as i32);
        let span = (i16::MAX as i32 - self.threshold as i32).max(1);
        let over = (magnitude - self.threshold as i32).max(0);
        (over * MAX_VELOCITY as i32 / span).min(MAX_VELOCITY as i32) as u8
    }

    pub fn is_armed(&self) -> bool {
        self.state == DetectorState::Armed && self.cooldown == 0
    }
}

impl Default for StrumDetector {
    fn default() -> Self {
        Self::new(Self::THRESHOLD, Self::REARM, Self::COOLDOWN_POLLS)
    }
}
