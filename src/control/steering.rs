//! Proportional steering and range control for a differential drive.

use serde::{Deserialize, Serialize};

/// How forward speed depends on the target's apparent size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedProfile {
    /// Interpolate from `base` (target far) to `max` (target at the size cutoff).
    ///
    /// `base` is normally the larger of the two, so the robot slows down as it
    /// closes in.
    Proportional { base: f64, max: f64 },
    /// Same speed regardless of distance.
    Constant { speed: f64 },
}

impl Default for SpeedProfile {
    fn default() -> Self {
        SpeedProfile::Proportional {
            base: 0.8,
            max: 0.3,
        }
    }
}

/// Steering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    pub profile: SpeedProfile,
}

/// Normalized wheel speeds for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringCommand {
    pub left: f64,
    pub right: f64,
}

/// Linear interpolation from `a` to `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Stateless mapping from target position and size to wheel speeds.
///
/// `t = (w / W) * 3` is deliberately left unclamped: a tracked target that
/// grows past the size cutoff produces `t > 1` and a speed beyond `max`.
#[derive(Debug, Clone, Copy)]
pub struct SteeringController {
    profile: SpeedProfile,
    frame_width: f64,
}

impl SteeringController {
    pub fn new(config: SteeringConfig, frame_width: f64) -> Self {
        Self {
            profile: config.profile,
            frame_width,
        }
    }

    pub fn profile(&self) -> SpeedProfile {
        self.profile
    }

    /// Interpolation parameter for a target of width `w`.
    #[inline]
    pub fn interpolation(&self, w: f64) -> f64 {
        let relative_width = w / self.frame_width;
        relative_width * 3.0
    }

    /// Forward speed for a target of width `w`.
    pub fn speed(&self, w: f64) -> f64 {
        match self.profile {
            SpeedProfile::Proportional { base, max } => lerp(base, max, self.interpolation(w)),
            SpeedProfile::Constant { speed } => speed,
        }
    }

    /// Wheel speeds steering toward horizontal position `x` for a target of width `w`.
    pub fn steer(&self, x: f64, w: f64) -> SteeringCommand {
        let speed = self.speed(w);
        let ratio = x / self.frame_width;
        SteeringCommand {
            left: ratio * speed,
            right: (1.0 - ratio) * speed,
        }
    }
}
