use crate::Telemetry;

/// Length of the network input vector.
pub const INPUT_SIZE: usize = 7;

/// Half-saturation points of the squashing map, in simulation units.
pub const VELOCITY_PIVOT: f64 = 40.0;
pub const ANGLE_PIVOT: f64 = 10.0;
pub const ALTITUDE_PIVOT: f64 = 20.0;

/// Squashes `value >= 0` into `[0, 1)`, reaching 0.5 at `value == pivot`.
///
/// ```
/// use lander_autopilot::normalize;
///
/// assert_eq!(normalize(0.0, 40.0), 0.0);
/// assert_eq!(normalize(40.0, 40.0), 0.5);
/// assert!(normalize(1e9, 40.0) < 1.0);
/// ```
#[must_use]
pub fn normalize(value: f64, pivot: f64) -> f64 {
    let ratio = value / pivot;
    ratio / (1.0 + ratio)
}

fn positive_flag(value: f64) -> f64 {
    if value > 0.0 { 1.0 } else { 0.0 }
}

/// Telemetry mapped onto the network's input layer.
///
/// Magnitudes are squashed with [`normalize`]; signs become 0/1 flags.
/// Altitude below the ground line reads as 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedInput {
    pub vx: f64,
    pub vx_positive: f64,
    pub vy: f64,
    pub vy_positive: f64,
    pub angle: f64,
    pub angle_positive: f64,
    pub altitude: f64,
}

impl NormalizedInput {
    #[must_use]
    pub fn from_telemetry(telemetry: &Telemetry) -> Self {
        Self {
            vx: normalize(telemetry.vx.abs(), VELOCITY_PIVOT),
            vx_positive: positive_flag(telemetry.vx),
            vy: normalize(telemetry.vy.abs(), VELOCITY_PIVOT),
            vy_positive: positive_flag(telemetry.vy),
            angle: normalize(telemetry.angle.abs(), ANGLE_PIVOT),
            angle_positive: positive_flag(telemetry.angle),
            altitude: normalize(telemetry.altitude.max(0.0), ALTITUDE_PIVOT),
        }
    }

    #[must_use]
    pub fn to_array(&self) -> [f64; INPUT_SIZE] {
        [
            self.vx,
            self.vx_positive,
            self.vy,
            self.vy_positive,
            self.angle,
            self.angle_positive,
            self.altitude,
        ]
    }
}
