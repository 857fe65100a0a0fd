use crate::{AutopilotError, LanderAction, Rotation};

/// Length of the network output vector.
pub const OUTPUT_SIZE: usize = 3;

/// An output activates when strictly above this value.
pub const ACTIVATION_THRESHOLD: f64 = 0.5;

/// Network outputs thresholded into the three control flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedOutput {
    pub rotation_enabled: bool,
    pub clockwise: bool,
    pub thrust_enabled: bool,
}

impl DecodedOutput {
    pub fn decode(raw: &[f64]) -> Result<Self, AutopilotError> {
        let &[rotation, sign, thrust] = raw else {
            return Err(AutopilotError::OutputSizeMismatch { actual: raw.len() });
        };
        Ok(Self {
            rotation_enabled: rotation > ACTIVATION_THRESHOLD,
            clockwise: sign > ACTIVATION_THRESHOLD,
            thrust_enabled: thrust > ACTIVATION_THRESHOLD,
        })
    }

    #[must_use]
    pub fn into_action(self) -> LanderAction {
        let rotate = match (self.rotation_enabled, self.clockwise) {
            (false, _) => Rotation::None,
            (true, true) => Rotation::Clockwise,
            (true, false) => Rotation::CounterClockwise,
        };
        LanderAction {
            thrust: self.thrust_enabled,
            rotate,
        }
    }
}
