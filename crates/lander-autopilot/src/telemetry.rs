use serde::{Deserialize, Serialize};

/// Lifecycle of a lander as reported by the simulation.
///
/// Serialized as the numeric code used on the wire.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum LanderStatus {
    #[default]
    Spawned,
    Alive,
    Landed,
    Dead,
}

impl TryFrom<u8> for LanderStatus {
    type Error = TelemetryError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Spawned),
            1 => Ok(Self::Alive),
            2 => Ok(Self::Landed),
            3 => Ok(Self::Dead),
            _ => Err(TelemetryError::UnknownStatus { code }),
        }
    }
}

impl From<LanderStatus> for u8 {
    fn from(status: LanderStatus) -> Self {
        match status {
            LanderStatus::Spawned => 0,
            LanderStatus::Alive => 1,
            LanderStatus::Landed => 2,
            LanderStatus::Dead => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TelemetryError {
    #[display("telemetry field `{field}` is not a finite number")]
    NonFinite { field: &'static str },
    #[display("unknown lander status code {code}")]
    UnknownStatus { code: u8 },
}

/// One ship's state for one tick, in the simulation's raw units.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    pub vx: f64,
    pub vy: f64,
    pub angle: f64,
    pub altitude: f64,
    #[serde(default)]
    pub used_fuel: f64,
    pub status: LanderStatus,
}

impl Telemetry {
    /// Rejects NaN and infinite values before they reach the networks.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        let fields = [
            ("vx", self.vx),
            ("vy", self.vy),
            ("angle", self.angle),
            ("altitude", self.altitude),
            ("usedFuel", self.used_fuel),
        ];
        match fields.into_iter().find(|(_, v)| !v.is_finite()) {
            Some((field, _)) => Err(TelemetryError::NonFinite { field }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
    #[default]
    None,
}

/// Command sent back to the simulation for one ship.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanderAction {
    pub thrust: bool,
    pub rotate: Rotation,
}
