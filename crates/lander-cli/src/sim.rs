//! Headless stand-in for the game's lander simulation.
//!
//! Only detailed enough to give the autopilot something to fly from the terminal:
//! point-mass motion under lunar gravity, a single main engine and instant rotation.
//! Velocities are in m/s with `vy` positive upward, the angle is in degrees from
//! vertical with positive values clockwise.

use lander_autopilot::{LanderAction, LanderStatus, Rotation, Telemetry};
use rand::Rng;
use rand_distr::{Distribution as _, Normal, NormalError};

const GRAVITY: f64 = 1.62;
const MAIN_ENGINE: f64 = 4.0;
/// Degrees per second.
const ROTATION_SPEED: f64 = 45.0;
const SPAWN_ALTITUDE: f64 = 200.0;

const SAFE_VX: f64 = 5.0;
const SAFE_VY: f64 = 8.0;
const SAFE_ANGLE: f64 = 10.0;

/// Spawn conditions. Higher levels spawn with more drift and tilt.
#[derive(Debug, Clone, Copy)]
pub struct Spawner {
    altitude: Normal<f64>,
    vx: Normal<f64>,
    vy: Normal<f64>,
    angle: Normal<f64>,
}

impl Spawner {
    #[expect(clippy::cast_precision_loss)]
    pub fn for_level(level: usize) -> Result<Self, NormalError> {
        let level = level as f64;
        Ok(Self {
            altitude: Normal::new(SPAWN_ALTITUDE, 20.0)?,
            vx: Normal::new(0.0, 2.0 + level * 2.0)?,
            vy: Normal::new(0.0, 2.0 + level)?,
            angle: Normal::new(0.0, 5.0 + level * 5.0)?,
        })
    }

    pub fn spawn<R>(&self, rng: &mut R) -> Lander
    where
        R: Rng + ?Sized,
    {
        Lander {
            vx: self.vx.sample(rng),
            vy: self.vy.sample(rng),
            angle: self.angle.sample(rng),
            altitude: self.altitude.sample(rng).max(1.0),
            used_fuel: 0.0,
            status: LanderStatus::Alive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lander {
    vx: f64,
    vy: f64,
    angle: f64,
    altitude: f64,
    used_fuel: f64,
    status: LanderStatus,
}

impl Lander {
    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            vx: self.vx,
            vy: self.vy,
            angle: self.angle,
            altitude: self.altitude,
            used_fuel: self.used_fuel,
            status: self.status,
        }
    }

    /// Advances the lander by `dt` seconds. Landed and dead landers stay put.
    pub fn step(&mut self, action: LanderAction, dt: f64) {
        if !self.status.is_alive() {
            return;
        }

        match action.rotate {
            Rotation::Clockwise => self.angle += ROTATION_SPEED * dt,
            Rotation::CounterClockwise => self.angle -= ROTATION_SPEED * dt,
            Rotation::None => {}
        }
        self.angle = (self.angle + 180.0).rem_euclid(360.0) - 180.0;

        let (mut ax, mut ay) = (0.0, -GRAVITY);
        if action.thrust {
            let (sin, cos) = self.angle.to_radians().sin_cos();
            ax += MAIN_ENGINE * sin;
            ay += MAIN_ENGINE * cos;
            self.used_fuel += dt;
        }
        self.vx += ax * dt;
        self.vy += ay * dt;
        self.altitude += self.vy * dt;

        if self.altitude <= 0.0 {
            self.altitude = 0.0;
            let gentle = self.vx.abs() <= SAFE_VX
                && self.vy.abs() <= SAFE_VY
                && self.angle.abs() <= SAFE_ANGLE;
            self.status = if gentle {
                LanderStatus::Landed
            } else {
                LanderStatus::Dead
            };
        }
    }
}
