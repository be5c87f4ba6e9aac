use crate::controls::OrbitControls;
use crate::params::OrbitalParameters;

/// Animation timeline for hosts without a CSS clock.
///
/// Only speed-scaled time is stored. Pausing stops accumulation and speed
/// changes only affect future ticks, so the phase never jumps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitClock {
    scaled_s: f64,
}

impl OrbitClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt_s: f64, controls: &OrbitControls) {
        if controls.is_orbiting() && dt_s > 0.0 {
            self.scaled_s += dt_s * controls.speed();
        }
    }

    pub fn scaled_seconds(&self) -> f64 {
        self.scaled_s
    }

    /// Current angle in degrees, normalized to `[0, 360)`.
    pub fn angle_deg(&self, params: &OrbitalParameters) -> f64 {
        let turns = self.scaled_s / params.base_duration_s();
        (params.start_angle_deg + 360.0 * turns).rem_euclid(360.0)
    }

    /// Offset from the center in screen pixels (y grows downward).
    pub fn position_px(&self, params: &OrbitalParameters) -> (f64, f64) {
        let theta = self.angle_deg(params).to_radians();
        let r = params.orbit_radius_px();
        (r * theta.cos(), r * theta.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::resolve;
    use approx::assert_relative_eq;

    #[test]
    fn starts_at_start_angle() {
        let clock = OrbitClock::new();
        assert_relative_eq!(clock.angle_deg(&resolve("venus")), 45.0);
        let (x, y) = clock.position_px(&resolve("earth"));
        assert_relative_eq!(x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(y, 240.0, epsilon = 1e-9);
    }

    #[test]
    fn pause_freezes_phase() {
        let earth = resolve("earth");
        let mut controls = OrbitControls::new();
        let mut clock = OrbitClock::new();
        clock.advance(2.5, &controls);
        let before = clock.angle_deg(&earth);
        assert_relative_eq!(before, 90.0 + 90.0);

        controls.pause();
        clock.advance(100.0, &controls);
        assert_relative_eq!(clock.angle_deg(&earth), before);

        controls.resume();
        clock.advance(2.5, &controls);
        assert_relative_eq!(clock.angle_deg(&earth), 270.0);
    }

    #[test]
    fn speed_change_does_not_jump() {
        let earth = resolve("earth");
        let mut controls = OrbitControls::new();
        let mut clock = OrbitClock::new();
        clock.advance(1.0, &controls);
        let before = clock.angle_deg(&earth);
        controls.faster();
        assert_relative_eq!(clock.angle_deg(&earth), before);
        clock.advance(1.0, &controls);
        assert_relative_eq!(clock.angle_deg(&earth), before + 36.0 * 1.5);
    }

    #[test]
    fn step_size_does_not_change_phase() {
        let mars = resolve("mars");
        let mut controls = OrbitControls::new();
        controls.set_speed(2.0);
        let mut coarse = OrbitClock::new();
        let mut fine = OrbitClock::new();
        for _ in 0..10 {
            coarse.advance(0.5, &controls);
        }
        for _ in 0..20 {
            fine.advance(0.25, &controls);
        }
        assert_relative_eq!(coarse.scaled_seconds(), 10.0);
        assert_relative_eq!(coarse.angle_deg(&mars), fine.angle_deg(&mars), epsilon = 1e-9);
    }
}
