pub const DEFAULT_SPEED: f64 = 1.0;
pub const SPEED_STEP: f64 = 0.5;
pub const MIN_SPEED: f64 = 0.1;

/// Global animation controls shared by every orbiting body.
///
/// `speed` never drops below [`MIN_SPEED`], so durations stay finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    speed: f64,
    orbiting: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            orbiting: true,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    /// Non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() {
            self.speed = speed.max(MIN_SPEED);
        }
    }

    pub fn faster(&mut self) {
        self.set_speed(self.speed + SPEED_STEP);
    }

    pub fn slower(&mut self) {
        self.set_speed(self.speed - SPEED_STEP);
    }

    pub fn reset_speed(&mut self) {
        self.speed = DEFAULT_SPEED;
    }

    pub fn toggle_orbiting(&mut self) {
        self.orbiting = !self.orbiting;
    }

    pub fn pause(&mut self) {
        self.orbiting = false;
    }

    pub fn resume(&mut self) {
        self.orbiting = true;
    }

    pub fn speed_label(&self) -> String {
        format!("{:.1}x", self.speed)
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.orbiting {
            "⏸ Pause Orbits"
        } else {
            "▶ Resume Orbits"
        }
    }
}
