use crate::controls::OrbitControls;
use crate::params::OrbitalParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
}

impl PlayState {
    pub fn as_css(self) -> &'static str {
        match self {
            PlayState::Running => "running",
            PlayState::Paused => "paused",
        }
    }
}

/// Seconds per revolution at the current global speed. Independent of
/// whether the animation is playing.
pub fn display_duration_s(params: &OrbitalParameters, speed: f64) -> f64 {
    params.base_duration_s() / speed
}

/// Declarative motion for one body. The renderer's clock owns the phase;
/// flipping `play_state` freezes it in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitStyle {
    pub duration_s: f64,
    pub play_state: PlayState,
    pub start_angle_deg: f64,
    pub orbit_radius_px: f64,
}

impl OrbitStyle {
    pub fn new(params: &OrbitalParameters, controls: &OrbitControls) -> Self {
        Self {
            duration_s: display_duration_s(params, controls.speed()),
            play_state: if controls.is_orbiting() {
                PlayState::Running
            } else {
                PlayState::Paused
            },
            start_angle_deg: params.start_angle_deg,
            orbit_radius_px: params.orbit_radius_px(),
        }
    }

    pub fn declarations(&self) -> [(&'static str, String); 4] {
        [
            ("animation-play-state", self.play_state.as_css().to_string()),
            ("animation-duration", format!("{}s", self.duration_s)),
            ("--start-angle", format!("{}deg", self.start_angle_deg)),
            ("--orbit-radius", format!("{}px", self.orbit_radius_px)),
        ]
    }

    /// Inline `style` attribute text.
    pub fn to_css(&self) -> String {
        self.declarations()
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
