/// Seconds one orbit takes at `speed_multiplier == 1` and global speed 1.
pub const BASE_PERIOD_S: f64 = 10.0;
/// Pixels per unit of `radius_multiplier`.
pub const ORBIT_UNIT_PX: f64 = 120.0;

pub const DEFAULT_COLOR: &str = "linear-gradient(135deg, #667eea, #764ba2)";
pub const UNKNOWN_PERIOD: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParameters {
    pub radius_multiplier: f64,
    pub speed_multiplier: f64,
    pub start_angle_deg: f64,
}

impl OrbitalParameters {
    /// Used for names outside the table. Every such body shares one orbit.
    pub const DEFAULT: OrbitalParameters = OrbitalParameters {
        radius_multiplier: 1.0,
        speed_multiplier: 1.0,
        start_angle_deg: 0.0,
    };

    pub fn base_duration_s(&self) -> f64 {
        BASE_PERIOD_S / self.speed_multiplier
    }

    pub fn orbit_radius_px(&self) -> f64 {
        self.radius_multiplier * ORBIT_UNIT_PX
    }
}

impl Default for OrbitalParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Static presentation data for one of the eight known planets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownBody {
    pub key: &'static str,
    pub params: OrbitalParameters,
    pub color: &'static str,
    pub period: &'static str,
}

const fn known(
    key: &'static str,
    radius_multiplier: f64,
    speed_multiplier: f64,
    start_angle_deg: f64,
    color: &'static str,
    period: &'static str,
) -> KnownBody {
    KnownBody {
        key,
        params: OrbitalParameters {
            radius_multiplier,
            speed_multiplier,
            start_angle_deg,
        },
        color,
        period,
    }
}

/// Ordered: the first key contained in a name wins.
pub const KNOWN_BODIES: [KnownBody; 8] = [
    known("mercury", 1.0, 4.15, 0.0, "linear-gradient(135deg, #888, #aaa)", "88 Earth days"),
    known("venus", 1.5, 1.62, 45.0, "linear-gradient(135deg, #ff9966, #ff5e62)", "225 Earth days"),
    known("earth", 2.0, 1.0, 90.0, "linear-gradient(135deg, #1e90ff, #00bfff)", "365.25 days (1 year)"),
    known("mars", 2.5, 0.53, 135.0, "linear-gradient(135deg, #ff4500, #ff6347)", "687 Earth days (1.88 years)"),
    known("jupiter", 3.5, 0.084, 180.0, "linear-gradient(135deg, #ffa500, #ff8c00)", "11.86 Earth years"),
    known("saturn", 4.5, 0.034, 225.0, "linear-gradient(135deg, #f0e68c, #daa520)", "29.46 Earth years"),
    known("uranus", 5.5, 0.012, 270.0, "linear-gradient(135deg, #40e0d0, #afeeee)", "84.01 Earth years"),
    known("neptune", 6.5, 0.0061, 315.0, "linear-gradient(135deg, #4169e1, #1e90ff)", "164.8 Earth years"),
];

pub fn lookup(name: &str) -> Option<&'static KnownBody> {
    let name = name.to_lowercase();
    KNOWN_BODIES.iter().find(|k| name.contains(k.key))
}

pub fn resolve(name: &str) -> OrbitalParameters {
    lookup(name).map(|k| k.params).unwrap_or_default()
}

/// CSS class for the body, empty when unknown.
pub fn body_class(name: &str) -> &'static str {
    lookup(name).map(|k| k.key).unwrap_or("")
}

pub fn body_color(name: &str) -> &'static str {
    lookup(name).map(|k| k.color).unwrap_or(DEFAULT_COLOR)
}

pub fn orbital_period(name: &str) -> &'static str {
    lookup(name).map(|k| k.period).unwrap_or(UNKNOWN_PERIOD)
}
