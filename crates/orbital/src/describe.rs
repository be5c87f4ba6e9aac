use catalog::CelestialBody;
use foundation::{format_exponential, format_grouped};

use crate::params::{body_color, orbital_period, resolve};

const NA: &str = "N/A";

fn grouped_or_na(value: Option<f64>) -> String {
    value.map(format_grouped).unwrap_or_else(|| NA.to_string())
}

/// Mass and orbital speed treat zero as unknown.
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

pub fn distance_label(body: &CelestialBody) -> String {
    format!("{} km", grouped_or_na(body.distance_from_sun))
}

/// One line of the "Orbital Data Comparison" table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub name: String,
    pub color: &'static str,
    pub period: &'static str,
    pub relative_speed: String,
    pub distance: String,
    pub orbit_radius: String,
}

pub const COMPARISON_HEADERS: [&str; 5] = [
    "Planet",
    "Orbital Period",
    "Relative Speed",
    "Distance from Sun",
    "Orbit Radius",
];

impl ComparisonRow {
    pub fn new(body: &CelestialBody) -> Self {
        let params = resolve(&body.name);
        Self {
            name: body.name.clone(),
            color: body_color(&body.name),
            period: orbital_period(&body.name),
            relative_speed: format!("{:.3}x Earth", params.speed_multiplier),
            distance: distance_label(body),
            orbit_radius: format!("{:.1} AU", params.radius_multiplier),
        }
    }

    pub fn cells(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.period,
            &self.relative_speed,
            &self.distance,
            &self.orbit_radius,
        ]
    }
}

pub fn comparison_rows(planets: &[CelestialBody]) -> Vec<ComparisonRow> {
    planets.iter().map(ComparisonRow::new).collect()
}

/// Hover text for an orbiting body.
pub fn tooltip(body: &CelestialBody) -> String {
    format!(
        "{}\nOrbital Period: {}\nDistance: {}\nClick for details",
        body.name,
        orbital_period(&body.name),
        distance_label(body),
    )
}

/// Text shown when an orbiting body is clicked.
pub fn details(body: &CelestialBody) -> String {
    let mass = nonzero(body.mass_kg)
        .map(|m| format_exponential(m, 2))
        .unwrap_or_else(|| NA.to_string());
    let orbital_speed = nonzero(body.orbital_speed_km_s)
        .map(|v| v.to_string())
        .unwrap_or_else(|| NA.to_string());
    format!(
        "🌌 {name}\n\n{description}\n\n\
         📏 Distance from Sun: {distance}\n\
         🔴 Radius: {radius} km\n\
         ⚖️ Mass: {mass} kg\n\
         🚀 Orbital Speed: {orbital_speed} km/s\n\
         ⏱️ Orbital Period: {period}\n\
         👤 Added by: {author}",
        name = body.name.to_uppercase(),
        description = body.description.as_deref().unwrap_or(""),
        distance = distance_label(body),
        radius = grouped_or_na(body.radius),
        period = orbital_period(&body.name),
        author = body.created_by.as_deref().unwrap_or("Unknown"),
    )
}

pub fn sun_tooltip(sun: &CelestialBody) -> String {
    format!("{}\n{}", sun.name, sun.description.as_deref().unwrap_or(""))
}

pub fn sun_details(sun: &CelestialBody) -> String {
    format!("{}\n\n{}", sun.name, sun.description.as_deref().unwrap_or(""))
}
