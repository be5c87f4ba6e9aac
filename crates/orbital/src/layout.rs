use std::cmp::Ordering;

use catalog::CelestialBody;

use crate::controls::OrbitControls;
use crate::params::{OrbitalParameters, body_class, body_color, resolve};
use crate::style::OrbitStyle;

/// Guide rings are decorative and independent of the body count.
pub const GUIDE_RING_COUNT: usize = 8;

/// Fetched catalog split into the fixed center and the bodies that orbit it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolarSystem {
    pub sun: Option<CelestialBody>,
    pub planets: Vec<CelestialBody>,
}

impl SolarSystem {
    /// The first body named "sun" (any case) becomes the center; every body
    /// with that name is kept off the rings. The rest are ordered by
    /// distance, unknown distances first, ties in fetch order.
    pub fn partition(bodies: Vec<CelestialBody>) -> Self {
        let mut sun = None;
        let mut planets = Vec::with_capacity(bodies.len());
        for body in bodies {
            if body.is_sun() {
                if sun.is_none() {
                    sun = Some(body);
                }
            } else {
                planets.push(body);
            }
        }
        planets.sort_by(compare_distance);
        Self { sun, planets }
    }
}

fn compare_distance(a: &CelestialBody, b: &CelestialBody) -> Ordering {
    match (a.distance_from_sun, b.distance_from_sun) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideRing {
    /// 1-based.
    pub index: usize,
}

impl GuideRing {
    pub fn class_name(&self) -> String {
        format!("orbit orbit-{}", self.index)
    }

    pub fn title(&self) -> String {
        format!("Orbit {}", self.index)
    }
}

pub fn guide_rings() -> [GuideRing; GUIDE_RING_COUNT] {
    std::array::from_fn(|i| GuideRing { index: i + 1 })
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBody<'a> {
    pub body: &'a CelestialBody,
    pub params: OrbitalParameters,
    pub style: OrbitStyle,
    orbiting: bool,
}

impl OrbitingBody<'_> {
    pub fn class_name(&self) -> String {
        let mut class = String::from("planet-orbital");
        let key = body_class(&self.body.name);
        if !key.is_empty() {
            class.push(' ');
            class.push_str(key);
        }
        if self.orbiting {
            class.push_str(" orbiting");
        }
        class
    }

    /// CSS background for the icon: the record's image, else the body color.
    pub fn icon_background(&self) -> String {
        match self.body.image_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => format!("url({url})"),
            None => body_color(&self.body.name).to_string(),
        }
    }
}

/// Everything the orbital scene renders for one set of controls.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitLayout<'a> {
    pub sun: Option<&'a CelestialBody>,
    pub bodies: Vec<OrbitingBody<'a>>,
    pub rings: [GuideRing; GUIDE_RING_COUNT],
}

impl<'a> OrbitLayout<'a> {
    pub fn new(system: &'a SolarSystem, controls: &OrbitControls) -> Self {
        let bodies = system
            .planets
            .iter()
            .map(|body| {
                let params = resolve(&body.name);
                OrbitingBody {
                    body,
                    params,
                    style: OrbitStyle::new(&params, controls),
                    orbiting: controls.is_orbiting(),
                }
            })
            .collect();
        Self {
            sun: system.sun.as_ref(),
            bodies,
            rings: guide_rings(),
        }
    }
}
