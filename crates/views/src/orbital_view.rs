use catalog::{ApiError, BodyId, CatalogApi, CelestialBody};
use orbital::{
    ComparisonRow, OrbitClock, OrbitControls, OrbitLayout, SolarSystem, comparison_rows, details,
    sun_details,
};
use runtime::{FrameClock, Mount, Ticket};
use tracing::error;

pub const ORBITAL_LOADING_TEXT: &str = "Loading Solar System...";

/// Animated orbital scene.
///
/// A failed fetch is logged and the view keeps showing its loading state;
/// there is no retry here.
#[derive(Debug, Default)]
pub struct OrbitalView {
    mount: Mount,
    system: Option<SolarSystem>,
    controls: OrbitControls,
    clock: OrbitClock,
    frames: FrameClock,
}

impl OrbitalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) -> Ticket {
        self.system = None;
        self.controls = OrbitControls::new();
        self.clock = OrbitClock::new();
        self.frames.reset();
        self.mount.mount()
    }

    pub fn unmount(&mut self) {
        self.mount.unmount();
    }

    pub fn apply_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<CelestialBody>, ApiError>,
    ) -> bool {
        if !self.mount.accepts(ticket) {
            return false;
        }
        match result {
            Ok(bodies) => self.system = Some(SolarSystem::partition(bodies)),
            Err(err) => error!("Error fetching celestial bodies: {err}"),
        }
        true
    }

    pub async fn load<A: CatalogApi>(&mut self, api: &A) {
        let ticket = self.mount.issue();
        let result = api.list_planets().await;
        self.apply_load(ticket, result);
    }

    pub fn is_loading(&self) -> bool {
        self.system.is_none()
    }

    pub fn layout(&self) -> Option<OrbitLayout<'_>> {
        self.system.as_ref().map(|s| OrbitLayout::new(s, &self.controls))
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Speed and pause changes are local; they never touch the network.
    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn clock(&self) -> &OrbitClock {
        &self.clock
    }

    /// Advance the scene clock to the host's timestamp in milliseconds.
    pub fn tick(&mut self, now_ms: f64) {
        let frame = self.frames.tick(now_ms);
        self.clock.advance(frame.dt_s, &self.controls);
    }

    pub fn comparison(&self) -> Vec<ComparisonRow> {
        self.system
            .as_ref()
            .map(|s| comparison_rows(&s.planets))
            .unwrap_or_default()
    }

    pub fn body_details(&self, id: &BodyId) -> Option<String> {
        let system = self.system.as_ref()?;
        system.planets.iter().find(|b| &b.id == id).map(details)
    }

    pub fn sun_details(&self) -> Option<String> {
        self.system.as_ref()?.sun.as_ref().map(sun_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use catalog::{ApiCall, InMemoryCatalog};
    use pollster::block_on;
    use pretty_assertions::assert_eq;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_bodies(vec![
            CelestialBody::named(1u64, "Mars").with_distance(227.9e6),
            CelestialBody::named(2u64, "Sun"),
            CelestialBody::named(3u64, "Earth").with_distance(149.6e6),
        ])
    }

    #[test]
    fn failure_stays_loading() {
        let api = catalog();
        api.set_offline(true);
        let mut view = OrbitalView::new();
        view.mount();
        block_on(view.load(&api));
        assert!(view.is_loading());
        assert!(view.layout().is_none());
    }

    #[test]
    fn loads_scene_without_the_sun_on_rings() {
        let api = catalog();
        let mut view = OrbitalView::new();
        view.mount();
        block_on(view.load(&api));
        let layout = view.layout().unwrap();
        assert_eq!(layout.sun.map(|s| s.name.as_str()), Some("Sun"));
        let names: Vec<_> = layout.bodies.iter().map(|b| b.body.name.as_str()).collect();
        assert_eq!(names, vec!["Earth", "Mars"]);
        assert_eq!(layout.rings.len(), 8);
        assert_eq!(view.comparison().len(), 2);
        assert!(view.sun_details().unwrap().starts_with("Sun\n\n"));
        assert!(view.body_details(&BodyId::new("3")).unwrap().starts_with("🌌 EARTH"));
    }

    #[test]
    fn controls_make_no_calls() {
        let api = catalog();
        let mut view = OrbitalView::new();
        view.mount();
        block_on(view.load(&api));
        api.clear_calls();

        view.controls_mut().faster();
        view.controls_mut().toggle_orbiting();
        view.controls_mut().reset_speed();
        assert_eq!(api.calls(), Vec::<ApiCall>::new());
    }

    #[test]
    fn ticks_advance_only_while_orbiting() {
        let mut view = OrbitalView::new();
        view.mount();
        view.tick(0.0);
        view.tick(100.0);
        assert_relative_eq!(view.clock().scaled_seconds(), 0.1);
        view.controls_mut().pause();
        view.tick(200.0);
        assert_relative_eq!(view.clock().scaled_seconds(), 0.1);
    }
}
