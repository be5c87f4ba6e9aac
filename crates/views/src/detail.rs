use catalog::{ApiError, BodyId, CatalogApi, CelestialBody};
use runtime::{Mount, Ticket};
use tracing::error;

/// Single record page at `/planet/:id`. Stays in its loading state when the
/// fetch fails.
#[derive(Debug, Default)]
pub struct DetailView {
    mount: Mount,
    id: Option<BodyId>,
    body: Option<CelestialBody>,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, id: BodyId) -> Ticket {
        self.id = Some(id);
        self.body = None;
        self.mount.mount()
    }

    pub fn unmount(&mut self) {
        self.mount.unmount();
    }

    pub fn apply_load(
        &mut self,
        ticket: Ticket,
        result: Result<CelestialBody, ApiError>,
    ) -> bool {
        if !self.mount.accepts(ticket) {
            return false;
        }
        match result {
            Ok(body) => self.body = Some(body),
            Err(err) => error!("Error fetching planet: {err}"),
        }
        true
    }

    pub async fn load<A: CatalogApi>(&mut self, api: &A) {
        let Some(id) = self.id.clone() else {
            return;
        };
        let ticket = self.mount.issue();
        let result = api.get_planet(&id).await;
        self.apply_load(ticket, result);
    }

    pub fn is_loading(&self) -> bool {
        self.body.is_none()
    }

    pub fn body(&self) -> Option<&CelestialBody> {
        self.body.as_ref()
    }

    /// Text lines under the heading and image.
    pub fn lines(&self) -> Vec<String> {
        let Some(body) = &self.body else {
            return vec!["Loading...".to_string()];
        };
        let km = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_else(|| "N/A".to_string());
        vec![
            body.description.clone().unwrap_or_default(),
            format!("Radius: {} km", km(body.radius)),
            format!("Distance: {} km", km(body.distance_from_sun)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::InMemoryCatalog;
    use pollster::block_on;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_loaded_record() {
        let mut io = CelestialBody::named(7u64, "Io");
        io.radius = Some(1821.6);
        let api = InMemoryCatalog::with_bodies(vec![io]);
        let mut view = DetailView::new();
        view.mount(BodyId::new("7"));
        block_on(view.load(&api));
        assert_eq!(view.body().map(|b| b.name.as_str()), Some("Io"));
        assert_eq!(view.lines(), vec!["", "Radius: 1821.6 km", "Distance: N/A km"]);
    }

    #[test]
    fn missing_record_stays_loading() {
        let api = InMemoryCatalog::new();
        let mut view = DetailView::new();
        view.mount(BodyId::new("404"));
        block_on(view.load(&api));
        assert!(view.is_loading());
        assert_eq!(view.lines(), vec!["Loading..."]);
    }
}
