use catalog::{BodyId, CelestialBody};
use foundation::format_grouped;

pub const CARD_BACKGROUND: &str = "linear-gradient(135deg, #667eea 0%, #764ba2 100%)";
pub const VIEW_ONLY_HINT: &str = "Login as admin to edit/delete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardActions {
    /// Edit and delete buttons.
    Manage,
    ViewOnly,
}

/// Display-ready content of one grid card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanetCard {
    pub id: BodyId,
    pub title: String,
    pub background: String,
    pub description: String,
    pub distance: String,
    pub radius: String,
    pub mass: String,
    pub orbital_speed: String,
    pub created_by: Option<String>,
    pub actions: CardActions,
}

fn grouped_or_na(value: Option<f64>) -> String {
    value.map(format_grouped).unwrap_or_else(|| "N/A".to_string())
}

impl PlanetCard {
    pub fn new(body: &CelestialBody, is_admin: bool) -> Self {
        Self {
            id: body.id.clone(),
            title: body.name.clone(),
            background: match body.image_url.as_deref().filter(|u| !u.is_empty()) {
                Some(url) => format!("url({url})"),
                None => CARD_BACKGROUND.to_string(),
            },
            description: body
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description".to_string()),
            distance: format!("{} km", grouped_or_na(body.distance_from_sun)),
            radius: format!("{} km", grouped_or_na(body.radius)),
            mass: format!("{} kg", grouped_or_na(body.mass_kg)),
            orbital_speed: format!("{} km/s", grouped_or_na(body.orbital_speed_km_s)),
            created_by: body.created_by.clone().filter(|c| !c.is_empty()),
            actions: if is_admin {
                CardActions::Manage
            } else {
                CardActions::ViewOnly
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_numbers_render_na() {
        let card = PlanetCard::new(&CelestialBody::named(1u64, "Ceres"), false);
        assert_eq!(card.description, "No description");
        assert_eq!(card.radius, "N/A km");
        assert_eq!(card.mass, "N/A kg");
        assert_eq!(card.background, CARD_BACKGROUND);
        assert_eq!(card.actions, CardActions::ViewOnly);
    }

    #[test]
    fn numbers_are_grouped() {
        let mut body = CelestialBody::named(3u64, "Earth").with_distance(149_600_000.0);
        body.orbital_speed_km_s = Some(29.78);
        body.image_url = Some("https://img/e.png".to_string());
        let card = PlanetCard::new(&body, true);
        assert_eq!(card.distance, "149,600,000 km");
        assert_eq!(card.orbital_speed, "29.78 km/s");
        assert_eq!(card.background, "url(https://img/e.png)");
        assert_eq!(card.actions, CardActions::Manage);
    }
}
