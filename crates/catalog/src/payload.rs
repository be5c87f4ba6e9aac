use foundation::number::parse_optional_number;
use serde::{Deserialize, Serialize};

use crate::body::CelestialBody;

/// Raw text of the add/edit planet form, exactly as typed.
///
/// Numeric fields are `Option<String>` so that "not supplied" (`null` from a
/// host form) and "typed nothing" (`""`) both reach the shared parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetForm {
    pub name: String,
    pub description: String,
    pub radius: Option<String>,
    pub distance_from_sun: Option<String>,
    pub mass_kg: Option<String>,
    pub orbital_speed_km_s: Option<String>,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingName,
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::MissingName => write!(f, "Planet name is required"),
        }
    }
}

impl std::error::Error for FormError {}

/// `POST /planets/` body. Unparseable numbers are sent as explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlanet {
    pub name: String,
    pub description: String,
    pub radius: Option<f64>,
    pub distance_from_sun: Option<f64>,
    pub mass_kg: Option<f64>,
    pub orbital_speed_km_s: Option<f64>,
    pub image_url: Option<String>,
}

/// `PUT /planets/:id/` body.
///
/// Numbers that normalize to absent are left out of the JSON entirely, so the
/// server keeps its stored value. An update can change a number but never
/// clear one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlanet {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_sun: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbital_speed_km_s: Option<f64>,
    pub image_url: Option<String>,
}

impl PlanetForm {
    /// Edit form pre-filled from a stored record. Zero and absent numbers
    /// both start out blank.
    pub fn from_body(body: &CelestialBody) -> Self {
        fn prefill(v: Option<f64>) -> Option<String> {
            v.filter(|n| *n != 0.0).map(|n| n.to_string())
        }

        Self {
            name: body.name.clone(),
            description: body.description.clone().unwrap_or_default(),
            radius: prefill(body.radius),
            distance_from_sun: prefill(body.distance_from_sun),
            mass_kg: prefill(body.mass_kg),
            orbital_speed_km_s: prefill(body.orbital_speed_km_s),
            image_url: body.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn to_create(&self) -> Result<CreatePlanet, FormError> {
        Ok(CreatePlanet {
            name: self.checked_name()?,
            description: self.description.trim().to_string(),
            radius: number(&self.radius),
            distance_from_sun: number(&self.distance_from_sun),
            mass_kg: number(&self.mass_kg),
            orbital_speed_km_s: number(&self.orbital_speed_km_s),
            image_url: self.trimmed_image_url(),
        })
    }

    pub fn to_update(&self) -> Result<UpdatePlanet, FormError> {
        Ok(UpdatePlanet {
            name: self.checked_name()?,
            description: self.description.trim().to_string(),
            distance_from_sun: number(&self.distance_from_sun),
            radius: number(&self.radius),
            mass_kg: number(&self.mass_kg),
            orbital_speed_km_s: number(&self.orbital_speed_km_s),
            image_url: self.trimmed_image_url(),
        })
    }

    fn checked_name(&self) -> Result<String, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        Ok(name.to_string())
    }

    fn trimmed_image_url(&self) -> Option<String> {
        let url = self.image_url.trim();
        (!url.is_empty()).then(|| url.to_string())
    }
}

fn number(field: &Option<String>) -> Option<f64> {
    parse_optional_number(field.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn form(name: &str) -> PlanetForm {
        PlanetForm {
            name: name.to_string(),
            ..PlanetForm::default()
        }
    }

    #[test]
    fn create_requires_trimmed_name() {
        assert_eq!(form("   ").to_create(), Err(FormError::MissingName));
        assert_eq!(form("").to_update(), Err(FormError::MissingName));
        assert_eq!(form("  Kepler ").to_create().unwrap().name, "Kepler");
    }

    #[test]
    fn create_sends_null_for_unparseable_numbers() {
        let mut f = form("Kepler");
        f.radius = Some(String::new());
        f.distance_from_sun = Some("abc".to_string());
        f.mass_kg = None;
        f.orbital_speed_km_s = Some("12.5".to_string());

        let value = serde_json::to_value(f.to_create().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Kepler",
                "description": "",
                "radius": null,
                "distance_from_sun": null,
                "mass_kg": null,
                "orbital_speed_km_s": 12.5,
                "image_url": null,
            })
        );
    }

    #[test]
    fn update_omits_absent_numbers() {
        let mut f = form("Earth");
        f.description = " Home ".to_string();
        f.mass_kg = Some(String::new());
        f.radius = Some("6371".to_string());
        f.image_url = "  https://img/earth.png ".to_string();

        let value = serde_json::to_value(f.to_update().unwrap()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("mass_kg"));
        assert!(!obj.contains_key("distance_from_sun"));
        assert_eq!(obj["radius"], json!(6371.0));
        assert_eq!(obj["description"], json!("Home"));
        assert_eq!(obj["image_url"], json!("https://img/earth.png"));
    }

    #[test]
    fn update_keeps_explicit_null_image_url() {
        let value = serde_json::to_value(form("Earth").to_update().unwrap()).unwrap();
        assert_eq!(value["image_url"], serde_json::Value::Null);
    }

    #[test]
    fn edit_form_prefills_blank_for_zero_and_absent() {
        let mut body = CelestialBody::named(7u64, "Mars");
        body.radius = Some(3389.5);
        body.mass_kg = Some(0.0);
        body.description = Some("Red".to_string());

        let f = PlanetForm::from_body(&body);
        assert_eq!(f.radius.as_deref(), Some("3389.5"));
        assert_eq!(f.mass_kg, None);
        assert_eq!(f.distance_from_sun, None);
        assert_eq!(f.description, "Red");
        assert_eq!(f.image_url, "");
    }
}
