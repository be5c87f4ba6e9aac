use foundation::number::parse_optional_number;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque, externally assigned record id. The service may send it as a JSON
/// number or a string; either way it is only ever echoed back in URLs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BodyId(String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for BodyId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for BodyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for BodyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Signed(i64),
            Unsigned(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Signed(n) => BodyId(n.to_string()),
            Raw::Unsigned(n) => BodyId(n.to_string()),
            Raw::Text(s) => BodyId(s),
        })
    }
}

/// A catalog record as served by `GET /planets/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Kilometres.
    #[serde(default, deserialize_with = "lenient_number")]
    pub radius: Option<f64>,
    /// Kilometres.
    #[serde(default, deserialize_with = "lenient_number")]
    pub distance_from_sun: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub mass_kg: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub orbital_speed_km_s: Option<f64>,
    /// Creator's display name. Some deployments send the user's numeric id.
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_by: Option<String>,
}

impl CelestialBody {
    /// Bare record with only the required fields set.
    pub fn named(id: impl Into<BodyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            image_url: None,
            radius: None,
            distance_from_sun: None,
            mass_kg: None,
            orbital_speed_km_s: None,
            created_by: None,
        }
    }

    pub fn with_distance(mut self, km: f64) -> Self {
        self.distance_from_sun = Some(km);
        self
    }

    /// The sun is identified by exact (case-insensitive) name equality.
    pub fn is_sun(&self) -> bool {
        self.name.to_lowercase() == "sun"
    }
}

/// Accepts JSON numbers, numeric strings (decimal columns) and null.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => parse_optional_number(Some(&s)),
    })
}

/// Accepts strings and integers; anything else reads as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Signed(i64),
        Unsigned(u64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Signed(n)) => Some(n.to_string()),
        Some(Raw::Unsigned(n)) => Some(n.to_string()),
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_numeric_and_string_ids() {
        let a: CelestialBody = serde_json::from_str(r#"{"id": 3, "name": "Mars"}"#).unwrap();
        let b: CelestialBody = serde_json::from_str(r#"{"id": "abc", "name": "Mars"}"#).unwrap();
        assert_eq!(a.id, BodyId::new("3"));
        assert_eq!(b.id.as_str(), "abc");
    }

    #[test]
    fn created_by_tolerates_ids_and_odd_shapes() {
        let list: Vec<CelestialBody> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Earth", "created_by": "admin"},
                {"id": 2, "name": "Mars", "created_by": 7},
                {"id": 3, "name": "Venus", "created_by": null},
                {"id": 4, "name": "Pluto", "created_by": {"id": 7}}
            ]"#,
        )
        .unwrap();
        let by: Vec<_> = list.iter().map(|b| b.created_by.as_deref()).collect();
        assert_eq!(by, vec![Some("admin"), Some("7"), None, None]);
    }

    #[test]
    fn missing_optional_fields_are_absent() {
        let body: CelestialBody = serde_json::from_str(r#"{"id": 1, "name": "Pluto"}"#).unwrap();
        assert_eq!(body, CelestialBody::named(1u64, "Pluto"));
    }

    #[test]
    fn decimal_strings_decode_as_numbers() {
        let body: CelestialBody = serde_json::from_str(
            r#"{"id": 1, "name": "Earth", "radius": "6371.00", "mass_kg": null, "distance_from_sun": 149600000}"#,
        )
        .unwrap();
        assert_eq!(body.radius, Some(6371.0));
        assert_eq!(body.mass_kg, None);
        assert_eq!(body.distance_from_sun, Some(149_600_000.0));
    }

    #[test]
    fn sun_match_is_exact_and_case_insensitive() {
        assert!(CelestialBody::named(1u64, "SUN").is_sun());
        assert!(CelestialBody::named(1u64, "Sun").is_sun());
        assert!(!CelestialBody::named(1u64, "Sunny").is_sun());
    }
}
