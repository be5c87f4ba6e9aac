use catalog::PlanetForm;

/// Set a form input by its field name. Unknown names are ignored and
/// reported as `false`.
pub fn set_form_field(form: &mut PlanetForm, field: &str, value: impl Into<String>) -> bool {
    let value = value.into();
    match field {
        "name" => form.name = value,
        "description" => form.description = value,
        "image_url" => form.image_url = value,
        "radius" => form.radius = Some(value),
        "distance_from_sun" => form.distance_from_sun = Some(value),
        "mass_kg" => form.mass_kg = Some(value),
        "orbital_speed_km_s" => form.orbital_speed_km_s = Some(value),
        _ => return false,
    }
    true
}
