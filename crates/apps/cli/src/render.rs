//! Plain-text renderings of the view models.

use std::fmt::Write;

use orbital::{COMPARISON_HEADERS, sun_tooltip};
use session::{SessionContext, Theme};
use views::{CardActions, DetailView, GridView, OrbitalView, PlanetCard, VIEW_ONLY_HINT};

pub fn card(card: &PlanetCard) -> String {
    let mut out = format!("[{}] {}\n", card.id, card.title);
    let _ = writeln!(out, "  {}", card.description);
    let _ = writeln!(out, "  Distance from Sun: {}", card.distance);
    let _ = writeln!(out, "  Radius: {}", card.radius);
    let _ = writeln!(out, "  Mass: {}", card.mass);
    let _ = writeln!(out, "  Orbital speed: {}", card.orbital_speed);
    if let Some(by) = &card.created_by {
        let _ = writeln!(out, "  Added by: {by}");
    }
    if card.actions == CardActions::ViewOnly {
        let _ = writeln!(out, "  ({VIEW_ONLY_HINT})");
    }
    out
}

pub fn grid(view: &GridView) -> String {
    let mut out = String::new();
    if let Some(banner) = view.user_banner() {
        let _ = writeln!(out, "Welcome, {}! {}\n", banner.username, banner.badge);
    }
    let cards = view.cards();
    if cards.is_empty() {
        out.push_str("No planets yet.\n");
    }
    for c in &cards {
        out.push_str(&card(c));
        out.push('\n');
    }
    for line in view.footer().lines() {
        let _ = writeln!(out, "{line}");
    }
    out
}

pub fn detail(view: &DetailView) -> String {
    let mut out = String::new();
    if let Some(body) = view.body() {
        let _ = writeln!(out, "{}", body.name);
        if let Some(url) = body.image_url.as_deref().filter(|u| !u.is_empty()) {
            let _ = writeln!(out, "Image: {url}");
        }
    }
    for line in view.lines() {
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Frame length used when running the scene clock ahead.
const STEP_MS: f64 = 250.0;

/// Run the view's clock through `at_s` seconds of fixed frames.
pub fn advance_scene(view: &mut OrbitalView, at_s: f64) {
    let end_ms = at_s.max(0.0) * 1000.0;
    let mut now_ms = 0.0;
    view.tick(now_ms);
    while now_ms < end_ms {
        now_ms = (now_ms + STEP_MS).min(end_ms);
        view.tick(now_ms);
    }
}

/// Bodies in orbit order. With `positions` set, each line carries the
/// position on the view's clock instead of the CSS declarations.
pub fn orbital(view: &OrbitalView, positions: bool) -> String {
    let Some(layout) = view.layout() else {
        return "Loading solar system...\n".to_string();
    };
    let controls = view.controls();
    let mut out = String::new();
    if let Some(sun) = layout.sun {
        let _ = writeln!(out, "☀ {}", sun_tooltip(sun).trim_end());
    }
    let _ = writeln!(
        out,
        "Speed: {} ({})\n",
        controls.speed_label(),
        if controls.is_orbiting() { "orbiting" } else { "paused" }
    );

    let clock = view.clock();
    for placed in &layout.bodies {
        if positions {
            let (x, y) = clock.position_px(&placed.params);
            let _ = writeln!(
                out,
                "{:<10} {:>6.1}° ({:>7.1}, {:>7.1})",
                placed.body.name,
                clock.angle_deg(&placed.params),
                x,
                y
            );
        } else {
            let _ = writeln!(out, "{:<10} {}", placed.body.name, placed.style.to_css());
        }
    }

    out.push('\n');
    let rows: Vec<[String; 5]> = view
        .comparison()
        .iter()
        .map(|r| r.cells().map(str::to_string))
        .collect();
    out.push_str(&table(&COMPARISON_HEADERS, &rows));
    out
}

/// Left-aligned columns sized to their widest cell.
pub fn table<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let mut out = pad_line(headers.iter().copied(), &widths);
    out.push('\n');
    for row in rows {
        out.push_str(&pad_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(c, w)| format!("{c:<w$}", w = *w))
        .collect();
    padded.join("  ").trim_end().to_string()
}

pub fn whoami(ctx: &SessionContext, theme: Theme) -> String {
    let who = match ctx.username() {
        Some(name) if ctx.is_admin() => format!("{name} (admin)"),
        Some(name) => name.to_string(),
        None if ctx.is_authenticated() => "User".to_string(),
        None => "not logged in".to_string(),
    };
    format!("{who}\nTheme: {}\n", theme.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CelestialBody, InMemoryCatalog};
    use pollster::block_on;
    use pretty_assertions::assert_eq;

    #[test]
    fn view_only_cards_carry_the_hint() {
        let body = CelestialBody::named(4u64, "Mars").with_distance(227_900_000.0);
        let text = card(&PlanetCard::new(&body, false));
        assert!(text.starts_with("[4] Mars\n"));
        assert!(text.contains("Distance from Sun: 227,900,000 km"));
        assert!(text.contains(VIEW_ONLY_HINT));
        assert!(!card(&PlanetCard::new(&body, true)).contains(VIEW_ONLY_HINT));
    }

    #[test]
    fn table_pads_columns() {
        let rows = [
            ["Earth".to_string(), "1".to_string()],
            ["Mercury".to_string(), "22".to_string()],
        ];
        assert_eq!(
            table(&["Name", "N"], &rows),
            "Name     N\nEarth    1\nMercury  22\n"
        );
    }

    #[test]
    fn orbital_positions_follow_the_clock() {
        let api = InMemoryCatalog::with_bodies(vec![
            CelestialBody::named(1u64, "Sun"),
            CelestialBody::named(3u64, "Earth").with_distance(149_600_000.0),
        ]);
        let mut view = OrbitalView::new();
        view.mount();
        block_on(view.load(&api));

        let styles = orbital(&view, false);
        assert!(styles.contains("animation-duration: 10s"));
        assert!(styles.contains("Planet"));

        // A quarter of Earth's 10s lap moves it from 90° to 180°.
        advance_scene(&mut view, 2.5);
        let positions = orbital(&view, true);
        assert!(positions.contains(" 180.0°"), "{positions}");
    }

    #[test]
    fn paused_scene_keeps_its_start_angle() {
        let api = InMemoryCatalog::with_bodies(vec![
            CelestialBody::named(3u64, "Earth").with_distance(149_600_000.0),
        ]);
        let mut view = OrbitalView::new();
        view.mount();
        block_on(view.load(&api));
        view.controls_mut().pause();

        advance_scene(&mut view, 2.5);
        let frozen = orbital(&view, true);
        assert!(frozen.contains("  90.0°"), "{frozen}");
        assert!(frozen.contains("(paused)"));
    }

    #[test]
    fn whoami_reports_anonymous_sessions() {
        assert_eq!(
            whoami(&SessionContext::anonymous(), Theme::from_stored(None)),
            format!("not logged in\nTheme: {}\n", Theme::from_stored(None).label())
        );
    }
}
