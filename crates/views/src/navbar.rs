use session::{KeyValueStore, SessionContext, SessionStore, Theme};
use tracing::warn;

use crate::prompt::Prompter;
use crate::route::Route;

pub const LOGGED_OUT: &str = "Logged out successfully!";

/// Pointer state of a link click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Click {
    /// DOM button index; 1 is the middle button.
    pub button: i16,
    pub ctrl: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickIntent {
    /// Let the browser follow the link (typically a new tab).
    Browser,
    Navigate(Route),
}

pub fn link_click(click: Click, target: Route) -> ClickIntent {
    if click.button == 1 || click.ctrl || click.meta {
        ClickIntent::Browser
    } else {
        ClickIntent::Navigate(target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
    pub title: &'static str,
    pub class: &'static str,
}

impl NavLink {
    pub fn href(&self) -> String {
        self.route.path()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    pub logo: NavLink,
    pub greeting: Option<String>,
    pub links: Vec<NavLink>,
    pub show_logout: bool,
    pub theme_label: &'static str,
    pub theme_hint: &'static str,
}

impl Navbar {
    pub fn new(session: &SessionContext, theme: Theme) -> Self {
        let mut links = vec![NavLink {
            label: "Orbital View",
            route: Route::Orbital,
            title: "3D Orbital View of Solar System",
            class: "nav-link",
        }];
        let greeting = session
            .display_name()
            .map(|name| format!("Welcome, {name}"));
        if session.is_authenticated() {
            links.push(NavLink {
                label: "Grid View",
                route: Route::Grid,
                title: "Home (Grid View)",
                class: "nav-link",
            });
        } else {
            links.push(NavLink {
                label: "Login",
                route: Route::Login,
                title: "Login",
                class: "nav-link",
            });
            links.push(NavLink {
                label: "Signup",
                route: Route::Signup,
                title: "Sign Up",
                class: "nav-link signup",
            });
        }
        Self {
            logo: NavLink {
                label: "🌌 SolarCollector",
                route: Route::Grid,
                title: "Home | Ctrl+Click or Middle-Click to open in new tab",
                class: "nav-logo",
            },
            greeting,
            links,
            show_logout: session.is_authenticated(),
            theme_label: theme.label(),
            theme_hint: theme.toggle_hint(),
        }
    }
}

/// Drop both tokens, acknowledge, and send the user to the login page.
pub fn logout<S: KeyValueStore>(
    session: &mut SessionStore<S>,
    prompter: &mut impl Prompter,
) -> Route {
    if let Err(err) = session.sign_out() {
        warn!("clearing stored tokens failed: {err}");
    }
    prompter.alert(LOGGED_OUT);
    Route::Login
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use catalog::{TokenPair, unsigned_token};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use session::MemoryStore;

    fn labels(nav: &Navbar) -> Vec<&str> {
        nav.links.iter().map(|l| l.label).collect()
    }

    #[test]
    fn signed_out_links() {
        let nav = Navbar::new(&SessionContext::anonymous(), Theme::Dark);
        assert_eq!(labels(&nav), vec!["Orbital View", "Login", "Signup"]);
        assert_eq!(nav.greeting, None);
        assert!(!nav.show_logout);
        assert_eq!(nav.theme_label, "Dark");
    }

    #[test]
    fn signed_in_greets_by_name() {
        let token = unsigned_token(&json!({"username": "ada"}));
        let nav = Navbar::new(&SessionContext::from_token(Some(&token)), Theme::Light);
        assert_eq!(nav.greeting.as_deref(), Some("Welcome, ada"));
        assert_eq!(labels(&nav), vec!["Orbital View", "Grid View"]);
        assert!(nav.show_logout);

        let nameless = unsigned_token(&json!({"is_superuser": false}));
        let nav = Navbar::new(&SessionContext::from_token(Some(&nameless)), Theme::Light);
        assert_eq!(nav.greeting.as_deref(), Some("Welcome, User"));
    }

    #[test]
    fn modified_clicks_go_to_the_browser() {
        let plain = Click::default();
        assert_eq!(link_click(plain, Route::Orbital), ClickIntent::Navigate(Route::Orbital));
        for click in [
            Click { button: 1, ..plain },
            Click { ctrl: true, ..plain },
            Click { meta: true, ..plain },
        ] {
            assert_eq!(link_click(click, Route::Orbital), ClickIntent::Browser);
        }
    }

    #[test]
    fn logout_clears_tokens_and_acknowledges() {
        let mut session = SessionStore::load(MemoryStore::new());
        session
            .sign_in(&TokenPair {
                access: unsigned_token(&json!({"username": "ada"})),
                refresh: "r".to_string(),
            })
            .unwrap();
        let mut prompter = ScriptedPrompter::default();
        assert_eq!(logout(&mut session, &mut prompter), Route::Login);
        assert_eq!(session.access_token(), None);
        assert_eq!(session.refresh_token(), None);
        assert_eq!(prompter.alerts, vec![LOGGED_OUT]);
    }
}
