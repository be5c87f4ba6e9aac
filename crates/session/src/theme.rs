/// Colour scheme preference. Dark unless the user has explicitly chosen light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Interpret the stored `darkMode` value. Only the exact string `"false"`
    /// selects light mode.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("false") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn stored_value(self) -> &'static str {
        match self {
            Theme::Dark => "true",
            Theme::Light => "false",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Class applied to `<body>`; the other one is removed.
    pub fn body_class(self) -> &'static str {
        match self {
            Theme::Dark => "dark-mode",
            Theme::Light => "light-mode",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    pub fn toggle_hint(self) -> &'static str {
        match self {
            Theme::Dark => "Switch to Light Mode",
            Theme::Light => "Switch to Dark Mode",
        }
    }
}
