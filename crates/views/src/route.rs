use catalog::BodyId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Orbital,
    /// The planet grid at `/`. Requires a stored access token.
    Grid,
    Planet(BodyId),
    Login,
    Signup,
    NotFound,
}

impl Route {
    /// Query strings and fragments are ignored, as is one trailing slash.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        match trimmed {
            "/" | "" => Route::Grid,
            "/orbital" => Route::Orbital,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            other => match other.strip_prefix("/planet/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Planet(BodyId::new(id)),
                _ => Route::NotFound,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Orbital => "/orbital".to_string(),
            Route::Grid => "/".to_string(),
            Route::Planet(id) => format!("/planet/{id}"),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Grid)
    }

    /// Where a visit actually lands. The check is presence only; an expired
    /// or garbled token still gets through and the API rejects it later.
    pub fn guard(self, has_access_token: bool) -> Route {
        if self.is_protected() && !has_access_token {
            Route::Login
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::Grid);
        assert_eq!(Route::parse("/orbital"), Route::Orbital);
        assert_eq!(Route::parse("/orbital/"), Route::Orbital);
        assert_eq!(Route::parse("/login?next=/"), Route::Login);
        assert_eq!(Route::parse("/signup#top"), Route::Signup);
        assert_eq!(Route::parse("/planet/42"), Route::Planet(BodyId::new("42")));
        assert_eq!(Route::parse("/planet/42/"), Route::Planet(BodyId::new("42")));
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/planet/"), Route::NotFound);
        assert_eq!(Route::parse("/planet/1/edit"), Route::NotFound);
        assert_eq!(Route::parse("/admin"), Route::NotFound);
    }

    #[test]
    fn grid_requires_token() {
        assert_eq!(Route::Grid.guard(false), Route::Login);
        assert_eq!(Route::Grid.guard(true), Route::Grid);
        assert_eq!(Route::Orbital.guard(false), Route::Orbital);
        assert_eq!(Route::Planet(BodyId::new("1")).guard(false).path(), "/planet/1");
    }
}
