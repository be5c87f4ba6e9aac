use std::cell::RefCell;

use catalog::{BodyId, ClientConfig, RemoteClient};
use runtime::Ticket;
use session::{LocalStorageStore, SessionStore};
use starfield::StarfieldSurface;
use views::{DetailView, GridView, LoginPage, OrbitalView, Route, SignupPage};
use wasm_bindgen::JsValue;

use crate::js::{api_err, log_error};

/// Everything the browser front end keeps between calls from the page.
pub(crate) struct App {
    pub config: ClientConfig,
    pub session: SessionStore<LocalStorageStore>,
    pub route: Route,
    pub grid: GridView,
    pub orbital: OrbitalView,
    pub detail: DetailView,
    pub login: LoginPage,
    pub signup: SignupPage,
    pub starfield: Option<StarfieldSurface>,
}

/// Fetch to start once the state borrow is released.
pub(crate) enum Load {
    None,
    Grid(Ticket),
    Orbital(Ticket),
    Detail(Ticket, BodyId),
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static ON_CHANGE: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
}

pub(crate) fn install(app: App) {
    APP.with(|slot| {
        let previous = slot.borrow_mut().replace(app);
        drop(previous);
    });
}

pub(crate) fn with_app<T>(f: impl FnOnce(&mut App) -> T) -> Result<T, JsValue> {
    APP.with(|slot| {
        let mut slot = slot.borrow_mut();
        let app = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("start_app has not been called"))?;
        Ok(f(app))
    })
}

pub(crate) fn set_on_change(callback: Option<js_sys::Function>) {
    ON_CHANGE.with(|slot| *slot.borrow_mut() = callback);
}

/// Ask the page to re-render from the current state.
pub(crate) fn notify() {
    let callback = ON_CHANGE.with(|slot| slot.borrow().clone());
    if let Some(cb) = callback {
        if let Err(err) = cb.call0(&JsValue::NULL) {
            log_error(&format!("render callback failed: {err:?}"));
        }
    }
}

impl App {
    pub fn client(&self) -> Result<RemoteClient, JsValue> {
        RemoteClient::new(self.config.clone())
            .map(|c| c.with_access_token(self.session.access_token()))
            .map_err(api_err)
    }

    /// Switch views. The previous view is unmounted so its in-flight
    /// results are dropped.
    pub fn enter(&mut self, requested: Route) -> Load {
        let route = requested.guard(self.session.access_token().is_some());
        match &self.route {
            Route::Grid => self.grid.unmount(),
            Route::Orbital => self.orbital.unmount(),
            Route::Planet(_) => self.detail.unmount(),
            _ => {}
        }
        self.route = route.clone();
        match route {
            Route::Grid => {
                self.grid.set_session(self.session.context().clone());
                Load::Grid(self.grid.mount())
            }
            Route::Orbital => Load::Orbital(self.orbital.mount()),
            Route::Planet(id) => Load::Detail(self.detail.mount(id.clone()), id),
            Route::Login => {
                self.login = LoginPage::new();
                Load::None
            }
            Route::Signup => {
                self.signup = SignupPage::new();
                Load::None
            }
            Route::NotFound => Load::None,
        }
    }
}
