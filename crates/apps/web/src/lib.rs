//! Browser front end. The page owns the DOM; the exports here own all state
//! and hand back plain JS objects describing what to render. After any
//! asynchronous change the callback registered with `set_on_change` fires.

mod app;
mod browser;
mod js;

use catalog::{BodyId, CatalogApi, ClientConfig, DEFAULT_API_URL, PlanetForm, RemoteClient};
use console_error_panic_hook::set_once;
use runtime::{NOTICE_TTL_S, Ticket};
use session::{LocalStorageStore, SessionStore, authenticate, signup};
use starfield::StarfieldSurface;
use views::{
    CardActions, Click, ClickIntent, DetailView, GridView, LOADING_TEXT, LoginPage, Navbar,
    NavLink, ORBITAL_LOADING_TEXT, OrbitalView, Prompter, Route, SignupPage, VIEW_ONLY_HINT,
    set_form_field,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use app::{App, Load, notify, with_app};
use browser::WindowPrompter;
use js::{log_error, opt_str, set, storage_err, str_array};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Boot the app against `api_base_url` (empty for the default) and show
/// `path`.
#[wasm_bindgen]
pub fn start_app(api_base_url: String, path: String) -> Result<(), JsValue> {
    let url = if api_base_url.trim().is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        api_base_url
    };
    let session = SessionStore::load(LocalStorageStore::new().map_err(storage_err)?);
    browser::apply_theme(session.theme());

    let starfield = match StarfieldSurface::attach(js_sys::Date::now() as u64) {
        Ok(surface) => Some(surface),
        Err(err) => {
            log_error(&format!("starfield unavailable: {err}"));
            None
        }
    };

    app::install(App {
        config: ClientConfig::new(url),
        grid: GridView::new(session.context().clone()),
        session,
        route: Route::NotFound,
        orbital: OrbitalView::new(),
        detail: DetailView::new(),
        login: LoginPage::new(),
        signup: SignupPage::new(),
        starfield,
    });
    navigate(&path)
}

#[wasm_bindgen]
pub fn set_on_change(callback: Option<js_sys::Function>) {
    app::set_on_change(callback);
}

#[wasm_bindgen]
pub fn navigate(path: &str) -> Result<(), JsValue> {
    go(Route::parse(path))
}

/// Returns true when the click was handled in-app and the page should
/// prevent the default navigation.
#[wasm_bindgen]
pub fn handle_link_click(path: &str, button: i16, ctrl: bool, meta: bool) -> Result<bool, JsValue> {
    match views::link_click(Click { button, ctrl, meta }, Route::parse(path)) {
        ClickIntent::Browser => Ok(false),
        ClickIntent::Navigate(route) => {
            go(route)?;
            Ok(true)
        }
    }
}

#[wasm_bindgen]
pub fn starfield_running() -> Result<bool, JsValue> {
    with_app(|app| app.starfield.as_ref().is_some_and(|s| s.is_running()))
}

#[wasm_bindgen]
pub fn current_route() -> Result<String, JsValue> {
    with_app(|app| app.route.path())
}

fn go(route: Route) -> Result<(), JsValue> {
    let (load, route) = with_app(|app| {
        let load = app.enter(route);
        (load, app.route.clone())
    })?;
    if route != Route::NotFound {
        browser::push_history(&route.path());
    }
    start_load(load);
    notify();
    Ok(())
}

fn client() -> Result<RemoteClient, JsValue> {
    with_app(|app| app.client())?
}

fn start_load(load: Load) {
    let client = match client() {
        Ok(c) => c,
        Err(err) => {
            log_error(&format!("no api client: {err:?}"));
            return;
        }
    };
    match load {
        Load::None => {}
        Load::Grid(ticket) => spawn_grid_load(client, ticket),
        Load::Orbital(ticket) => spawn_local(async move {
            let result = client.list_planets().await;
            let _ = with_app(|app| app.orbital.apply_load(ticket, result));
            notify();
        }),
        Load::Detail(ticket, id) => spawn_local(async move {
            let result = client.get_planet(&id).await;
            let _ = with_app(|app| app.detail.apply_load(ticket, result));
            notify();
        }),
    }
}

fn spawn_grid_load(client: RemoteClient, ticket: Ticket) {
    spawn_local(async move {
        let result = client.list_planets().await;
        let _ = with_app(|app| app.grid.apply_load(ticket, result));
        notify();
    });
}

fn reload_grid() {
    let Ok(client) = client() else {
        return;
    };
    if let Ok(ticket) = with_app(|app| app.grid.begin_load()) {
        spawn_grid_load(client, ticket);
    }
}

fn schedule_notice_expiry() {
    browser::after_ms((NOTICE_TTL_S * 1000.0) as i32 + 50, || {
        if with_app(|app| app.grid.expire_notices(browser::now())).unwrap_or(false) {
            notify();
        }
    });
}

// ---- session & navbar ----

#[wasm_bindgen]
pub fn session_info() -> Result<JsValue, JsValue> {
    with_app(|app| {
        let ctx = app.session.context();
        let o = js_sys::Object::new();
        set(&o, "authenticated", ctx.is_authenticated());
        set(&o, "username", opt_str(ctx.username()));
        set(&o, "is_admin", ctx.is_admin());
        set(&o, "theme", app.session.theme().stored_value());
        o.into()
    })
}

fn link_object(link: &NavLink) -> JsValue {
    let o = js_sys::Object::new();
    set(&o, "label", link.label);
    set(&o, "href", link.href());
    set(&o, "title", link.title);
    set(&o, "class", link.class);
    o.into()
}

#[wasm_bindgen]
pub fn navbar_state() -> Result<JsValue, JsValue> {
    with_app(|app| {
        let nav = Navbar::new(app.session.context(), app.session.theme());
        let o = js_sys::Object::new();
        set(&o, "logo", link_object(&nav.logo));
        set(&o, "greeting", opt_str(nav.greeting.as_deref()));
        set(
            &o,
            "links",
            nav.links.iter().map(link_object).collect::<js_sys::Array>(),
        );
        set(&o, "show_logout", nav.show_logout);
        set(&o, "theme_label", nav.theme_label);
        set(&o, "theme_hint", nav.theme_hint);
        o.into()
    })
}

#[wasm_bindgen]
pub fn toggle_theme() -> Result<String, JsValue> {
    let theme = with_app(|app| app.session.toggle_theme())?.map_err(storage_err)?;
    browser::apply_theme(theme);
    notify();
    Ok(theme.label().to_string())
}

#[wasm_bindgen]
pub fn logout() -> Result<(), JsValue> {
    let route = with_app(|app| {
        let route = views::logout(&mut app.session, &mut WindowPrompter);
        app.grid.set_session(app.session.context().clone());
        route
    })?;
    go(route)
}

// ---- login & signup ----

#[wasm_bindgen]
pub fn login_set_field(name: &str, value: String) -> Result<bool, JsValue> {
    with_app(|app| match name {
        "username" => {
            app.login.form.username = value;
            true
        }
        "password" => {
            app.login.form.password = value;
            true
        }
        _ => false,
    })
}

#[wasm_bindgen]
pub fn login_state() -> Result<JsValue, JsValue> {
    with_app(|app| {
        let o = js_sys::Object::new();
        set(&o, "username", app.login.form.username.as_str());
        set(&o, "error", opt_str(app.login.error()));
        set(&o, "submitting", app.login.is_submitting());
        o.into()
    })
}

#[wasm_bindgen]
pub fn login_submit() -> Result<(), JsValue> {
    let client = client()?;
    let Some(credentials) = with_app(|app| app.login.begin())? else {
        return Ok(());
    };
    notify();
    spawn_local(async move {
        let result = authenticate(&client, &credentials).await;
        let next = with_app(|app| {
            let next = app.login.apply(result, &mut app.session);
            app.grid.set_session(app.session.context().clone());
            next
        });
        match next {
            Ok(Some(route)) => {
                if let Err(err) = go(route) {
                    log_error(&format!("navigation failed: {err:?}"));
                }
            }
            _ => notify(),
        }
    });
    Ok(())
}

#[wasm_bindgen]
pub fn signup_set_field(name: &str, value: String) -> Result<bool, JsValue> {
    with_app(|app| {
        let form = &mut app.signup.form;
        match name {
            "username" => form.username = value,
            "email" => form.email = value,
            "password" => form.password = value,
            _ => return false,
        }
        true
    })
}

#[wasm_bindgen]
pub fn signup_state() -> Result<JsValue, JsValue> {
    with_app(|app| {
        let o = js_sys::Object::new();
        set(&o, "username", app.signup.form.username.as_str());
        set(&o, "email", app.signup.form.email.as_str());
        set(&o, "error", opt_str(app.signup.error()));
        set(&o, "submitting", app.signup.is_submitting());
        o.into()
    })
}

#[wasm_bindgen]
pub fn signup_submit() -> Result<(), JsValue> {
    let client = client()?;
    let Some(registration) = with_app(|app| app.signup.begin())? else {
        return Ok(());
    };
    notify();
    spawn_local(async move {
        let result = signup(&client, &registration).await;
        match with_app(|app| app.signup.apply(result)) {
            Ok(Some(route)) => {
                if let Err(err) = go(route) {
                    log_error(&format!("navigation failed: {err:?}"));
                }
            }
            _ => notify(),
        }
    });
    Ok(())
}

// ---- grid ----

fn form_object(form: &PlanetForm) -> JsValue {
    let o = js_sys::Object::new();
    set(&o, "name", form.name.as_str());
    set(&o, "description", form.description.as_str());
    set(&o, "radius", form.radius.as_deref().unwrap_or(""));
    set(&o, "distance_from_sun", form.distance_from_sun.as_deref().unwrap_or(""));
    set(&o, "mass_kg", form.mass_kg.as_deref().unwrap_or(""));
    set(&o, "orbital_speed_km_s", form.orbital_speed_km_s.as_deref().unwrap_or(""));
    set(&o, "image_url", form.image_url.as_str());
    o.into()
}

#[wasm_bindgen]
pub fn grid_state() -> Result<JsValue, JsValue> {
    let now = browser::now();
    with_app(|app| {
        let grid = &app.grid;
        let o = js_sys::Object::new();
        set(&o, "loading", grid.is_loading());
        set(&o, "loading_text", LOADING_TEXT);
        set(&o, "error", opt_str(grid.error()));
        set(&o, "can_retry", grid.can_retry());
        set(&o, "notice", opt_str(grid.notice(now)));

        let banner = match grid.user_banner() {
            Some(b) => {
                let bo = js_sys::Object::new();
                set(&bo, "username", b.username);
                set(&bo, "badge", b.badge);
                bo.into()
            }
            None => JsValue::NULL,
        };
        set(&o, "banner", banner);

        let cards = js_sys::Array::new();
        for card in grid.cards() {
            let c = js_sys::Object::new();
            set(&c, "id", card.id.as_str());
            set(&c, "title", card.title);
            set(&c, "background", card.background);
            set(&c, "description", card.description);
            set(&c, "distance", card.distance);
            set(&c, "radius", card.radius);
            set(&c, "mass", card.mass);
            set(&c, "orbital_speed", card.orbital_speed);
            set(&c, "created_by", opt_str(card.created_by.as_deref()));
            let manage = card.actions == CardActions::Manage;
            set(&c, "can_manage", manage);
            set(&c, "hint", opt_str((!manage).then_some(VIEW_ONLY_HINT)));
            cards.push(&c);
        }
        set(&o, "cards", cards);

        set(&o, "show_add_form", grid.shows_add_form());
        let add = grid.add_form();
        let ao = js_sys::Object::new();
        set(&ao, "values", form_object(&add.form));
        set(&ao, "error", opt_str(add.error()));
        set(&ao, "success", opt_str(add.success(now)));
        set(&ao, "submitting", add.is_submitting());
        set(&ao, "submit_label", add.submit_label());
        set(&o, "add_form", ao);

        let editor = match grid.editor() {
            Some(e) => {
                let eo = js_sys::Object::new();
                set(&eo, "id", e.id().as_str());
                set(&eo, "title", e.title());
                set(&eo, "values", form_object(&e.form));
                set(&eo, "error", opt_str(e.error()));
                set(&eo, "submitting", e.is_submitting());
                set(&eo, "save_label", e.save_label());
                eo.into()
            }
            None => JsValue::NULL,
        };
        set(&o, "editor", editor);
        set(&o, "footer", str_array(grid.footer().lines().iter().copied()));
        o.into()
    })
}

#[wasm_bindgen]
pub fn grid_retry() -> Result<(), JsValue> {
    reload_grid();
    notify();
    Ok(())
}

#[wasm_bindgen]
pub fn grid_add_set_field(name: &str, value: String) -> Result<bool, JsValue> {
    with_app(|app| set_form_field(&mut app.grid.add_form_mut().form, name, value))
}

#[wasm_bindgen]
pub fn grid_add_submit() -> Result<(), JsValue> {
    let client = client()?;
    let pending = with_app(|app| app.grid.begin_create())?;
    notify();
    let Some(pending) = pending else {
        return Ok(());
    };
    spawn_local(async move {
        let result = client.create_planet(&pending.payload).await;
        let refetch = with_app(|app| app.grid.apply_create(pending, result, browser::now()))
            .unwrap_or(false);
        if refetch {
            schedule_notice_expiry();
            reload_grid();
        }
        notify();
    });
    Ok(())
}

#[wasm_bindgen]
pub fn grid_edit_open(id: &str) -> Result<bool, JsValue> {
    let opened = with_app(|app| app.grid.open_editor(&BodyId::new(id)))?;
    notify();
    Ok(opened)
}

#[wasm_bindgen]
pub fn grid_edit_set_field(name: &str, value: String) -> Result<bool, JsValue> {
    with_app(|app| match app.grid.editor_mut() {
        Some(editor) => set_form_field(&mut editor.form, name, value),
        None => false,
    })
}

#[wasm_bindgen]
pub fn grid_edit_close() -> Result<bool, JsValue> {
    let closed = with_app(|app| app.grid.close_editor())?;
    notify();
    Ok(closed)
}

#[wasm_bindgen]
pub fn grid_edit_submit() -> Result<(), JsValue> {
    let client = client()?;
    let pending = with_app(|app| app.grid.begin_update())?;
    notify();
    let Some(pending) = pending else {
        return Ok(());
    };
    spawn_local(async move {
        let result = client.update_planet(&pending.id, &pending.payload).await;
        let refetch = with_app(|app| app.grid.apply_update(pending, result, browser::now()))
            .unwrap_or(false);
        if refetch {
            schedule_notice_expiry();
            reload_grid();
        }
        notify();
    });
    Ok(())
}

#[wasm_bindgen]
pub fn grid_delete(id: &str) -> Result<(), JsValue> {
    let client = client()?;
    let pending = with_app(|app| app.grid.request_delete(&BodyId::new(id), &mut WindowPrompter))?;
    let Some(pending) = pending else {
        return Ok(());
    };
    spawn_local(async move {
        let result = client.delete_planet(&pending.id).await;
        let refetch = with_app(|app| app.grid.apply_delete(pending, result, &mut WindowPrompter))
            .unwrap_or(false);
        if refetch {
            reload_grid();
        }
        notify();
    });
    Ok(())
}

// ---- orbital ----

#[wasm_bindgen]
pub fn orbital_state() -> Result<JsValue, JsValue> {
    with_app(|app| {
        let view = &app.orbital;
        let o = js_sys::Object::new();
        set(&o, "loading", view.is_loading());
        set(&o, "loading_text", ORBITAL_LOADING_TEXT);
        set(&o, "speed_label", format!("Speed: {}", view.controls().speed_label()));
        set(&o, "toggle_label", view.controls().toggle_label());

        let Some(layout) = view.layout() else {
            return o.into();
        };

        let sun = match layout.sun {
            Some(s) => {
                let so = js_sys::Object::new();
                set(&so, "name", s.name.as_str());
                set(&so, "tooltip", orbital::sun_tooltip(s));
                so.into()
            }
            None => JsValue::NULL,
        };
        set(&o, "sun", sun);

        let rings = js_sys::Array::new();
        for ring in layout.rings.iter() {
            let r = js_sys::Object::new();
            set(&r, "class", ring.class_name());
            set(&r, "title", ring.title());
            rings.push(&r);
        }
        set(&o, "rings", rings);

        let bodies = js_sys::Array::new();
        for placed in layout.bodies.iter() {
            let b = js_sys::Object::new();
            set(&b, "id", placed.body.id.as_str());
            set(&b, "name", placed.body.name.as_str());
            set(&b, "class", placed.class_name());
            set(&b, "style", placed.style.to_css());
            set(&b, "tooltip", orbital::tooltip(placed.body));
            set(&b, "icon_background", placed.icon_background());
            bodies.push(&b);
        }
        set(&o, "bodies", bodies);

        set(&o, "comparison_headers", str_array(orbital::COMPARISON_HEADERS));
        let rows = js_sys::Array::new();
        for row in view.comparison() {
            let r = js_sys::Object::new();
            set(&r, "color", row.color);
            set(&r, "cells", str_array(row.cells()));
            rows.push(&r);
        }
        set(&o, "comparison_rows", rows);
        o.into()
    })
}

fn with_controls(f: impl FnOnce(&mut orbital::OrbitControls)) -> Result<(), JsValue> {
    with_app(|app| f(app.orbital.controls_mut()))?;
    notify();
    Ok(())
}

#[wasm_bindgen]
pub fn orbital_toggle() -> Result<(), JsValue> {
    with_controls(|c| c.toggle_orbiting())
}

#[wasm_bindgen]
pub fn orbital_faster() -> Result<(), JsValue> {
    with_controls(|c| c.faster())
}

#[wasm_bindgen]
pub fn orbital_slower() -> Result<(), JsValue> {
    with_controls(|c| c.slower())
}

#[wasm_bindgen]
pub fn orbital_reset_speed() -> Result<(), JsValue> {
    with_controls(|c| c.reset_speed())
}

#[wasm_bindgen]
pub fn orbital_show_details(id: &str) -> Result<(), JsValue> {
    if let Some(text) = with_app(|app| app.orbital.body_details(&BodyId::new(id)))? {
        WindowPrompter.alert(&text);
    }
    Ok(())
}

#[wasm_bindgen]
pub fn orbital_show_sun() -> Result<(), JsValue> {
    if let Some(text) = with_app(|app| app.orbital.sun_details())? {
        WindowPrompter.alert(&text);
    }
    Ok(())
}

// ---- detail ----

#[wasm_bindgen]
pub fn planet_state() -> Result<JsValue, JsValue> {
    with_app(|app| {
        let view = &app.detail;
        let o = js_sys::Object::new();
        set(&o, "loading", view.is_loading());
        if let Some(body) = view.body() {
            set(&o, "name", body.name.as_str());
            set(&o, "image_url", opt_str(body.image_url.as_deref()));
        }
        set(&o, "lines", str_array(view.lines().iter().map(String::as_str)));
        o.into()
    })
}
