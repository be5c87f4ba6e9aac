use catalog::{ApiError, BodyId, CatalogApi, CelestialBody, CreatePlanet, PlanetForm, UpdatePlanet};
use foundation::Time;
use runtime::{Mount, NoticeSlot, Ticket};
use session::SessionContext;
use tracing::{debug, error};

use crate::card::PlanetCard;
use crate::prompt::Prompter;

pub const LOADING_TEXT: &str = "Loading planets...";
pub const LOAD_FAILED: &str = "Could not load planets. Please try again.";
pub const CREATED: &str = "Planet added successfully!";
pub const CREATE_FAILED: &str = "Failed to add planet. Please check your connection.";
pub const UPDATE_FAILED: &str = "Failed to update planet. Please try again.";

pub const ADMIN_BADGE: &str = "Admin Mode: You can add, edit and delete planets";
pub const USER_BADGE: &str = "User Mode: You can only view planets";

/// Payload messages when the service sent any, the fallback otherwise.
fn failure_text(err: &ApiError, fallback: &str) -> String {
    match err.field_messages() {
        Some(joined) => format!("Error: {joined}"),
        None => fallback.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBanner {
    pub username: String,
    pub badge: &'static str,
}

/// What the grid shows below the cards for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFooter {
    /// "Please login to view more options".
    LoginReminder,
    /// Signed in without admin rights.
    RegularUser,
    None,
}

impl GridFooter {
    pub fn lines(self) -> &'static [&'static str] {
        match self {
            GridFooter::LoginReminder => &["🔒 Please login to view more options"],
            GridFooter::RegularUser => &[
                "👤 You are logged in as a regular user.",
                "Only administrators can add, edit, or delete planets.",
                "Contact an admin if you need to add a new planet.",
            ],
            GridFooter::None => &[],
        }
    }
}

#[derive(Debug, Default)]
pub struct AddPlanetForm {
    pub form: PlanetForm,
    error: Option<String>,
    success: NoticeSlot,
    submitting: bool,
}

impl AddPlanetForm {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self, now: Time) -> Option<&str> {
        self.success.message(now)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting { "Adding..." } else { "Add Planet" }
    }
}

/// Modal editor for one record, pre-filled from it.
#[derive(Debug)]
pub struct Editor {
    id: BodyId,
    original_name: String,
    pub form: PlanetForm,
    error: Option<String>,
    submitting: bool,
}

impl Editor {
    fn new(body: &CelestialBody) -> Self {
        Self {
            id: body.id.clone(),
            original_name: body.name.clone(),
            form: PlanetForm::from_body(body),
            error: None,
            submitting: false,
        }
    }

    pub fn id(&self) -> &BodyId {
        &self.id
    }

    pub fn title(&self) -> String {
        format!("✏️ Edit {}", self.original_name)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn save_label(&self) -> &'static str {
        if self.submitting { "Saving..." } else { "Save" }
    }
}

#[derive(Debug)]
pub struct PendingCreate {
    ticket: Ticket,
    pub payload: CreatePlanet,
}

#[derive(Debug)]
pub struct PendingUpdate {
    ticket: Ticket,
    pub id: BodyId,
    pub payload: UpdatePlanet,
}

#[derive(Debug)]
pub struct PendingDelete {
    ticket: Ticket,
    pub id: BodyId,
    pub name: String,
}

/// The planet grid: list, add form, per-card editor and delete.
///
/// Every successful mutation asks the caller to refetch; records are never
/// patched locally.
#[derive(Debug)]
pub struct GridView {
    mount: Mount,
    /// Most recent list request; older responses are dropped.
    latest_load: Option<Ticket>,
    session: SessionContext,
    planets: Vec<CelestialBody>,
    loading: bool,
    error: Option<String>,
    add_form: AddPlanetForm,
    editor: Option<Editor>,
    notice: NoticeSlot,
}

impl GridView {
    pub fn new(session: SessionContext) -> Self {
        Self {
            mount: Mount::new(),
            latest_load: None,
            session,
            planets: Vec::new(),
            loading: true,
            error: None,
            add_form: AddPlanetForm::default(),
            editor: None,
            notice: NoticeSlot::new(),
        }
    }

    pub fn set_session(&mut self, session: SessionContext) {
        if !session.is_admin() {
            self.editor = None;
        }
        self.session = session;
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Start a mount; the returned ticket is for the initial fetch.
    pub fn mount(&mut self) -> Ticket {
        self.loading = true;
        self.add_form.submitting = false;
        self.editor = None;
        let ticket = self.mount.mount();
        self.latest_load = Some(ticket);
        ticket
    }

    pub fn unmount(&mut self) {
        self.mount.unmount();
        self.editor = None;
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        let ticket = self.mount.issue();
        self.latest_load = Some(ticket);
        ticket
    }

    /// Returns whether the result was applied.
    pub fn apply_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<CelestialBody>, ApiError>,
    ) -> bool {
        if !self.mount.accepts(ticket) {
            debug!("dropping planet list for a stale view");
            return false;
        }
        if self.latest_load.is_some_and(|latest| latest.supersedes(ticket)) {
            debug!("dropping planet list superseded by a newer request");
            return false;
        }
        match result {
            Ok(planets) => {
                self.planets = planets;
                self.error = None;
            }
            Err(err) => {
                error!("Error fetching planets: {err}");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A retry is offered alongside the load error.
    pub fn can_retry(&self) -> bool {
        self.error.is_some()
    }

    pub fn planets(&self) -> &[CelestialBody] {
        &self.planets
    }

    pub fn cards(&self) -> Vec<PlanetCard> {
        let admin = self.session.is_admin();
        self.planets.iter().map(|p| PlanetCard::new(p, admin)).collect()
    }

    pub fn user_banner(&self) -> Option<UserBanner> {
        let username = self.session.username()?;
        Some(UserBanner {
            username: username.to_string(),
            badge: if self.session.is_admin() { ADMIN_BADGE } else { USER_BADGE },
        })
    }

    pub fn footer(&self) -> GridFooter {
        if self.session.username().is_none() {
            GridFooter::LoginReminder
        } else if !self.session.is_admin() {
            GridFooter::RegularUser
        } else {
            GridFooter::None
        }
    }

    pub fn shows_add_form(&self) -> bool {
        self.session.is_admin()
    }

    pub fn add_form(&self) -> &AddPlanetForm {
        &self.add_form
    }

    pub fn add_form_mut(&mut self) -> &mut AddPlanetForm {
        &mut self.add_form
    }

    /// Transient grid-level notice (edit confirmations).
    pub fn notice(&self, now: Time) -> Option<&str> {
        self.notice.message(now)
    }

    /// Drop expired notices; true when something changed.
    pub fn expire_notices(&mut self, now: Time) -> bool {
        let a = self.notice.expire(now);
        let b = self.add_form.success.expire(now);
        a || b
    }

    pub fn begin_create(&mut self) -> Option<PendingCreate> {
        if !self.session.is_admin() || self.add_form.submitting {
            return None;
        }
        self.add_form.error = None;
        self.add_form.success.clear();
        match self.add_form.form.to_create() {
            Ok(payload) => {
                self.add_form.submitting = true;
                Some(PendingCreate {
                    ticket: self.mount.issue(),
                    payload,
                })
            }
            Err(err) => {
                self.add_form.error = Some(err.to_string());
                None
            }
        }
    }

    /// Returns true when the list should be refetched.
    pub fn apply_create(
        &mut self,
        pending: PendingCreate,
        result: Result<(), ApiError>,
        now: Time,
    ) -> bool {
        if !self.mount.accepts(pending.ticket) {
            return false;
        }
        self.add_form.submitting = false;
        match result {
            Ok(()) => {
                self.add_form.form = PlanetForm::default();
                self.add_form.success.show(CREATED, now);
                true
            }
            Err(err) => {
                error!("Error while adding planet: {err}");
                self.add_form.error = Some(failure_text(&err, CREATE_FAILED));
                false
            }
        }
    }

    pub fn open_editor(&mut self, id: &BodyId) -> bool {
        if !self.session.is_admin() {
            return false;
        }
        match self.planets.iter().find(|p| &p.id == id) {
            Some(body) => {
                self.editor = Some(Editor::new(body));
                true
            }
            None => false,
        }
    }

    /// Closing is refused while a save is in flight.
    pub fn close_editor(&mut self) -> bool {
        match &self.editor {
            Some(editor) if editor.submitting => false,
            Some(_) => {
                self.editor = None;
                true
            }
            None => false,
        }
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    /// Editing a field clears the previous error.
    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        let editor = self.editor.as_mut()?;
        editor.error = None;
        Some(editor)
    }

    pub fn begin_update(&mut self) -> Option<PendingUpdate> {
        if !self.session.is_admin() {
            return None;
        }
        let ticket = self.mount.issue();
        let editor = self.editor.as_mut().filter(|e| !e.submitting)?;
        editor.error = None;
        match editor.form.to_update() {
            Ok(payload) => {
                editor.submitting = true;
                Some(PendingUpdate {
                    ticket,
                    id: editor.id.clone(),
                    payload,
                })
            }
            Err(err) => {
                editor.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn apply_update(
        &mut self,
        pending: PendingUpdate,
        result: Result<(), ApiError>,
        now: Time,
    ) -> bool {
        if !self.mount.accepts(pending.ticket) {
            return false;
        }
        match result {
            Ok(()) => {
                self.editor = None;
                self.notice.show(
                    format!("Planet \"{}\" updated successfully!", pending.payload.name),
                    now,
                );
                true
            }
            Err(err) => {
                error!("Update error: {err}");
                if let Some(editor) = self.editor.as_mut().filter(|e| e.id == pending.id) {
                    editor.submitting = false;
                    editor.error = Some(failure_text(&err, UPDATE_FAILED));
                }
                false
            }
        }
    }

    /// Ask for confirmation; declining issues nothing.
    pub fn request_delete(
        &mut self,
        id: &BodyId,
        prompter: &mut impl Prompter,
    ) -> Option<PendingDelete> {
        if !self.session.is_admin() {
            return None;
        }
        let name = self.planets.iter().find(|p| &p.id == id)?.name.clone();
        if !prompter.confirm(&format!("Are you sure you want to delete \"{name}\"?")) {
            return None;
        }
        Some(PendingDelete {
            ticket: self.mount.issue(),
            id: id.clone(),
            name,
        })
    }

    pub fn apply_delete(
        &mut self,
        pending: PendingDelete,
        result: Result<(), ApiError>,
        prompter: &mut impl Prompter,
    ) -> bool {
        if !self.mount.accepts(pending.ticket) {
            return false;
        }
        match result {
            Ok(()) => {
                prompter.alert(&format!("Planet \"{}\" deleted successfully!", pending.name));
                true
            }
            Err(err) => {
                error!("Delete error: {err}");
                let reason = err.detail().map(str::to_string).unwrap_or_else(|| err.to_string());
                prompter.alert(&format!("Failed to delete planet: {reason}"));
                false
            }
        }
    }

    pub async fn load<A: CatalogApi>(&mut self, api: &A) {
        let ticket = self.begin_load();
        let result = api.list_planets().await;
        self.apply_load(ticket, result);
    }

    pub async fn submit_create<A: CatalogApi>(&mut self, api: &A, now: Time) {
        let Some(pending) = self.begin_create() else {
            return;
        };
        let result = api.create_planet(&pending.payload).await;
        if self.apply_create(pending, result, now) {
            self.load(api).await;
        }
    }

    pub async fn submit_update<A: CatalogApi>(&mut self, api: &A, now: Time) {
        let Some(pending) = self.begin_update() else {
            return;
        };
        let result = api.update_planet(&pending.id, &pending.payload).await;
        if self.apply_update(pending, result, now) {
            self.load(api).await;
        }
    }

    pub async fn delete<A: CatalogApi, P: Prompter>(
        &mut self,
        api: &A,
        id: &BodyId,
        prompter: &mut P,
    ) {
        let Some(pending) = self.request_delete(id, prompter) else {
            return;
        };
        let result = api.delete_planet(&pending.id).await;
        if self.apply_delete(pending, result, prompter) {
            self.load(api).await;
        }
    }
}
