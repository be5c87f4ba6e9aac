mod prompt;
mod render;

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use catalog::{BodyId, ClientConfig, Credentials, PlanetForm, Registration, RemoteClient};
use clap::{Parser, Subcommand};
use foundation::Time;
use session::{FileStore, SessionStore};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use views::{DetailView, GridView, LoginPage, OrbitalView, SignupPage, set_form_field};

use prompt::ConsolePrompter;

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the SolarCollector planet catalog")]
struct Args {
    /// Catalog API base URL (default: SOLAR_API_URL or http://127.0.0.1:8000/api)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (default: SOLAR_STATE_PATH or ~/.solar-collector.json)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every planet as a card
    List,

    /// Show a single planet
    Show { id: String },

    /// Print the orbital layout and the comparison table
    Orbital {
        /// Speed multiplier
        #[arg(long, default_value_t = 1.0)]
        speed: f64,

        /// Run the scene clock this many seconds and print positions instead of CSS styles
        #[arg(long)]
        at: Option<f64>,

        #[arg(long)]
        paused: bool,
    },

    /// Obtain and store a token pair
    Login {
        #[arg(long)]
        username: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored tokens
    Logout,

    /// Show the current session
    Whoami,

    /// Add a planet (admin only)
    Add {
        #[command(flatten)]
        fields: PlanetFields,
    },

    /// Edit a planet; omitted fields keep their current value (admin only)
    Edit {
        id: String,

        #[command(flatten)]
        fields: PlanetFields,
    },

    /// Delete a planet after confirmation (admin only)
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show or toggle the stored theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct PlanetFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    radius: Option<String>,
    #[arg(long)]
    distance_from_sun: Option<String>,
    #[arg(long)]
    mass_kg: Option<String>,
    #[arg(long)]
    orbital_speed_km_s: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
}

impl PlanetFields {
    fn apply(self, form: &mut PlanetForm) {
        let fields = [
            ("name", self.name),
            ("description", self.description),
            ("radius", self.radius),
            ("distance_from_sun", self.distance_from_sun),
            ("mass_kg", self.mass_kg),
            ("orbital_speed_km_s", self.orbital_speed_km_s),
            ("image_url", self.image_url),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                set_form_field(form, field, value);
            }
        }
    }
}

#[tokio::main]
async fn main() -> CliResult {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match args.api_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };
    let state = state_path(args.state)?;
    debug!(api = config.base_url(), state = %state.display(), "starting");

    let mut session = SessionStore::load(FileStore::open(&state)?);
    let client = RemoteClient::new(config)?.with_access_token(session.access_token());

    match args.command {
        Command::List => {
            let grid = loaded_grid(&client, &session).await?;
            print!("{}", render::grid(&grid));
        }
        Command::Show { id } => {
            let mut view = DetailView::new();
            view.mount(BodyId::new(id.as_str()));
            view.load(&client).await;
            if view.is_loading() {
                return Err(format!("could not load planet {id}").into());
            }
            print!("{}", render::detail(&view));
        }
        Command::Orbital { speed, at, paused } => {
            let mut view = OrbitalView::new();
            view.mount();
            view.load(&client).await;
            if view.is_loading() {
                return Err("could not load the solar system".into());
            }
            let controls = view.controls_mut();
            controls.set_speed(speed);
            if paused {
                controls.pause();
            }
            if let Some(at_s) = at {
                render::advance_scene(&mut view, at_s);
            }
            print!("{}", render::orbital(&view, at.is_some()));
        }
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => ConsolePrompter::stdio(false).ask("Password: ")?,
            };
            let mut page = LoginPage::new();
            page.form = Credentials { username, password };
            if page.submit(&client, &mut session).await.is_none() {
                return Err(page.error().unwrap_or("login failed").into());
            }
            info!(state = %state.display(), "stored tokens");
            print!("{}", render::whoami(session.context(), session.theme()));
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => ConsolePrompter::stdio(false).ask("Password: ")?,
            };
            let mut page = SignupPage::new();
            page.form = Registration {
                username,
                email,
                password,
            };
            if page.submit(&client).await.is_none() {
                return Err(page.error().unwrap_or("registration failed").into());
            }
            println!("Account created. Log in with `solar login`.");
        }
        Command::Logout => {
            views::logout(&mut session, &mut ConsolePrompter::stdio(true));
        }
        Command::Whoami => print!("{}", render::whoami(session.context(), session.theme())),
        Command::Add { fields } => {
            let mut grid = admin_grid(&client, &session).await?;
            fields.apply(&mut grid.add_form_mut().form);
            grid.submit_create(&client, now()).await;
            let form = grid.add_form();
            if let Some(err) = form.error() {
                return Err(err.into());
            }
            println!("{}", form.success(now()).unwrap_or(views::CREATED));
        }
        Command::Edit { id, fields } => {
            let mut grid = admin_grid(&client, &session).await?;
            if !grid.open_editor(&BodyId::new(id.as_str())) {
                return Err(format!("no planet with id {id}").into());
            }
            if let Some(editor) = grid.editor_mut() {
                fields.apply(&mut editor.form);
            }
            grid.submit_update(&client, now()).await;
            if let Some(err) = grid.editor().and_then(|e| e.error()) {
                return Err(err.into());
            }
            if let Some(notice) = grid.notice(now()) {
                println!("{notice}");
            }
        }
        Command::Delete { id, yes } => {
            let mut grid = admin_grid(&client, &session).await?;
            let id = BodyId::new(id);
            if !grid.planets().iter().any(|p| p.id == id) {
                return Err(format!("no planet with id {id}").into());
            }
            grid.delete(&client, &id, &mut ConsolePrompter::stdio(yes)).await;
        }
        Command::Theme { toggle } => {
            let theme = if toggle {
                session.toggle_theme()?
            } else {
                session.theme()
            };
            println!("{}", theme.label());
        }
    }

    Ok(())
}

fn state_path(flag: Option<PathBuf>) -> CliResult<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = env::var_os("SOLAR_STATE_PATH").filter(|p| !p.is_empty()) {
        return Ok(path.into());
    }
    let home = env::var_os("HOME").ok_or("HOME is not set; pass --state")?;
    Ok(PathBuf::from(home).join(".solar-collector.json"))
}

fn now() -> Time {
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0);
    Time::from_millis(ms)
}

async fn loaded_grid(
    client: &RemoteClient,
    session: &SessionStore<FileStore>,
) -> CliResult<GridView> {
    let mut grid = GridView::new(session.context().clone());
    grid.mount();
    grid.load(client).await;
    match grid.error() {
        Some(err) => Err(err.into()),
        None => Ok(grid),
    }
}

async fn admin_grid(
    client: &RemoteClient,
    session: &SessionStore<FileStore>,
) -> CliResult<GridView> {
    if !session.context().is_admin() {
        return Err("only administrators can change the catalog; log in as an admin".into());
    }
    loaded_grid(client, session).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn args_parse() {
        Args::command().debug_assert();
    }

    #[test]
    fn only_supplied_fields_are_applied() {
        let mut form = PlanetForm {
            name: "Earth".to_string(),
            radius: Some("6371".to_string()),
            ..PlanetForm::default()
        };
        PlanetFields {
            radius: Some("6372".to_string()),
            description: Some("Home".to_string()),
            ..PlanetFields::default()
        }
        .apply(&mut form);
        assert_eq!(form.name, "Earth");
        assert_eq!(form.radius.as_deref(), Some("6372"));
        assert_eq!(form.description, "Home");
    }

    #[test]
    fn explicit_state_flag_wins() {
        let path = PathBuf::from("/tmp/solar-state.json");
        assert_eq!(state_path(Some(path.clone())).unwrap(), path);
    }

    #[test]
    fn edit_flags_parse_into_fields() {
        let args = Args::try_parse_from([
            "solar", "--state", "s.json", "edit", "7", "--mass-kg", "5.97e24",
        ])
        .unwrap();
        assert_eq!(args.state, Some(PathBuf::from("s.json")));
        match args.command {
            Command::Edit { id, fields } => {
                assert_eq!(id, "7");
                assert_eq!(fields.mass_kg.as_deref(), Some("5.97e24"));
                assert_eq!(fields.name, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
