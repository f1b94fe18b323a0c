//! Terminal driver for the auth flows.
//!
//! Each invocation plays one page load: it restores the persisted session
//! from the state file, mounts the app over an in-memory page, fills the
//! relevant form, runs one flow and prints what the page would show.

mod store;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use authgate::App;
use authgate::config::{ConfigError, DEFAULT_IDENTITY_BASE_URL, ProviderConfig};
use authgate::error::FlowError;
use authgate::net::rest::RestIdentityProvider;
use authgate::state::route::{MemoryNavigator, Route};
use authgate::state::storage::{KeyValueStore, profile_image_key};
use authgate::ui::dom::{MemoryDocument, ids};
use authgate::util::data_url::InMemoryFile;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::store::FileStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid provider config: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Flow(#[from] FlowError),
    #[error("state file is not a JSON string map: {0}")]
    State(#[from] serde_json::Error),
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

#[derive(Parser, Debug)]
#[command(name = "authgate", about = "Sign up, sign in and manage a profile image from the terminal")]
struct Cli {
    #[arg(long, env = "AUTHGATE_API_KEY")]
    api_key: String,

    #[arg(long, env = "AUTHGATE_IDENTITY_BASE_URL", default_value = DEFAULT_IDENTITY_BASE_URL)]
    identity_base_url: String,

    #[arg(long, env = "AUTHGATE_STATE", default_value = ".authgate.json", help = "Where the session and images persist")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and sign in.
    Signup(SignupArgs),
    /// Sign in with email and password.
    Signin(SigninArgs),
    Signout,
    /// Show who the persisted session belongs to.
    Whoami,
    ProfileImage(ProfileImageCommand),
}

#[derive(Args, Debug)]
struct SignupArgs {
    email: String,
    password: String,
    #[arg(long, help = "Defaults to the password")]
    confirm_password: Option<String>,
}

#[derive(Args, Debug)]
struct SigninArgs {
    email: String,
    password: String,
}

#[derive(Args, Debug)]
struct ProfileImageCommand {
    #[command(subcommand)]
    command: ProfileImageSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileImageSubcommand {
    Upload { path: PathBuf },
    Remove,
}

/// One simulated page: the app plus the handles the driver reads back.
struct Page {
    app: App,
    doc: Rc<MemoryDocument>,
    nav: Rc<MemoryNavigator>,
    store: Rc<FileStore>,
}

impl Page {
    fn load(cli: &Cli, route: Route) -> Result<Self, CliError> {
        let config = ProviderConfig {
            identity_base_url: cli.identity_base_url.clone(),
            ..ProviderConfig::with_api_key(cli.api_key.clone())
        }
        .validate()?;
        let store = Rc::new(FileStore::open(&cli.state)?);
        tracing::debug!(state = %store.path().display(), page = route.path(), "loading page");

        let provider = Rc::new(RestIdentityProvider::new(config, store.clone()));
        let doc = Rc::new(MemoryDocument::full_page());
        let nav = Rc::new(MemoryNavigator::at(&format!("/{}", route.path())));
        let app = App::new(provider, doc.clone(), store.clone(), nav.clone());
        app.mount();
        Ok(Self { app, doc, nav, store })
    }

    fn report(&self) {
        if let Some(text) = self.doc.text(ids::MESSAGE).filter(|t| !t.is_empty()) {
            println!("{text}");
        }
        for path in self.nav.history() {
            println!("navigated to {path}");
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Signup(args) => run_signup(&cli, args).await,
        Command::Signin(args) => run_signin(&cli, args).await,
        Command::Signout => run_signout(&cli).await,
        Command::Whoami => run_whoami(&cli),
        Command::ProfileImage(image) => match &image.command {
            ProfileImageSubcommand::Upload { path } => run_image_upload(&cli, path).await,
            ProfileImageSubcommand::Remove => run_image_remove(&cli),
        },
    }
}

async fn run_signup(cli: &Cli, args: &SignupArgs) -> Result<(), CliError> {
    let page = Page::load(cli, Route::Signup)?;
    page.doc.set_field(ids::SIGNUP_FORM, "email", &args.email);
    page.doc.set_field(ids::SIGNUP_FORM, "password", &args.password);
    let confirm = args.confirm_password.as_deref().unwrap_or(&args.password);
    page.doc.set_field(ids::SIGNUP_FORM, "confirmPassword", confirm);

    let result = page.app.flows().sign_up().await;
    page.report();
    Ok(result?)
}

async fn run_signin(cli: &Cli, args: &SigninArgs) -> Result<(), CliError> {
    let page = Page::load(cli, Route::Login)?;
    page.doc.set_field(ids::SIGNIN_FORM, "email", &args.email);
    page.doc.set_field(ids::SIGNIN_FORM, "password", &args.password);

    let result = page.app.flows().sign_in().await;
    page.report();
    Ok(result?)
}

async fn run_signout(cli: &Cli) -> Result<(), CliError> {
    let page = Page::load(cli, Route::Welcome)?;
    let result = page.app.flows().sign_out().await;
    page.report();
    Ok(result?)
}

fn run_whoami(cli: &Cli) -> Result<(), CliError> {
    let page = Page::load(cli, Route::Welcome)?;
    let Some(session) = page.app.provider().current_session() else {
        println!("signed out");
        page.report();
        return Ok(());
    };
    let name = page.doc.text(ids::USERNAME_DISPLAY).unwrap_or_default();
    println!("{name} <{}> uid={}", session.email, session.uid);
    if page.store.get(&profile_image_key(&session.uid)).is_some() {
        println!("profile image stored");
    }
    Ok(())
}

async fn run_image_upload(cli: &Cli, path: &Path) -> Result<(), CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();

    let page = Page::load(cli, Route::Welcome)?;
    let result = page.app.profile_images().upload(&InMemoryFile::new(name, bytes)).await;
    page.report();
    Ok(result?)
}

fn run_image_remove(cli: &Cli) -> Result<(), CliError> {
    let page = Page::load(cli, Route::Welcome)?;
    let result = page.app.profile_images().remove();
    page.report();
    Ok(result?)
}
