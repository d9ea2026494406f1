use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use yoga::net::types::Session;
use yoga::pages::detail::DetailPage;
use yoga::pages::form::SessionForm;
use yoga::pages::login::{LoginForm, LoginPage};
use yoga::pages::me::{ACCOUNT_DELETED, MePage};
use yoga::pages::register::{RegisterForm, RegisterPage};
use yoga::pages::sessions::ListPage;
use yoga::util::form::FormError;
use yoga::util::nav::{MemoryRouter, TracingNotifier};
use yoga::{ApiClient, ApiError, AppContext, ClientConfig, ConfigError, PageError, SessionState};


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing credentials; pass --email/--password or set YOGA_EMAIL/YOGA_PASSWORD")]
    MissingCredentials,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("invalid session: {0}")]
    Form(#[from] FormError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "yoga-cli", about = "Yoga session booking CLI")]
struct Cli {
    /// Overrides `YOGA_API_BASE_URL` from the client config.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "YOGA_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "YOGA_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account from --email/--password plus names.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    Sessions(SessionsCommand),
    Teachers(TeachersCommand),
    /// Show the logged-in account.
    Me,
    DeleteAccount,
}

#[derive(Args, Debug)]
struct SessionsCommand {
    #[command(subcommand)]
    command: SessionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SessionsSubcommand {
    List,
    Show { id: u64 },
    Create(SessionArgs),
    Update {
        id: u64,
        #[command(flatten)]
        fields: SessionArgs,
    },
    Delete { id: u64 },
    Participate { id: u64 },
    Unparticipate { id: u64 },
}

/// Session fields. On update, omitted fields keep their current value.
#[derive(Args, Debug, Default)]
struct SessionArgs {
    #[arg(long)]
    name: Option<String>,
    /// `YYYY-MM-DD`
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    teacher_id: Option<u64>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Debug)]
struct TeachersCommand {
    #[command(subcommand)]
    command: TeachersSubcommand,
}

#[derive(Subcommand, Debug)]
enum TeachersSubcommand {
    List,
    Show { id: u64 },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let client = ApiClient::new(&config, SessionState::new())?;
    let ctx = AppContext::from_client(client, Rc::new(MemoryRouter::new()), Rc::new(TracingNotifier));
    let (email, password) = credentials(cli.email, cli.password)?;

    match cli.command {
        Command::Register { first_name, last_name } => {
            run_register(&ctx, RegisterForm { email, first_name, last_name, password }).await
        }
        Command::Sessions(sessions) => {
            log_in(&ctx, email, password).await?;
            run_sessions(&ctx, sessions).await
        }
        Command::Teachers(teachers) => {
            log_in(&ctx, email, password).await?;
            run_teachers(&ctx, teachers).await
        }
        Command::Me => {
            log_in(&ctx, email, password).await?;
            run_me(&ctx).await
        }
        Command::DeleteAccount => {
            log_in(&ctx, email, password).await?;
            run_delete_account(&ctx).await
        }
    }
}

fn credentials(email: Option<String>, password: Option<String>) -> Result<(String, String), CliError> {
    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(CliError::MissingCredentials),
    }
}

async fn log_in(ctx: &AppContext, email: String, password: String) -> Result<(), CliError> {
    let mut page = LoginPage::new(ctx.clone());
    page.form = LoginForm { email, password };
    page.submit().await?;
    Ok(())
}

async fn run_register(ctx: &AppContext, form: RegisterForm) -> Result<(), CliError> {
    let mut page = RegisterPage::new(ctx.clone());
    page.form = form;
    page.submit().await?;
    print_json(&json!({ "message": "User registered successfully!" }))
}

async fn run_sessions(ctx: &AppContext, sessions: SessionsCommand) -> Result<(), CliError> {
    match sessions.command {
        SessionsSubcommand::List => {
            let mut page = ListPage::new(ctx.clone());
            page.load().await?;
            print_json(&page.sessions)
        }
        SessionsSubcommand::Show { id } => {
            let mut page = DetailPage::new(ctx.clone(), id);
            page.init().await?;
            print_detail(&page)
        }
        SessionsSubcommand::Create(fields) => {
            let body = session_form(None, fields).validate()?;
            let created = ctx.sessions.create(&body).await?;
            print_json(&created)
        }
        SessionsSubcommand::Update { id, fields } => {
            let current = ctx.sessions.detail(id).await?;
            let mut body = session_form(Some(&current), fields).validate()?;
            body.users = current.users;
            let updated = ctx.sessions.update(id, &body).await?;
            print_json(&updated)
        }
        SessionsSubcommand::Delete { id } => {
            ctx.sessions.delete(id).await?;
            print_json(&json!({ "deleted": id }))
        }
        SessionsSubcommand::Participate { id } => {
            let mut page = DetailPage::new(ctx.clone(), id);
            page.participate().await?;
            print_detail(&page)
        }
        SessionsSubcommand::Unparticipate { id } => {
            let mut page = DetailPage::new(ctx.clone(), id);
            page.un_participate().await?;
            print_detail(&page)
        }
    }
}

async fn run_teachers(ctx: &AppContext, teachers: TeachersCommand) -> Result<(), CliError> {
    match teachers.command {
        TeachersSubcommand::List => print_json(&ctx.teachers.all().await?),
        TeachersSubcommand::Show { id } => print_json(&ctx.teachers.detail(id).await?),
    }
}

async fn run_me(ctx: &AppContext) -> Result<(), CliError> {
    let mut page = MePage::new(ctx.clone());
    page.load().await?;
    print_json(&page.user)
}

async fn run_delete_account(ctx: &AppContext) -> Result<(), CliError> {
    let mut page = MePage::new(ctx.clone());
    page.delete().await?;
    print_json(&json!({ "message": ACCOUNT_DELETED }))
}

/// Start from `current` (if any) and overlay the flags that were given.
fn session_form(current: Option<&Session>, fields: SessionArgs) -> SessionForm {
    let mut form = current.map(SessionForm::from_session).unwrap_or_default();
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(date) = fields.date {
        form.date = date;
    }
    if fields.teacher_id.is_some() {
        form.teacher_id = fields.teacher_id;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    form
}

fn print_detail(page: &DetailPage) -> Result<(), CliError> {
    print_json(&json!({
        "session": page.session,
        "teacher": page.teacher.as_ref().map(|t| t.display_name()),
        "isParticipate": page.is_participate,
    }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
