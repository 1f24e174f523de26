/*
[INPUT]:  CLI arguments, optional YAML configuration file
[OUTPUT]: JSON results of Float API operations on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI commands, flags, or startup flow
*/

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use float_sdk::{Args, Credentials, Float, FloatConfig, PasswordReset, PasswordResetRequest, UserQuery};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "float", version, about = "Float API command line client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the session user
    User(Login),
    /// Log in and print the credit score
    Score(Login),
    /// Log in and print (or issue) the card
    Card {
        #[command(flatten)]
        login: Login,
        #[arg(long)]
        create: bool,
    },
    /// Request a password reset token
    RequestReset {
        #[arg(long, required_unless_present = "phone")]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Set a new password with a reset token
    Reset {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
    },
    /// Invoke any bound operation by alias with JSON arguments
    Call {
        alias: String,
        /// Positional arguments, each a JSON document
        args: Vec<String>,
        #[command(flatten)]
        login: OptionalLogin,
    },
}

#[derive(ClapArgs, Debug)]
struct Login {
    #[arg(long)]
    email: String,
    #[arg(long, env = "FLOAT_PASSWORD")]
    password: String,
}

#[derive(ClapArgs, Debug)]
struct OptionalLogin {
    #[arg(long, requires = "password")]
    email: Option<String>,
    #[arg(long, env = "FLOAT_PASSWORD")]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_ref())?;
    let float = Float::new(config).context("initialize float sdk")?;
    float.events().on_any(|event| {
        info!(event = %event.name, "float event");
    });
    debug!(aliases = float.bindings().len(), "float sdk ready");

    let output = run(&float, args.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(float: &Float, command: Command) -> Result<Value> {
    match command {
        Command::User(login) => {
            log_in(float, &login.email, &login.password).await?;
            let user = float
                .users()
                .get(UserQuery::session().force())
                .await
                .context("fetch session user")?;
            Ok(serde_json::to_value(user)?)
        }
        Command::Score(login) => {
            log_in(float, &login.email, &login.password).await?;
            float.scoring().get_score().await.context("fetch score")
        }
        Command::Card { login, create } => {
            log_in(float, &login.email, &login.password).await?;
            if create {
                float.cards().create_card().await.context("create card")
            } else {
                float.cards().get_card().await.context("fetch card")
            }
        }
        Command::RequestReset { email, phone } => {
            let request = PasswordResetRequest { email, phone };
            float
                .passwords()
                .request_reset(&request)
                .await
                .context("request password reset")
        }
        Command::Reset { token, password } => float
            .passwords()
            .reset(&PasswordReset { token, password })
            .await
            .context("reset password"),
        Command::Call { alias, args, login } => {
            if let (Some(email), Some(password)) = (&login.email, &login.password) {
                log_in(float, email, password).await?;
            }
            if !float.bindings().contains(&alias) {
                let known: Vec<&str> = float.bindings().names().collect();
                bail!("unknown operation {alias}; bound operations: {}", known.join(", "));
            }
            let values = args
                .iter()
                .map(|raw| serde_json::from_str::<Value>(raw).with_context(|| format!("argument is not JSON: {raw}")))
                .collect::<Result<Vec<_>>>()?;
            float
                .call(&alias, Args::new(values))
                .await
                .with_context(|| format!("call {alias}"))
        }
    }
}

async fn log_in(float: &Float, email: &str, password: &str) -> Result<()> {
    let user = float
        .users()
        .login(&Credentials::email(email, password))
        .await
        .context("log in")?;
    info!(user_id = %user.id, "logged in");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<FloatConfig> {
    match path {
        Some(path) => FloatConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(FloatConfig::default()),
    }
}
