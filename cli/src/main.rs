//! `blueprints-cli`: REST and realtime client for the blueprint backends.
//!
//! REST subcommands print the server's JSON. `watch` streams realtime pushes
//! as JSON lines on stdout; `draw` publishes points and exits. Logs go to
//! stderr so stdout stays machine-readable.

mod live;
mod rest;

use clap::{Args, Parser, Subcommand};
use frames::rest::ApiError;
use frames::{BlueprintKey, KeyError, Point};
use realtime::config::{DEFAULT_API_BASE, DEFAULT_IO_BASE, DEFAULT_STOMP_PATH};
use realtime::{Endpoints, LinkConfig, LinkError, TransportKind};
use serde::Serialize;

use crate::rest::RestClient;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing token; pass --token or set BLUEPRINTS_TOKEN")]
    MissingToken,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid blueprint key: {0}")]
    Key(#[from] KeyError),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("realtime link failed: {0}")]
    LinkFailed(String),
    #[error("timed out waiting for the realtime link")]
    Timeout,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "blueprints-cli", about = "Blueprint REST and realtime CLI")]
struct Cli {
    /// Backend pair to talk to: `socketio` (room-based) or `stomp` (topic-based).
    #[arg(long, env = "BLUEPRINTS_TRANSPORT", default_value = "socketio")]
    transport: TransportKind,

    #[arg(long, env = "BLUEPRINTS_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[arg(long, env = "BLUEPRINTS_IO_BASE", default_value = DEFAULT_IO_BASE)]
    io_base: String,

    #[arg(long, env = "BLUEPRINTS_STOMP_PATH", default_value = DEFAULT_STOMP_PATH)]
    stomp_path: String,

    #[arg(long, env = "BLUEPRINTS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    transport: TransportKind,
    endpoints: Endpoints,
    token: Option<String>,
}

impl CliContext {
    fn rest(&self) -> RestClient {
        RestClient::new(self.endpoints.rest_base(self.transport), self.token.clone())
    }

    fn link(&self, target: &Target) -> Result<LinkConfig, CliError> {
        Ok(LinkConfig::new(self.transport, &target.author, &target.name, self.token.clone())?)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    Auth(AuthCommand),
    Blueprint(BlueprintCommand),
    /// Stream realtime updates for one blueprint as JSON lines.
    Watch(Target),
    /// Publish points to one blueprint over the realtime link.
    Draw {
        #[command(flatten)]
        target: Target,
        /// Points as `x,y`.
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<Point>,
    },
}

#[derive(Args, Debug)]
struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuthSubcommand {
    Register { username: String, password: String },
    Login { username: String, password: String },
    /// Check `--token` with the server.
    Verify,
}

#[derive(Args, Debug)]
struct BlueprintCommand {
    #[command(subcommand)]
    command: BlueprintSubcommand,
}

#[derive(Subcommand, Debug)]
enum BlueprintSubcommand {
    List {
        author: String,
    },
    Get(Target),
    Create {
        #[command(flatten)]
        target: Target,
        #[arg(allow_hyphen_values = true)]
        points: Vec<Point>,
    },
    /// Replace a blueprint's points.
    Save {
        #[command(flatten)]
        target: Target,
        #[arg(allow_hyphen_values = true)]
        points: Vec<Point>,
    },
    Delete(Target),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
struct Target {
    author: String,
    name: String,
}

impl Target {
    fn key(&self) -> Result<BlueprintKey, CliError> {
        Ok(BlueprintKey::new(&self.author, &self.name)?)
    }
}

fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(cli.verbose))
        .init();

    let ctx = CliContext {
        transport: cli.transport,
        endpoints: Endpoints { api_base: cli.api_base, io_base: cli.io_base, stomp_path: cli.stomp_path },
        token: cli.token.filter(|t| !t.trim().is_empty()),
    };

    match cli.command {
        Command::Auth(auth) => run_auth(&ctx, auth).await,
        Command::Blueprint(blueprint) => run_blueprint(&ctx, blueprint).await,
        Command::Watch(target) => run_watch(&ctx, &target).await,
        Command::Draw { target, points } => run_draw(&ctx, &target, points).await,
    }
}

async fn run_auth(ctx: &CliContext, auth: AuthCommand) -> Result<(), CliError> {
    let client = ctx.rest();
    match auth.command {
        AuthSubcommand::Register { username, password } => {
            let session = client.register(&username, &password).await?;
            print_json(&session)
        }
        AuthSubcommand::Login { username, password } => {
            let session = client.login(&username, &password).await?;
            tracing::info!(user = %session.user.username, "signed in; export BLUEPRINTS_TOKEN to reuse the token");
            print_json(&session)
        }
        AuthSubcommand::Verify => {
            if ctx.token.is_none() {
                return Err(CliError::MissingToken);
            }
            client.verify().await?;
            println!("ok");
            Ok(())
        }
    }
}

async fn run_blueprint(ctx: &CliContext, blueprint: BlueprintCommand) -> Result<(), CliError> {
    let client = ctx.rest();
    match blueprint.command {
        BlueprintSubcommand::List { author } => print_json(&client.list(author.trim()).await?),
        BlueprintSubcommand::Get(target) => print_json(&client.fetch(&target.key()?).await?),
        BlueprintSubcommand::Create { target, points } => print_json(&client.create(&target.key()?, &points).await?),
        BlueprintSubcommand::Save { target, points } => print_json(&client.save(&target.key()?, &points).await?),
        BlueprintSubcommand::Delete(target) => {
            let key = target.key()?;
            client.delete(&key).await?;
            tracing::info!(%key, "deleted");
            Ok(())
        }
    }
}

async fn run_watch(ctx: &CliContext, target: &Target) -> Result<(), CliError> {
    let config = ctx.link(target)?;
    let mut failed: Option<serde_json::Error> = None;
    live::drive(ctx.endpoints.clone(), config, None, |event| {
        if let Some(line) = live::event_line(event) {
            match serde_json::to_string(&line) {
                Ok(rendered) => println!("{rendered}"),
                Err(error) => failed = Some(error),
            }
        }
    })
    .await?;
    failed.map_or(Ok(()), |error| Err(error.into()))
}

async fn run_draw(ctx: &CliContext, target: &Target, points: Vec<Point>) -> Result<(), CliError> {
    let config = ctx.link(target)?;
    let key = config.key.clone();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    for point in points {
        // The receiver is alive until `drive` returns.
        let _ = tx.send(point);
    }
    drop(tx);

    let summary = live::drive(ctx.endpoints.clone(), config, Some(rx), |_| {}).await?;
    tracing::info!(%key, sent = summary.sent, "draw complete");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
