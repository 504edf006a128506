use anyhow::{anyhow, bail, Context};
use api_relay::client::{
    render_response, render_saved_query, Action, HeaderEntry, HttpMethod, HttpRelayClient,
    Session, SqliteStore,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "api-client")]
#[command(about = "Send HTTP requests through an API relay")]
struct Cli {
    /// Base URL of the relay server
    #[arg(long, global = true, env = "API_RELAY_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Directory holding the saved-query database
    #[arg(long, global = true, default_value = ".api-client")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a request through the relay
    Send {
        /// HTTP method
        method: String,
        /// Target URL
        url: String,
        /// Request header as "Key: Value"; repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Request body; ignored for GET and HEAD
        #[arg(short, long = "data")]
        data: Option<String>,
    },
    /// Generate a JSON body from a description
    Generate {
        description: String,
    },
    /// Recently sent requests
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List saved queries, newest first
    List,
    /// Show a saved query
    Show { id: String },
    /// Send a saved query again
    Resend { id: String },
    /// Delete a saved query
    Delete { id: String },
}

type ClientSession = Session<HttpRelayClient, SqliteStore>;

fn parse_header(raw: &str) -> anyhow::Result<HeaderEntry> {
    let (key, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid header '{}', expected 'Key: Value'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid header '{}', name is empty", raw);
    }
    Ok(HeaderEntry::new(key, value.trim()))
}

fn open_session(cli: &Cli) -> anyhow::Result<ClientSession> {
    std::fs::create_dir_all(&cli.data_dir)
        .with_context(|| format!("Failed to create {}", cli.data_dir.display()))?;
    let store = SqliteStore::open(cli.data_dir.join("api-client.db"))
        .context("Failed to open saved-query database")?;
    Ok(Session::new(HttpRelayClient::new(&cli.server), store)?)
}

/// Sends the current draft and prints the outcome. Returns false when the
/// request never produced an upstream response.
async fn send_and_print(session: &mut ClientSession) -> anyhow::Result<bool> {
    let response = session.send().await?;
    print!("{}", render_response(&response));
    Ok(!response.is_failure())
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut session = open_session(&cli)?;

    match cli.command {
        Commands::Send {
            method,
            url,
            headers,
            data,
        } => {
            let method: HttpMethod = method.parse()?;
            let headers = headers
                .iter()
                .map(|h| parse_header(h))
                .collect::<anyhow::Result<Vec<_>>>()?;

            session.dispatch(Action::SetMethod(method))?;
            session.dispatch(Action::SetUrl(url))?;
            session.dispatch(Action::SetHeaders(headers))?;
            session.dispatch(Action::SetBody(data.unwrap_or_default()))?;
            send_and_print(&mut session).await
        }
        Commands::Generate { description } => {
            session.generate_json(&description).await?;
            println!("{}", session.state().draft.body);
            Ok(true)
        }
        Commands::History { command } => match command {
            HistoryCommands::List => {
                let recent = &session.state().recent;
                if recent.is_empty() {
                    println!("No saved queries");
                }
                for query in recent.entries() {
                    println!("{}", render_saved_query(query));
                }
                Ok(true)
            }
            HistoryCommands::Show { id } => {
                session.load_saved_query(&id)?;
                let draft = &session.state().draft;
                println!("{} {}", draft.method, draft.url);
                for header in draft.headers.iter().filter(|h| !h.key.trim().is_empty()) {
                    let marker = if header.enabled { "" } else { " (disabled)" };
                    println!("{}: {}{}", header.key, header.value, marker);
                }
                if !draft.body.is_empty() {
                    println!();
                    println!("{}", draft.body);
                }
                Ok(true)
            }
            HistoryCommands::Resend { id } => {
                session.load_saved_query(&id)?;
                send_and_print(&mut session).await
            }
            HistoryCommands::Delete { id } => {
                session.delete_saved_query(&id)?;
                println!("Deleted {}", id);
                Ok(true)
            }
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "api_relay=debug" } else { "api_relay=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
