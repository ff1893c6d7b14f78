//! # amigo
//!
//! Command-line companion for the amigo CTF platform: watch the live
//! scoreboard or challenge feed, submit flags and drive the team management
//! endpoints from a terminal.

mod api;
mod error;
mod render;
#[cfg(test)]
mod test_support;
mod watch;

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use feed::{ChallengeBrowserView, FeedEndpoint, ScoreboardView, SubmitOutcome, ViewState};

use crate::api::ApiClient;
use crate::error::CliError;
use crate::render::Render;
use crate::watch::{WatchOptions, run_watch};


#[derive(Parser, Debug)]
#[command(name = "amigo", about = "amigo CTF platform CLI")]
struct Cli {
    #[arg(long, env = "AMIGO_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Value of the `session` cookie.
    #[arg(long, env = "AMIGO_SESSION")]
    session: Option<String>,

    /// Delay before reopening a closed feed.
    #[arg(long, default_value_t = 3000)]
    reconnect_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow a live feed and print the view after every change.
    Watch(WatchArgs),
    /// Verify a flag for a challenge.
    Submit { tag: String, flag: String },
    /// Reset a challenge instance.
    ResetChallenge { tag: String },
    /// Start or stop a challenge instance.
    ToggleChallenge { tag: String },
    /// Recreate the team's frontend container.
    ResetFrontend,
    Vpn(VpnCommand),
    /// Show the lab network details.
    LabInfo,
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[arg(value_enum)]
    feed: FeedKind,

    /// Exit after the first change.
    #[arg(long, default_value_t = false)]
    once: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FeedKind {
    Scores,
    Challenges,
}

#[derive(Args, Debug)]
struct VpnCommand {
    #[command(subcommand)]
    command: VpnSubcommand,
}

#[derive(Subcommand, Debug)]
enum VpnSubcommand {
    /// List the team's connection slots.
    Status,
    /// Save the WireGuard config of one slot.
    Download {
        conn_id: String,
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let client = || ApiClient::new(&cli.base_url, cli.session.as_deref());

    match cli.command {
        Command::Watch(args) => {
            let options = WatchOptions {
                session: cli.session.clone(),
                reconnect_delay: Duration::from_millis(cli.reconnect_ms),
                once: args.once,
            };
            match args.feed {
                FeedKind::Scores => {
                    watch_feed::<ScoreboardView>(&cli.base_url, FeedEndpoint::Scores, options).await
                }
                FeedKind::Challenges => {
                    watch_feed::<ChallengeBrowserView>(&cli.base_url, FeedEndpoint::ChallengesFrontend, options)
                        .await
                }
            }
        }
        Command::Submit { tag, flag } => {
            let outcome = client()?.submit_flag(&tag, &flag).await?;
            report(feed::submit::VERIFY_PATH, &outcome, feed::submit::SUCCESS_MESSAGE)
        }
        Command::ResetChallenge { tag } => {
            let outcome = client()?.reset_challenge(&tag).await?;
            report(feed::api::RESET_CHALLENGE_PATH, &outcome, "challenge reset")
        }
        Command::ToggleChallenge { tag } => {
            let outcome = client()?.toggle_challenge(&tag).await?;
            report(feed::api::MANAGE_CHALLENGE_PATH, &outcome, "challenge started/stopped")
        }
        Command::ResetFrontend => {
            let outcome = client()?.reset_frontend().await?;
            report(feed::api::RESET_FRONTEND_PATH, &outcome, "frontend reset")
        }
        Command::Vpn(vpn) => run_vpn(&client()?, vpn).await,
        Command::LabInfo => {
            let info = client()?.lab_info().await?;
            println!("vpn: {}", if info.vpn_enabled() { "enabled" } else { "disabled" });
            println!("lab subnet: {}", info.lab_subnet);
            Ok(())
        }
    }
}

async fn watch_feed<V>(base_url: &str, endpoint: FeedEndpoint, options: WatchOptions) -> Result<(), CliError>
where
    V: ViewState + Render + Default,
{
    let url = feed::stream_url(base_url, endpoint)?;
    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_tx.send(true);
        }
    });

    run_watch::<V, _>(url, options, stop_rx, |view| println!("{}", view.render())).await?;
    Ok(())
}

fn report(path: &'static str, outcome: &SubmitOutcome, done: &str) -> Result<(), CliError> {
    match outcome {
        SubmitOutcome::Accepted => {
            println!("{done}");
            Ok(())
        }
        SubmitOutcome::Rejected(message) => Err(CliError::Rejected {
            path,
            message: message.clone(),
        }),
        SubmitOutcome::Ignored => {
            eprintln!("no verdict from {path}");
            Ok(())
        }
    }
}

async fn run_vpn(client: &ApiClient, vpn: VpnCommand) -> Result<(), CliError> {
    match vpn.command {
        VpnSubcommand::Status => {
            for conn in client.vpn_status().await? {
                println!("{}\t{}", conn.conn_id, conn.status);
            }
            Ok(())
        }
        VpnSubcommand::Download { conn_id, output } => {
            let path = match output {
                Some(path) => path,
                None => feed::api::vpn_config_file_name(&conn_id)
                    .ok_or_else(|| CliError::UnknownConnection(conn_id.clone()))?,
            };
            let config = client.vpn_download(&conn_id).await?;
            tokio::fs::write(&path, config)
                .await
                .map_err(|source| CliError::Write { path: path.clone(), source })?;
            tracing::info!(%path, %conn_id, "vpn config saved");
            Ok(())
        }
    }
}
