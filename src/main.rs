//! Lyrica server and terminal client.

use std::path::PathBuf;
use std::sync::Arc;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lyrica::api::{AppState, create_router};
use lyrica::client::{Credentials, LyricaClient};
use lyrica::config::{DEFAULT_PORT, ServerConfig};
use lyrica::spotify::SpotifyConfig;
use lyrica::sync::{
    DEFAULT_POLL_INTERVAL_MS, Poller, PollerConfig, SessionController, SyncEvent,
};
use lyrica::view::TerminalView;

/// Spotify now-playing display with synced lyrics.
///
/// Without a subcommand the server starts with the `serve` options.
#[derive(Parser)]
#[command(name = "lyrica")]
#[command(about = "Shows the current Spotify track with time-synced lyrics")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve(self.serve))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server (default)
    Serve(ServeArgs),

    /// Follow the current track and print lyrics as they play
    Watch {
        /// Base URL of a running Lyrica server
        #[arg(short, long, default_value = "http://localhost:5000")]
        server: String,

        /// Spotify access token
        #[arg(long, env = "LYRICA_ACCESS_TOKEN", conflicts_with = "redirect_url")]
        access_token: Option<String>,

        /// URL the login callback redirected the browser to
        #[arg(long)]
        redirect_url: Option<String>,

        /// Playback poll interval in milliseconds
        #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
        poll_interval_ms: u64,
    },

    /// Print the Spotify authorization URL
    Login {
        /// Base URL of a running Lyrica server
        #[arg(short, long, default_value = "http://localhost:5000")]
        server: String,
    },
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Server port
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Spotify application client id
    #[arg(long, env = "SPOTIFY_CLIENT_ID", default_value = "")]
    client_id: String,

    /// Spotify application client secret
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    client_secret: String,

    /// OAuth redirect URI registered with Spotify
    #[arg(long, env = "SPOTIFY_REDIRECT_URI", default_value = "")]
    redirect_uri: String,

    /// Serve the built front end (accepts 1/0, yes/no, true/false, on/off)
    #[arg(
        long,
        env = "LYRICA_PRODUCTION",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    production: bool,

    /// Where the browser goes after login
    #[arg(long, env = "CLIENT_URL")]
    client_url: Option<String>,

    /// Directory with the built front end
    #[arg(long, default_value = "client/dist")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyrica=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.into_command() {
        Commands::Serve(args) => run_server(args).await,
        Commands::Watch {
            server,
            access_token,
            redirect_url,
            poll_interval_ms,
        } => run_watch(&server, access_token, redirect_url, poll_interval_ms).await,
        Commands::Login { server } => {
            let client = match LyricaClient::new(server) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Failed to create client: {}", e);
                    std::process::exit(1);
                }
            };
            match client.login_url().await {
                Ok(url) => {
                    println!("Open this URL in a browser to log in:");
                    println!("{}", url);
                }
                Err(e) => {
                    eprintln!("Failed to get login URL: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

async fn run_server(args: ServeArgs) {
    if args.client_id.is_empty() || args.client_secret.is_empty() {
        tracing::warn!("SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_SECRET is not set; login will fail");
    }

    let spotify = SpotifyConfig::new(args.client_id, args.client_secret, args.redirect_uri);
    let mut config = ServerConfig::new(args.port, spotify, args.production);
    if let Some(client_url) = args.client_url {
        config.client_url = client_url;
    }
    config.static_dir = args.static_dir;

    if config.production {
        tracing::info!("Serving front end from {}", config.static_dir.display());
    }

    let port = config.port;
    let state = match AppState::new(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create application state: {}", e);
            std::process::exit(1);
        }
    };
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            tracing::error!("Is another process already using port {}?", port);
            std::process::exit(1);
        }
    };
    tracing::info!("Lyrica server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run_watch(
    server: &str,
    access_token: Option<String>,
    redirect_url: Option<String>,
    poll_interval_ms: u64,
) {
    let credential = match (access_token, redirect_url) {
        (Some(token), _) => token,
        (None, Some(url)) => match Credentials::from_redirect(&url) {
            Ok(creds) => creds.access_token,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        (None, None) => {
            eprintln!("Provide --access-token or --redirect-url. Get one with `lyrica login`.");
            std::process::exit(1);
        }
    };

    let client = match LyricaClient::new(server) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            std::process::exit(1);
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = Poller::with_config(
        client.clone(),
        client,
        tx,
        PollerConfig::with_interval_ms(poll_interval_ms),
    );
    let mut controller = SessionController::new(poller);
    controller.login(credential).await;

    let mut view = TerminalView::new(std::io::stdout());
    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                if let Err(e) = view.handle(&event) {
                    tracing::error!("Failed to write output: {}", e);
                    break;
                }
                if event == SyncEvent::SessionExpired {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    controller.logout().await;
}
