use std::{
    fs::OpenOptions,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    process::exit,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use learnhub_rs::{AppState, PayoutPolicy, build_router, graceful_shutdown, logging_middleware};

/// The REST API server for the LearnHub e-learning platform.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The address to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory containing the browser dashboard.
    #[arg(long, default_value = "frontend")]
    frontend_dir: PathBuf,

    /// Directory containing an SSL certificate `cert.pem` and key `key.pem`.
    ///
    /// The server uses plain HTTP when this is not set.
    #[arg(long)]
    cert_path: Option<PathBuf>,

    /// File that debug logs are appended to.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,

    /// The share of each payment paid out to the owner.
    #[arg(long, default_value_t = PayoutPolicy::DEFAULT_OWNER_SHARE)]
    owner_share: f64,

    /// The share of each payment kept in the growth fund.
    #[arg(long, default_value_t = PayoutPolicy::DEFAULT_GROWTH_SHARE)]
    growth_share: f64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let payout_policy = match PayoutPolicy::new(args.owner_share, args.growth_share) {
        Ok(policy) => policy,
        Err(error) => {
            tracing::error!("{error}");
            exit(1);
        }
    };

    let conn = Connection::open(&args.db_path).unwrap_or_else(|error| {
        tracing::error!("Could not open database at {}: {error}", args.db_path);
        exit(1);
    });

    let app_state = AppState::new(conn, payout_policy).unwrap_or_else(|error| {
        tracing::error!("Could not initialize database: {error}");
        exit(1);
    });

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state, &args.frontend_dir)
        .layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!(
        "Payouts split {} to the owner and {} to the growth fund",
        payout_policy.owner_share(),
        payout_policy.growth_share()
    );

    match args.cert_path {
        Some(cert_path) => {
            let tls_config =
                RustlsConfig::from_pem_file(cert_path.join("cert.pem"), cert_path.join("key.pem"))
                    .await
                    .expect("Could not open TLS certificates.");

            tracing::info!("HTTPS server listening on {}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(router.into_make_service())
                .await
                .expect("Server error");
        }
        None => {
            tracing::info!("HTTP server listening on {}", addr);
            axum_server::bind(addr)
                .handle(handle)
                .serve(router.into_make_service())
                .await
                .expect("Server error");
        }
    }
}

fn setup_logging(log_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but the handlers log
        // their own errors, so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
