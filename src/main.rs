use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use buyerhq_directory::config::AppConfig;
use buyerhq_directory::directory::agents::{
    agent_router, AgentDirectoryService, AgentScoringEngine, InMemoryAgentRepository,
    ScoringConfig,
};
use buyerhq_directory::directory::import::CsvProfileImporter;
use buyerhq_directory::error::AppError;
use buyerhq_directory::telemetry;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "BuyerHQ Directory",
    about = "Run the BuyerHQ agent directory scoring service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a CSV export of agent profiles and print the ranked directory
    Rank(RankArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// CSV export of agent profiles
    #[arg(long)]
    csv: PathBuf,
    /// Number of leaderboard rows to print
    #[arg(long, default_value_t = 20)]
    top: usize,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Rank(args) => run_rank(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let repository = Arc::new(InMemoryAgentRepository::default());
    let service = Arc::new(AgentDirectoryService::new(
        repository,
        ScoringConfig::default(),
    ));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(agent_router(service, config.directory.admin_emails.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "agent directory service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let outcome = CsvProfileImporter::from_path(&args.csv)?;
    let engine = AgentScoringEngine::default();
    let now = Utc::now();

    let mut leaderboard: Vec<_> = outcome
        .profiles
        .iter()
        .map(|profile| {
            let scorecard = engine.score(profile, now);
            let buyerhq = engine.composite(&scorecard, profile);
            (profile, scorecard, buyerhq)
        })
        .collect();

    leaderboard.sort_by(|left, right| {
        right
            .2
            .score
            .cmp(&left.2.score)
            .then_with(|| left.0.id.cmp(&right.0.id))
    });

    println!("BuyerHQ agent leaderboard ({} profiles)", leaderboard.len());
    for (profile, scorecard, buyerhq) in leaderboard.iter().take(args.top) {
        println!(
            "- {} | authority {} ({}) | BuyerHQ {} ({}) | presence {} ({} followers) | {} / {}",
            profile.name,
            scorecard.authority_score,
            scorecard.rank_label.label(),
            buyerhq.score,
            buyerhq.label.label(),
            scorecard.social_presence_tier.label(),
            scorecard.total_followers,
            scorecard.profile_status.label(),
            scorecard.verified.label(),
        );
    }

    if outcome.rejected.is_empty() {
        println!("\nRejected rows: none");
    } else {
        println!("\nRejected rows");
        for rejected in &outcome.rejected {
            for violation in &rejected.violations {
                println!("- row {}: {}", rejected.row, violation);
            }
        }
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
