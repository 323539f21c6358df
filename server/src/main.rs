//! dxlookup: symptom-to-disease lookup service.
//!
//! Usage:
//!   dxlookup serve [--bind 127.0.0.1:8000]
//!   dxlookup predict itching skin_rash nodal_skin_eruptions
//!   dxlookup info "Fungal infection"
//!   dxlookup check
//!
//! Every subcommand accepts `--config <FILE>`; without it the built-in
//! defaults are used.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dxlookup_contracts::error::{DxError, DxResult};
use dxlookup_server::{
    api::{DiseaseInfoResponse, PredictResponse},
    cors_layer, router, AppState, ServiceConfig,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Symptom-to-disease lookup service.
#[derive(Parser)]
#[command(name = "dxlookup", version, about = "Symptom-to-disease lookup service")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve {
        /// Listen address, overriding the configured one.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Predict a disease for the given symptoms and print the result as JSON.
    Predict {
        #[arg(required = true)]
        symptoms: Vec<String>,
    },
    /// Print the metadata for one disease as JSON.
    Info { disease: String },
    /// Load configuration, vocabularies, datasets and the classifier, report
    /// what was loaded, then exit.
    Check,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ServiceConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("dxlookup: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .compact()
        .init();

    let result = match cli.command {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Predict { symptoms } => predict(&config, &symptoms),
        Command::Info { disease } => disease_info(&config, &disease),
        Command::Check => check(&config),
    };

    if let Err(e) = result {
        eprintln!("dxlookup: {}", e);
        std::process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

async fn serve(mut config: ServiceConfig, bind: Option<String>) -> DxResult<()> {
    if let Some(bind) = bind {
        config.bind = bind;
    }
    let addr = config.bind_addr()?;
    let cors = cors_layer(&config.cors)?;
    let state = AppState::load(&config)?;
    let app = router(state, cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| DxError::ConfigError {
            reason: format!("failed to bind {}: {}", addr, e),
        })?;
    info!(%addr, "dxlookup listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DxError::ConfigError {
            reason: format!("server error: {}", e),
        })?;
    info!("dxlookup stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

fn predict(config: &ServiceConfig, symptoms: &[String]) -> DxResult<()> {
    let state = AppState::load(config)?;
    let diagnosis = state.service.diagnose(symptoms)?;
    print_json(&PredictResponse::from(diagnosis))
}

fn disease_info(config: &ServiceConfig, disease: &str) -> DxResult<()> {
    let state = AppState::load(config)?;
    let info = state.service.disease_info(disease)?;
    print_json(&DiseaseInfoResponse::new(disease.to_string(), info))
}

fn check(config: &ServiceConfig) -> DxResult<()> {
    let state = AppState::load(config)?;
    let predictor = state.service.predictor();
    println!("symptoms:   {}", predictor.symptoms().len());
    println!("diseases:   {}", predictor.diseases().len());
    for (table, rows) in &state.datasets {
        println!("table:      {} ({} rows)", table, rows);
    }
    match predictor.classifier_name() {
        Some(name) => {
            println!("classifier: {}", name);
            if let Some(digest) = &state.model.sha256 {
                println!("sha256:     {}", digest);
            }
            Ok(())
        }
        None => Err(DxError::ClassifierUnavailable {
            reason: predictor
                .unavailable_reason()
                .unwrap_or("unknown")
                .to_string(),
        }),
    }
}

fn print_json<T: Serialize>(value: &T) -> DxResult<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| DxError::OutputError {
        reason: format!("failed to encode output as JSON: {}", e),
    })?;
    println!("{}", out);
    Ok(())
}
