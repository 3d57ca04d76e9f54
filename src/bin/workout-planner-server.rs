// ABOUTME: Server binary for the Workout Planner API
// ABOUTME: Initializes logging, loads configuration, builds the LLM provider, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Planner Server Binary
//!
//! Starts the HTTP API that turns workout, swim, stretch, and strength
//! requests into LLM-generated plans.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use workout_planner::{
    config::ServerConfig, constants::endpoints, logging, resources::ServerResources, server,
};

#[derive(Parser)]
#[command(name = "workout-planner-server")]
#[command(about = "Workout Planner - LLM-generated workout, swim, stretch and strength plans")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env may carry RUST_LOG and LOG_FORMAT, so load it before the subscriber
    dotenvy::dotenv().ok();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    info!("Starting Workout Planner API");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config)?);
    info!(
        provider = resources.provider.display_name(),
        model = resources.model(),
        structured_output = resources.plans.uses_structured_output(),
        "LLM provider initialized"
    );

    display_available_endpoints(&resources.config.host, resources.config.http_port);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(host: &str, port: u16) {
    info!("=== Available API Endpoints ===");
    info!("Plan Generation:");
    info!("   Workout:           POST http://{host}:{port}{}", endpoints::GENERATE_WORKOUT);
    info!("   Swim:              POST http://{host}:{port}{}", endpoints::GENERATE_SWIM);
    info!("   Stretch:           POST http://{host}:{port}{}", endpoints::GENERATE_STRETCH);
    info!("   Weight Lifting:    POST http://{host}:{port}{}", endpoints::GENERATE_STRENGTH);
    info!("   Plan Catalog:      GET  http://{host}:{port}{}", endpoints::PLAN_CATALOG);
    info!("Chat:");
    info!("   Chat:              POST http://{host}:{port}{}", endpoints::CHAT);
    info!("Monitoring:");
    info!("   Health Check:      GET  http://{host}:{port}{}", endpoints::HEALTH);
    info!("   Readiness:         GET  http://{host}:{port}{}", endpoints::READY);
    info!("=== End of Endpoint List ===");
}
