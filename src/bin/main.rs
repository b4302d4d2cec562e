// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! AWS Exporter binary (aws-exporter)

use awsexlib::config::parse_regions;
use awsexlib::credentials::{Credentials, StaticCredentials};
use awsexlib::http_server::HttpServer;
use awsexlib::prometheus::Registry;
use awsexlib::provider::AwsEc2;
use awsexlib::{Collector, ExporterConfig};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "aws-exporter")]
#[command(about = "Exports AWS regions, VPCs, subnets and their tags as Prometheus metrics", long_about = None)]
#[command(version)]
struct Cli {
    /// AWS access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    access_key_id: Option<String>,

    /// AWS secret key
    #[arg(long, env = "AWS_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Comma-separated list of regions to scan (if empty, all regions are scanned)
    #[arg(long)]
    regions: Option<String>,

    /// Address and port to listen on
    #[arg(long)]
    listen: Option<String>,

    /// Region used to discover the region list
    #[arg(long)]
    discovery_region: Option<String>,

    /// Enable more verbose logging
    #[arg(long)]
    debug: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    print_sample_config: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.print_sample_config {
        print!("{}", ExporterConfig::sample_toml());
        return;
    }

    let config = build_config(&cli);
    let debug = cli.debug || config.as_ref().map(|c| c.debug).unwrap_or(false);
    init_logging(debug);

    let config = match config.and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(config)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// File, then environment, then flags
fn build_config(cli: &Cli) -> awsexlib::Result<ExporterConfig> {
    let mut config = match &cli.config {
        Some(path) => ExporterConfig::from_toml_file(&path.to_string_lossy())?,
        None => ExporterConfig::default(),
    };
    config.apply_env();

    if let Some(v) = &cli.access_key_id {
        config.access_key_id = v.clone();
    }
    if let Some(v) = &cli.secret_key {
        config.secret_key = v.clone();
    }
    if let Some(v) = &cli.regions {
        config.regions = parse_regions(v);
    }
    if let Some(v) = &cli.listen {
        config.listen = v.clone();
    }
    if let Some(v) = &cli.discovery_region {
        config.discovery_region = v.clone();
    }
    config.debug |= cli.debug;

    Ok(config)
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Utc::now().format("%a, %d %b %Y %H:%M:%S GMT"),
                record.level(),
                record.args()
            )
        })
        .init();
}

async fn run(config: ExporterConfig) -> awsexlib::Result<()> {
    let credentials = Credentials::new(config.access_key_id.clone(), config.secret_key.clone());
    let api = AwsEc2::new(&credentials, &config.discovery_region).await;

    if config.regions.is_empty() {
        log::info!("No regions configured, scanning every region");
    } else {
        log::info!("Scanning regions: {}", config.regions.join(", "));
    }

    log::info!("Preparing metrics collector…");
    let collector = Collector::new(
        Arc::new(api),
        Arc::new(StaticCredentials::new(
            credentials.access_key_id,
            credentials.secret_access_key,
        )),
        config.regions.clone(),
    );

    let mut registry = Registry::new();
    registry.register(Arc::new(collector))?;

    let addr = config.socket_addr()?;
    let server = HttpServer::bind(addr, Arc::new(registry)).await?;
    log::info!("Starting server on {}…", addr);

    server
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
}
