// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! # AWS Exporter
//!
//! Publishes an AWS account's network inventory (regions, VPCs, subnets and
//! their tags) as Prometheus gauges. Every scrape queries EC2 afresh; nothing
//! is kept between scrapes.
//!
//! ## Modules
//!
//! - [`collector`] - scrape orchestration across regions
//! - [`region`] - samples for a single region
//! - [`lister`] - paginated EC2 listings
//! - [`provider`] - the EC2 API seam and its AWS SDK implementation
//! - [`descriptors`] - the published metric families
//! - [`prometheus`] - registry and text exposition
//! - [`http_server`] - the `/metrics` endpoint
//! - [`config`] / [`credentials`] - startup settings

pub mod collector;
pub mod config;
pub mod credentials;
pub mod descriptors;
pub mod error;
pub mod http_server;
pub mod lister;
pub mod prometheus;
pub mod provider;
pub mod region;

pub use collector::Collector;
pub use config::ExporterConfig;
pub use error::{ExporterError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
