// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Error types for AWS Exporter

use std::io;
use thiserror::Error;

/// Result type alias for exporter operations
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Main error type for AWS Exporter
#[derive(Error, Debug)]
pub enum ExporterError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Required credentials were not supplied at startup
    #[error("{0}")]
    MissingCredentials(String),

    /// Credentials could not be resolved for a scrape
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// An upstream page request failed
    #[error("{operation} failed in region {region}: {message}")]
    Provider {
        operation: &'static str,
        region: String,
        message: String,
    },

    /// A listing did not terminate within the page limit
    #[error("{operation} in region {region} exceeded {pages} pages")]
    Pagination {
        operation: &'static str,
        region: String,
        pages: usize,
    },

    /// A sample was built with the wrong number of label values
    #[error("Metric {family} expects {expected} label values, got {got}")]
    LabelCardinality {
        family: &'static str,
        expected: usize,
        got: usize,
    },

    /// Two collectors describe the same metric family
    #[error("Duplicate metric descriptor: {0}")]
    DuplicateDescriptor(String),
}

impl ExporterError {
    /// Shorthand for a failed upstream call
    pub fn provider(
        operation: &'static str,
        region: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            operation,
            region: region.into(),
            message: message.into(),
        }
    }
}
