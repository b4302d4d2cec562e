// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Prometheus registry and text exposition
//!
//! Collectors register with a [`Registry`]; each scrape gathers their samples
//! into [`MetricFamily`] groups and renders them with `# HELP` and `# TYPE`
//! annotations.
//!
//! # Examples
//!
//! ```no_run
//! use awsexlib::prometheus::{encode, Registry};
//! # async fn demo(collector: std::sync::Arc<awsexlib::collector::Collector>) -> awsexlib::Result<()> {
//! let mut registry = Registry::new();
//! registry.register(collector)?;
//!
//! let output = encode(&registry.gather().await);
//! // # HELP aws_region Metadata regarding a region
//! // # TYPE aws_region gauge
//! // aws_region{account="AKIA...",region="us-east-1"} 1
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

use crate::descriptors::{MetricDesc, Sample};
use crate::error::{ExporterError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};

/// Content type for the text exposition format
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Prometheus metric type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Gauge,
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gauge => write!(f, "gauge"),
        }
    }
}

/// A single metric sample with its labels in declaration order
#[derive(Debug, Clone)]
pub struct MetricSample {
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

impl From<Sample> for MetricSample {
    fn from(sample: Sample) -> Self {
        Self {
            labels: sample
                .desc
                .labels
                .iter()
                .map(|l| l.to_string())
                .zip(sample.label_values)
                .collect(),
            value: sample.value,
        }
    }
}

/// A complete metric family with metadata and samples
#[derive(Debug, Clone)]
pub struct MetricFamily {
    pub name: String,
    pub help: String,
    pub metric_type: MetricType,
    pub samples: Vec<MetricSample>,
}

impl MetricFamily {
    /// Empty gauge family for a descriptor
    pub fn gauge(desc: &MetricDesc) -> Self {
        Self {
            name: desc.name.to_string(),
            help: desc.help.to_string(),
            metric_type: MetricType::Gauge,
            samples: Vec::new(),
        }
    }

    /// Format this metric family in Prometheus exposition format
    pub fn format(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# HELP {} {}\n", self.name, escape_help(&self.help)));
        out.push_str(&format!("# TYPE {} {}\n", self.name, self.metric_type));

        for sample in &self.samples {
            if sample.labels.is_empty() {
                out.push_str(&format!("{} {}\n", self.name, format_value(sample.value)));
            } else {
                let label_str: Vec<String> = sample
                    .labels
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
                    .collect();
                out.push_str(&format!(
                    "{}{{{}}} {}\n",
                    self.name,
                    label_str.join(","),
                    format_value(sample.value)
                ));
            }
        }

        out
    }
}

/// Source of samples for a registry
#[async_trait]
pub trait Collect: Send + Sync {
    /// Families this collector may emit
    fn describe(&self) -> Vec<&'static MetricDesc>;

    /// Emit the current samples into `tx`
    async fn collect(&self, tx: &UnboundedSender<Sample>);
}

/// Set of collectors gathered together on each scrape
#[derive(Default)]
pub struct Registry {
    collectors: Vec<Arc<dyn Collect>>,
    descriptors: Vec<&'static MetricDesc>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collector; a family may only be described once
    pub fn register(&mut self, collector: Arc<dyn Collect>) -> Result<()> {
        let described = collector.describe();
        for desc in &described {
            if self.descriptors.iter().any(|d| d.name == desc.name) {
                return Err(ExporterError::DuplicateDescriptor(desc.name.to_string()));
            }
        }
        self.descriptors.extend(described);
        self.collectors.push(collector);
        Ok(())
    }

    /// Families known to this registry
    pub fn descriptors(&self) -> &[&'static MetricDesc] {
        &self.descriptors
    }

    /// Run every collector and group the samples into families
    ///
    /// Families come back in registration order; empty ones are left out.
    pub async fn gather(&self) -> Vec<MetricFamily> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for collector in &self.collectors {
            collector.collect(&tx).await;
        }
        drop(tx);

        let mut families: Vec<MetricFamily> =
            self.descriptors.iter().map(|d| MetricFamily::gauge(d)).collect();
        let index: HashMap<&str, usize> = self
            .descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name, i))
            .collect();

        while let Some(sample) = rx.recv().await {
            match index.get(sample.desc.name) {
                Some(&i) => families[i].samples.push(sample.into()),
                None => log::warn!("Dropping sample for undescribed metric {}", sample.desc.name),
            }
        }

        families.retain(|f| !f.samples.is_empty());
        families
    }
}

/// Render families in the text exposition format
pub fn encode(families: &[MetricFamily]) -> String {
    let mut output = String::with_capacity(4096);
    for family in families {
        output.push_str(&family.format());
    }
    output
}

/// Escape a label value for Prometheus format
fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format a float value for Prometheus (special handling for NaN, Inf)
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else if value == value.floor() && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
