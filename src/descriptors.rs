// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Metric descriptor table
//!
//! The five gauge families the exporter publishes. Every family leads with
//! `account` and `region`; samples are presence indicators with value 1.

use crate::error::{ExporterError, Result};

/// Static description of one metric family
#[derive(Debug, PartialEq, Eq)]
pub struct MetricDesc {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
}

pub static REGION_INFO: MetricDesc = MetricDesc {
    name: "aws_region",
    help: "Metadata regarding a region",
    labels: &["account", "region"],
};

pub static VPC_INFO: MetricDesc = MetricDesc {
    name: "aws_vpc",
    help: "Metadata regarding a VPC",
    labels: &["account", "region", "vpc_id"],
};

pub static VPC_TAG: MetricDesc = MetricDesc {
    name: "aws_vpc_tag",
    help: "Metadata regarding a VPC tag",
    labels: &["account", "region", "vpc_id", "tag_key", "tag_value"],
};

pub static SUBNET_INFO: MetricDesc = MetricDesc {
    name: "aws_subnet",
    help: "Metadata regarding a subnet",
    labels: &["account", "region", "vpc_id", "subnet_id"],
};

pub static SUBNET_TAG: MetricDesc = MetricDesc {
    name: "aws_subnet_tag",
    help: "Metadata regarding a subnet tag",
    labels: &[
        "account",
        "region",
        "vpc_id",
        "subnet_id",
        "tag_key",
        "tag_value",
    ],
};

/// All families, in exposition order
pub static ALL: [&MetricDesc; 5] = [
    &REGION_INFO,
    &VPC_INFO,
    &VPC_TAG,
    &SUBNET_INFO,
    &SUBNET_TAG,
];

/// One gauge sample, label values in descriptor order
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub desc: &'static MetricDesc,
    pub label_values: Vec<String>,
    pub value: f64,
}

impl Sample {
    pub fn new(desc: &'static MetricDesc, value: f64, label_values: Vec<String>) -> Result<Self> {
        if label_values.len() != desc.labels.len() {
            return Err(ExporterError::LabelCardinality {
                family: desc.name,
                expected: desc.labels.len(),
                got: label_values.len(),
            });
        }
        Ok(Self {
            desc,
            label_values,
            value,
        })
    }

    /// Sample with the constant presence value 1
    pub fn presence(desc: &'static MetricDesc, label_values: &[&str]) -> Result<Self> {
        Self::new(
            desc,
            1.0,
            label_values.iter().map(|v| v.to_string()).collect(),
        )
    }

    /// Value of the named label
    pub fn label(&self, name: &str) -> Option<&str> {
        self.desc
            .labels
            .iter()
            .position(|l| *l == name)
            .and_then(|i| self.label_values.get(i))
            .map(String::as_str)
    }
}
