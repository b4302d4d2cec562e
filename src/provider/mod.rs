// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Upstream EC2 inventory API
//!
//! [`Ec2Api`] is the seam between the collector and the cloud: one call per
//! page, each returning a [`Page`] with an optional continuation token.
//! [`AwsEc2`] talks to the real service through the AWS SDK.

mod aws;
#[cfg(test)]
pub(crate) mod fake;

pub use aws::AwsEc2;

use crate::error::Result;
use async_trait::async_trait;

/// A region the account can see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
}

/// Key/value annotation on a VPC or subnet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Virtual private cloud
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vpc {
    pub id: String,
    /// Tags in the order the API returned them
    pub tags: Vec<Tag>,
}

/// Subnet inside a VPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    pub id: String,
    pub vpc_id: String,
    pub tags: Vec<Tag>,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Present while more pages remain
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Build a page; an empty token counts as no token
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self {
            items,
            next_token: next_token.filter(|t| !t.is_empty()),
        }
    }

    /// The final page of a listing
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }
}

/// Paginated EC2 read operations
#[async_trait]
pub trait Ec2Api: Send + Sync {
    /// List regions; not scoped to any region
    async fn describe_regions(&self, page_size: i32, token: Option<String>)
        -> Result<Page<Region>>;

    async fn describe_vpcs(
        &self,
        region: &str,
        page_size: i32,
        token: Option<String>,
    ) -> Result<Page<Vpc>>;

    async fn describe_subnets(
        &self,
        region: &str,
        page_size: i32,
        token: Option<String>,
    ) -> Result<Page<Subnet>>;
}
