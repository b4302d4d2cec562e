// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Scripted in-memory EC2 API for tests
//!
//! Pages are served in order; the continuation token is the index of the
//! next page. Every request is recorded so tests can count calls.

use super::{Ec2Api, Page, Region, Subnet, Vpc};
use crate::error::{ExporterError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: &'static str,
    pub region: String,
    pub token: Option<String>,
}

#[derive(Default)]
pub struct FakeEc2 {
    regions: Vec<Vec<Region>>,
    vpcs: HashMap<String, Vec<Vec<Vpc>>>,
    subnets: HashMap<String, Vec<Vec<Subnet>>>,
    failures: HashSet<(&'static str, String)>,
    calls: Mutex<Vec<Call>>,
}

impl FakeEc2 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region_pages(mut self, pages: Vec<Vec<&str>>) -> Self {
        self.regions = pages
            .into_iter()
            .map(|p| {
                p.into_iter()
                    .map(|name| Region {
                        name: name.to_string(),
                    })
                    .collect()
            })
            .collect();
        self
    }

    pub fn with_vpc_pages(mut self, region: &str, pages: Vec<Vec<Vpc>>) -> Self {
        self.vpcs.insert(region.to_string(), pages);
        self
    }

    pub fn with_subnet_pages(mut self, region: &str, pages: Vec<Vec<Subnet>>) -> Self {
        self.subnets.insert(region.to_string(), pages);
        self
    }

    /// Make every call of `operation` in `region` fail
    pub fn failing(mut self, operation: &'static str, region: &str) -> Self {
        self.failures.insert((operation, region.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn serve<T: Clone>(
        &self,
        operation: &'static str,
        region: &str,
        pages: Option<&Vec<Vec<T>>>,
        token: Option<String>,
    ) -> Result<Page<T>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Call {
                operation,
                region: region.to_string(),
                token: token.clone(),
            });
        }

        if self.failures.contains(&(operation, region.to_string())) {
            return Err(ExporterError::provider(operation, region, "injected failure"));
        }

        let index = match token {
            Some(t) => t
                .parse::<usize>()
                .map_err(|_| ExporterError::provider(operation, region, "bad token"))?,
            None => 0,
        };

        let pages = match pages {
            Some(p) if !p.is_empty() => p,
            _ => return Ok(Page::last(Vec::new())),
        };

        let items = pages
            .get(index)
            .cloned()
            .ok_or_else(|| ExporterError::provider(operation, region, "token out of range"))?;
        let next = (index + 1 < pages.len()).then(|| (index + 1).to_string());
        Ok(Page::new(items, next))
    }
}

#[async_trait]
impl Ec2Api for FakeEc2 {
    async fn describe_regions(
        &self,
        _page_size: i32,
        token: Option<String>,
    ) -> Result<Page<Region>> {
        self.serve("DescribeRegions", "", Some(&self.regions), token)
    }

    async fn describe_vpcs(
        &self,
        region: &str,
        _page_size: i32,
        token: Option<String>,
    ) -> Result<Page<Vpc>> {
        self.serve("DescribeVpcs", region, self.vpcs.get(region), token)
    }

    async fn describe_subnets(
        &self,
        region: &str,
        _page_size: i32,
        token: Option<String>,
    ) -> Result<Page<Subnet>> {
        self.serve("DescribeSubnets", region, self.subnets.get(region), token)
    }
}

pub fn vpc(id: &str, tags: &[(&str, &str)]) -> Vpc {
    Vpc {
        id: id.to_string(),
        tags: tags.iter().map(|(k, v)| super::Tag::new(*k, *v)).collect(),
    }
}

pub fn subnet(id: &str, vpc_id: &str, tags: &[(&str, &str)]) -> Subnet {
    Subnet {
        id: id.to_string(),
        vpc_id: vpc_id.to_string(),
        tags: tags.iter().map(|(k, v)| super::Tag::new(*k, *v)).collect(),
    }
}
