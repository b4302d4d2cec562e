// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Paginated resource listing
//!
//! Each listing follows continuation tokens until a page comes back without
//! one. A failed page aborts the listing; nothing partial is returned.

use crate::error::{ExporterError, Result};
use crate::provider::{Ec2Api, Page, Region, Subnet, Vpc};
use std::future::Future;

/// Resources requested per page
pub const PAGE_SIZE: i32 = 50;

/// Upper bound on pages per listing
pub const MAX_PAGES: usize = 10_000;

/// Lists complete resource sets from an [`Ec2Api`]
pub struct ResourceLister<'a> {
    api: &'a dyn Ec2Api,
    max_pages: usize,
}

impl<'a> ResourceLister<'a> {
    pub fn new(api: &'a dyn Ec2Api) -> Self {
        Self {
            api,
            max_pages: MAX_PAGES,
        }
    }

    /// Override the page bound
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Every region the account can see
    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        paginate("DescribeRegions", "", self.max_pages, |token| {
            self.api.describe_regions(PAGE_SIZE, token)
        })
        .await
    }

    pub async fn list_vpcs(&self, region: &str) -> Result<Vec<Vpc>> {
        paginate("DescribeVpcs", region, self.max_pages, |token| {
            self.api.describe_vpcs(region, PAGE_SIZE, token)
        })
        .await
    }

    pub async fn list_subnets(&self, region: &str) -> Result<Vec<Subnet>> {
        paginate("DescribeSubnets", region, self.max_pages, |token| {
            self.api.describe_subnets(region, PAGE_SIZE, token)
        })
        .await
    }
}

async fn paginate<T, F, Fut>(
    operation: &'static str,
    region: &str,
    max_pages: usize,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut token = None;

    for _ in 0..max_pages {
        let page = fetch(token.take()).await?;
        items.extend(page.items);

        match page.next_token {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }

    Err(ExporterError::Pagination {
        operation,
        region: region.to_string(),
        pages: max_pages,
    })
}
