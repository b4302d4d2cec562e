// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Per-region collection

use crate::descriptors::{Sample, REGION_INFO, SUBNET_INFO, SUBNET_TAG, VPC_INFO, VPC_TAG};
use crate::error::Result;
use crate::lister::ResourceLister;
use crate::provider::Ec2Api;

/// Produce every sample for one region
///
/// Order: the region sample, then each VPC followed by its tags, then each
/// subnet followed by its tags. Any listing failure discards the whole region.
pub async fn collect_region(api: &dyn Ec2Api, account: &str, region: &str) -> Result<Vec<Sample>> {
    let lister = ResourceLister::new(api);
    let mut samples = vec![Sample::presence(&REGION_INFO, &[account, region])?];

    log::debug!("[{}] Listing VPCs…", region);
    let vpcs = lister.list_vpcs(region).await?;
    log::debug!("[{}] Found {} VPCs.", region, vpcs.len());

    for vpc in &vpcs {
        samples.push(Sample::presence(&VPC_INFO, &[account, region, &vpc.id])?);
        for tag in &vpc.tags {
            samples.push(Sample::presence(
                &VPC_TAG,
                &[account, region, &vpc.id, &tag.key, &tag.value],
            )?);
        }
    }

    log::debug!("[{}] Listing subnets…", region);
    let subnets = lister.list_subnets(region).await?;
    log::debug!("[{}] Found {} subnets.", region, subnets.len());

    for subnet in &subnets {
        samples.push(Sample::presence(
            &SUBNET_INFO,
            &[account, region, &subnet.vpc_id, &subnet.id],
        )?);
        for tag in &subnet.tags {
            samples.push(Sample::presence(
                &SUBNET_TAG,
                &[
                    account,
                    region,
                    &subnet.vpc_id,
                    &subnet.id,
                    &tag.key,
                    &tag.value,
                ],
            )?);
        }
    }

    Ok(samples)
}
