// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! EC2 client backed by the AWS SDK

use super::{Ec2Api, Page, Region, Subnet, Tag, Vpc};
use crate::credentials::Credentials;
use crate::error::{ExporterError, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_ec2::config::{Credentials as SdkCredentials, Region as SdkRegion};
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::Client;

/// EC2 API over static credentials
///
/// The SDK owns retries and throttling. Each call builds a client scoped to
/// the requested region from one shared [`SdkConfig`].
pub struct AwsEc2 {
    sdk_config: SdkConfig,
    discovery_region: String,
}

impl AwsEc2 {
    pub async fn new(credentials: &Credentials, discovery_region: &str) -> Self {
        let provider = SdkCredentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            "aws-exporter",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(SdkRegion::new(discovery_region.to_string()))
            .credentials_provider(provider)
            .load()
            .await;

        Self {
            sdk_config,
            discovery_region: discovery_region.to_string(),
        }
    }

    fn client(&self, region: &str) -> Client {
        let config = aws_sdk_ec2::config::Builder::from(&self.sdk_config)
            .region(SdkRegion::new(region.to_string()))
            .build();
        Client::from_conf(config)
    }
}

fn convert_tags(tags: &[aws_sdk_ec2::types::Tag]) -> Vec<Tag> {
    tags.iter()
        .map(|t| Tag::new(t.key().unwrap_or_default(), t.value().unwrap_or_default()))
        .collect()
}

#[async_trait]
impl Ec2Api for AwsEc2 {
    // DescribeRegions is not paginated; the whole list comes back at once.
    async fn describe_regions(
        &self,
        _page_size: i32,
        _token: Option<String>,
    ) -> Result<Page<Region>> {
        let output = self
            .client(&self.discovery_region)
            .describe_regions()
            .send()
            .await
            .map_err(|e| {
                ExporterError::provider(
                    "DescribeRegions",
                    &self.discovery_region,
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        let regions = output
            .regions()
            .iter()
            .filter_map(|r| r.region_name())
            .map(|name| Region {
                name: name.to_string(),
            })
            .collect();

        Ok(Page::last(regions))
    }

    async fn describe_vpcs(
        &self,
        region: &str,
        page_size: i32,
        token: Option<String>,
    ) -> Result<Page<Vpc>> {
        let output = self
            .client(region)
            .describe_vpcs()
            .max_results(page_size)
            .set_next_token(token)
            .send()
            .await
            .map_err(|e| {
                ExporterError::provider("DescribeVpcs", region, DisplayErrorContext(&e).to_string())
            })?;

        let vpcs = output
            .vpcs()
            .iter()
            .filter_map(|v| {
                Some(Vpc {
                    id: v.vpc_id()?.to_string(),
                    tags: convert_tags(v.tags()),
                })
            })
            .collect();

        Ok(Page::new(vpcs, output.next_token().map(str::to_string)))
    }

    async fn describe_subnets(
        &self,
        region: &str,
        page_size: i32,
        token: Option<String>,
    ) -> Result<Page<Subnet>> {
        let output = self
            .client(region)
            .describe_subnets()
            .max_results(page_size)
            .set_next_token(token)
            .send()
            .await
            .map_err(|e| {
                ExporterError::provider(
                    "DescribeSubnets",
                    region,
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        let subnets = output
            .subnets()
            .iter()
            .filter_map(|s| {
                Some(Subnet {
                    id: s.subnet_id()?.to_string(),
                    vpc_id: s.vpc_id().unwrap_or_default().to_string(),
                    tags: convert_tags(s.tags()),
                })
            })
            .collect();

        Ok(Page::new(subnets, output.next_token().map(str::to_string)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_tags_keeps_order_and_blanks() {
        let tags = vec![
            aws_sdk_ec2::types::Tag::builder()
                .key("Name")
                .value("main")
                .build(),
            aws_sdk_ec2::types::Tag::builder().key("empty").build(),
        ];
        let converted = convert_tags(&tags);
        assert_eq!(
            converted,
            vec![Tag::new("Name", "main"), Tag::new("empty", "")]
        );
    }
}
