// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Scrape orchestration
//!
//! One scrape resolves credentials, settles the region set, then runs one
//! task per region. Samples reach the channel region by region as each task
//! finishes; regions interleave in no particular order.
//!
//! Failures never propagate to the caller. A credential or discovery failure
//! ends the scrape with no samples; a failed region is logged and skipped.

use crate::credentials::CredentialSource;
use crate::descriptors::{MetricDesc, Sample, ALL};
use crate::error::Result;
use crate::lister::ResourceLister;
use crate::prometheus::Collect;
use crate::provider::Ec2Api;
use crate::region::collect_region;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinSet;

/// Collects the EC2 network inventory on every scrape
pub struct Collector {
    api: Arc<dyn Ec2Api>,
    credentials: Arc<dyn CredentialSource>,
    /// Explicit allow-list; empty means discover every region
    regions: Vec<String>,
}

impl Collector {
    pub fn new(
        api: Arc<dyn Ec2Api>,
        credentials: Arc<dyn CredentialSource>,
        regions: Vec<String>,
    ) -> Self {
        Self {
            api,
            credentials,
            regions,
        }
    }

    /// Run one scrape, streaming samples into `tx`
    pub async fn collect(&self, tx: &UnboundedSender<Sample>) {
        log::debug!("Collecting metrics…");

        if let Err(e) = self.try_collect(tx).await {
            log::error!("Failed to collect metrics: {}", e);
        }

        log::debug!("Done collecting metrics.");
    }

    /// Run one scrape and return everything it produced
    pub async fn scrape(&self) -> Vec<Sample> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.collect(&tx).await;
        drop(tx);

        let mut samples = Vec::new();
        while let Some(sample) = rx.recv().await {
            samples.push(sample);
        }
        samples
    }

    async fn try_collect(&self, tx: &UnboundedSender<Sample>) -> Result<()> {
        let credentials = self.credentials.resolve()?;
        let regions = self.resolve_regions().await?;

        let mut tasks = JoinSet::new();
        for region in regions {
            let api = Arc::clone(&self.api);
            let account = credentials.access_key_id.clone();
            let tx = tx.clone();

            tasks.spawn(async move {
                let result = collect_region(api.as_ref(), &account, &region)
                    .await
                    .map(|samples| {
                        let count = samples.len();
                        for sample in samples {
                            // Receiver gone means nobody wants this scrape anymore
                            let _ = tx.send(sample);
                        }
                        count
                    });
                (region, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((region, Ok(count))) => {
                    log::debug!("[{}] Collected {} samples.", region, count);
                }
                Ok((region, Err(e))) => {
                    log::error!("[{}] Failed to collect region: {}", region, e);
                }
                Err(e) => {
                    log::error!("Region task aborted: {}", e);
                }
            }
        }

        Ok(())
    }

    async fn resolve_regions(&self) -> Result<Vec<String>> {
        if !self.regions.is_empty() {
            return Ok(self.regions.clone());
        }

        log::debug!("Listing regions…");
        let regions = ResourceLister::new(self.api.as_ref())
            .list_regions()
            .await?;
        log::debug!("Found {} regions.", regions.len());

        Ok(regions.into_iter().map(|r| r.name).collect())
    }
}

#[async_trait]
impl Collect for Collector {
    fn describe(&self) -> Vec<&'static MetricDesc> {
        ALL.to_vec()
    }

    async fn collect(&self, tx: &UnboundedSender<Sample>) {
        Collector::collect(self, tx).await
    }
}
