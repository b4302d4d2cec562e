// SPDX-License-Identifier: AGPL-3.0-or-later
//! Benchmark for text exposition.
//!
//! Renders a large synthetic inventory (many VPCs and subnets, a few tags
//! each) the way a scrape of a busy account would.

use awsexlib::descriptors::{Sample, ALL, SUBNET_INFO, SUBNET_TAG, VPC_INFO, VPC_TAG};
use awsexlib::prometheus::{encode, MetricFamily};
use criterion::{criterion_group, criterion_main, Criterion};

fn inventory() -> Vec<MetricFamily> {
    let mut families: Vec<MetricFamily> = ALL.iter().map(|d| MetricFamily::gauge(d)).collect();
    let push = |families: &mut Vec<MetricFamily>, sample: Sample| {
        if let Some(f) = families.iter_mut().find(|f| f.name == sample.desc.name) {
            f.samples.push(sample.into());
        }
    };

    for v in 0..200 {
        let vpc = format!("vpc-{:08x}", v);
        push(
            &mut families,
            Sample::presence(&VPC_INFO, &["AKIABENCH", "us-east-1", &vpc]).unwrap(),
        );
        push(
            &mut families,
            Sample::presence(&VPC_TAG, &["AKIABENCH", "us-east-1", &vpc, "Name", "main \"net\""])
                .unwrap(),
        );
        for s in 0..6 {
            let subnet = format!("subnet-{:08x}", v * 10 + s);
            push(
                &mut families,
                Sample::presence(&SUBNET_INFO, &["AKIABENCH", "us-east-1", &vpc, &subnet]).unwrap(),
            );
            push(
                &mut families,
                Sample::presence(
                    &SUBNET_TAG,
                    &["AKIABENCH", "us-east-1", &vpc, &subnet, "tier", "private"],
                )
                .unwrap(),
            );
        }
    }
    families
}

fn bench_encode(c: &mut Criterion) {
    let families = inventory();
    c.bench_function("encode_inventory", |b| {
        b.iter(|| encode(&families));
    });
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
