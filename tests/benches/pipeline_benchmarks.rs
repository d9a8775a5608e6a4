//! # Fortifier Pipeline Benchmarks
//!
//! Cost of the guard checks as the caller-bounded sets grow:
//!
//! | Path | Expected cost |
//! |------|---------------|
//! | `check_transfer` | O(log n) in list and quarantine size |
//! | `authorize_transfer` | `check_transfer` + one window update |
//! | `approve_proposal` | O(log n) in approvers |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ft_06_fortifier::{Fortifier, FortifierConfig};
use shared_types::{CallContext, Principal, RoleTag};
use std::time::Duration;

fn deploy(list_size: usize) -> Fortifier {
    let config = FortifierConfig {
        max_list_entries: list_size.max(1),
        max_quarantine_entries: list_size.max(1),
        ..FortifierConfig::default()
    };
    let (mut fortifier, _bus) = Fortifier::with_default_bus(Principal::new("deployer"), config)
        .expect("deploy");
    let owner = CallContext::new("deployer", 1);
    fortifier
        .set_spend_cap(&owner, u128::MAX, 1_000)
        .expect("cap");
    for i in 0..list_size {
        fortifier
            .deny_recipient(&owner, Principal::new(format!("denied_{i}")))
            .expect("deny");
        fortifier
            .quarantine_recipient(&owner, Principal::new(format!("flagged_{i}")), "bench", 5)
            .expect("quarantine");
    }
    fortifier
}

// ============================================================================
// TRANSFER PIPELINE
// ============================================================================

fn bench_check_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("ft-06-check-transfer");
    group.measurement_time(Duration::from_secs(5));

    for size in [0usize, 16, 256] {
        let fortifier = deploy(size);
        let ctx = CallContext::new("vault", 2);
        let recipient = Principal::new("wallet_2");

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("list_size", size), &size, |b, _| {
            b.iter(|| black_box(fortifier.check_transfer(&ctx, &recipient, 1_000)))
        });
    }
    group.finish();
}

fn bench_authorize_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("ft-06-authorize-transfer");
    let mut fortifier = deploy(64);
    let ctx = CallContext::new("vault", 2);
    let recipient = Principal::new("wallet_2");

    group.bench_function("permitted", |b| {
        b.iter(|| black_box(fortifier.authorize_transfer(&ctx, &recipient, 1)))
    });
    group.finish();
}

// ============================================================================
// GOVERNANCE
// ============================================================================

fn bench_propose_and_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("ft-05-governance");

    group.bench_function("propose_approve_execute", |b| {
        b.iter_batched(
            || {
                let (mut fortifier, _bus) = Fortifier::with_default_bus(
                    Principal::new("deployer"),
                    FortifierConfig::default(),
                )
                .expect("deploy");
                let owner = CallContext::new("deployer", 1);
                fortifier
                    .add_approver(&owner, Principal::new("wallet_1"))
                    .expect("approver");
                fortifier
            },
            |mut fortifier| {
                let owner = CallContext::new("deployer", 2);
                let id = fortifier
                    .propose_signer_change(&owner, RoleTag::Owner, Principal::new("wallet_9"))
                    .expect("propose");
                fortifier.approve_proposal(&owner, id).expect("approve");
                let outcome = fortifier
                    .approve_proposal(&CallContext::new("wallet_1", 2), id)
                    .expect("execute");
                black_box(outcome)
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_check_transfer,
    bench_authorize_transfer,
    bench_propose_and_execute
);
criterion_main!(benches);
