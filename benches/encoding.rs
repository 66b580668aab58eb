//! Benchmarks for order serialization and ID derivation.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- order_id
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::thread;

use dex_orders::{
    validate_order, AccountId, CancelOrder, CoinId, Commitment, InstantOrder, Order, OrderId,
    OrderStatus, OrderType, Prefix, Side, Trade,
};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn make_instant(coins: usize) -> Order {
    let prefix = Prefix::new(
        AccountId([1; 32]),
        42,
        0,
        OrderType::Instant,
        1_700_000_000_000,
        Commitment([2; 32]),
    );
    let coins = (0..coins).map(|i| CoinId(vec![i as u8; 36])).collect();
    let trade = Trade::new(coins, Side::Sell, 10 * 100_000_000, "DsmcYVbP1Nmag2H4AS17UTvmWXmGeA7nLDx")
        .expect("coin count within limit");
    let mut order: Order = InstantOrder::new(prefix, trade).into();
    order.set_time(1_700_000_000_123);
    order
}

fn make_cancel() -> Order {
    let prefix = Prefix::new(
        AccountId([1; 32]),
        42,
        0,
        OrderType::Cancel,
        1_700_000_000_000,
        Commitment([2; 32]),
    );
    let mut order: Order = CancelOrder::new(prefix, OrderId([3; 32])).into();
    order.set_time(1_700_000_000_123);
    order
}

// ============================================================================
// BENCHMARKS
// ============================================================================

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    for coins in [1usize, 4, 16] {
        let order = make_instant(coins);
        group.throughput(Throughput::Bytes(order.serialize_size() as u64));
        group.bench_with_input(BenchmarkId::new("instant", coins), &order, |b, order| {
            b.iter(|| black_box(order.serialize()))
        });
    }
    let cancel = make_cancel();
    group.bench_function("cancel", |b| b.iter(|| black_box(cancel.serialize())));
    group.finish();
}

fn bench_order_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_id");

    // Uncached: every iteration hashes the serialization.
    group.bench_function("uncached", |b| {
        b.iter_batched(
            || make_instant(4),
            |order| black_box(order.id()),
            BatchSize::SmallInput,
        )
    });

    let order = make_instant(4);
    order.id();
    group.bench_function("cached", |b| b.iter(|| black_box(order.id())));
    group.finish();
}

fn bench_fill_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_tracker");
    let order = make_instant(1);
    let trade = order.trade().expect("instant order has a trade");

    group.bench_function("add_fill", |b| b.iter(|| trade.add_fill(black_box(0))));
    group.bench_function("remaining", |b| b.iter(|| black_box(trade.remaining())));

    group.bench_function("contended_add_fill_4_threads", |b| {
        b.iter(|| {
            let trade = Arc::new(Trade::new(vec![], Side::Buy, u64::MAX, "DsAddr").expect("no coins"));
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let trade = Arc::clone(&trade);
                    thread::spawn(move || {
                        for _ in 0..1_000 {
                            trade.add_fill(1);
                        }
                    })
                })
                .collect();
            for h in handles {
                let _ = h.join();
            }
            black_box(trade.filled())
        })
    });
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let order = make_instant(4);
    c.bench_function("validate_instant_sell", |b| {
        b.iter(|| black_box(validate_order(&order, OrderStatus::Epoch, 100_000_000)))
    });
}

criterion_group!(
    benches,
    bench_serialize,
    bench_order_id,
    bench_fill_tracker,
    bench_validate
);
criterion_main!(benches);
