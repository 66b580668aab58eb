//! Stress tests for the order model.
//!
//! These tests verify:
//! 1. The fill tracker loses no updates under concurrent writers
//! 2. Readers never observe a torn or impossible fill value
//! 3. Order IDs are deterministic for identical field values
//! 4. Any single-field change produces a different ID
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use dex_orders::{
    AccountId, CancelOrder, CoinId, Commitment, InstantOrder, Order, OrderId, OrderType, Prefix,
    Preimage, Side, Trade,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Concurrent writer threads
const WRITERS: u64 = 16;

/// Fills applied by each writer
const FILLS_PER_WRITER: u64 = 10_000;

/// Amount of each fill
const FILL_AMOUNT: u64 = 7;

/// Orders generated for ID tests
const ID_ORDER_COUNT: usize = 10_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Generate deterministic stamped orders. Same seed = same orders.
fn generate_deterministic_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let mut account = [0u8; 32];
        rng.fill(&mut account[..]);
        let mut preimage = [0u8; 32];
        rng.fill(&mut preimage[..]);
        let client_time: u64 = 1_700_000_000_000 + i as u64;

        let mut order: Order = if rng.gen_bool(0.8) {
            let prefix = Prefix::new(
                AccountId(account),
                42,
                0,
                OrderType::Instant,
                client_time,
                Preimage(preimage).commit(),
            );
            let coins = (0..rng.gen_range(1..=4))
                .map(|_| {
                    let mut c = vec![0u8; 36];
                    rng.fill(&mut c[..]);
                    CoinId(c)
                })
                .collect();
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let quantity = rng.gen_range(1..=1_000u64) * 100_000_000;
            let address = format!("DsAddr{:08x}", rng.gen::<u32>());
            let trade = Trade::new(coins, side, quantity, address).expect("at most 4 coins");
            InstantOrder::new(prefix, trade).into()
        } else {
            let prefix = Prefix::new(
                AccountId(account),
                42,
                0,
                OrderType::Cancel,
                client_time,
                Preimage(preimage).commit(),
            );
            let mut target = [0u8; 32];
            rng.fill(&mut target[..]);
            CancelOrder::new(prefix, OrderId(target)).into()
        };

        order.set_time(client_time + rng.gen_range(1..=500));
        orders.push(order);
    }

    orders
}

fn ids(orders: &[Order]) -> Vec<OrderId> {
    orders.iter().map(Order::id).collect()
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// N writers each add k a fixed number of times. The total must be exact.
#[test]
fn stress_concurrent_fills() {
    init_logging();
    println!("\n=== STRESS TEST: Concurrent Fills ===\n");

    let trade = Arc::new(Trade::new(vec![], Side::Sell, u64::MAX, "DsAddr").expect("no coins"));
    let done = Arc::new(AtomicBool::new(false));

    // Readers check the counter only ever grows and stays consistent.
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let trade = Arc::clone(&trade);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut last = 0;
                let mut reads = 0u64;
                while !done.load(Ordering::Acquire) {
                    let filled = trade.filled();
                    assert!(filled >= last, "filled went backwards: {} < {}", filled, last);
                    assert_eq!(filled % FILL_AMOUNT, 0, "torn fill value {}", filled);
                    last = filled;
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    let start = Instant::now();
    let writers: Vec<_> = (0..WRITERS)
        .map(|_| {
            let trade = Arc::clone(&trade);
            thread::spawn(move || {
                for _ in 0..FILLS_PER_WRITER {
                    trade.add_fill(FILL_AMOUNT);
                }
            })
        })
        .collect();
    for w in writers {
        w.join().expect("writer panicked");
    }
    let elapsed = start.elapsed();

    done.store(true, Ordering::Release);
    let total_reads: u64 = readers
        .into_iter()
        .map(|r| r.join().expect("reader panicked"))
        .sum();

    let expected = WRITERS * FILLS_PER_WRITER * FILL_AMOUNT;
    println!("  Writers:           {:>12}", WRITERS);
    println!("  Fills:             {:>12}", WRITERS * FILLS_PER_WRITER);
    println!("  Reads:             {:>12}", total_reads);
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!("  Filled:            {:>12}", trade.filled());

    assert_eq!(trade.filled(), expected, "lost fill updates");
    assert_eq!(trade.remaining(), u64::MAX - expected);

    println!("\n=== CONCURRENT FILLS PASSED ===\n");
}

/// Absolute sets race with reads; a reader must only see values some
/// writer actually set.
#[test]
fn stress_concurrent_set_fill() {
    init_logging();
    let trade = Arc::new(Trade::new(vec![], Side::Buy, 1_000_000, "DsAddr").expect("no coins"));

    let handles: Vec<_> = (1..=8u64)
        .map(|w| {
            let trade = Arc::clone(&trade);
            thread::spawn(move || {
                for _ in 0..5_000 {
                    trade.set_fill(w * 1_000);
                    let seen = trade.filled();
                    assert!(seen % 1_000 == 0 && (1_000..=8_000).contains(&seen));
                    let rem = trade.remaining();
                    assert!(rem % 1_000 == 0 && (992_000..=999_000).contains(&rem));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("thread panicked");
    }

    let last = trade.filled();
    assert!((1_000..=8_000).contains(&last));
    trade.set_fill(last);
    assert_eq!(trade.filled(), last);
}

/// Same seed = same IDs. Different seed = different IDs.
#[test]
fn verify_id_determinism() {
    println!("\n=== ID DETERMINISM TEST ===\n");

    const SEED: u64 = 12345;

    let run1 = ids(&generate_deterministic_orders(ID_ORDER_COUNT, SEED));
    let run2 = ids(&generate_deterministic_orders(ID_ORDER_COUNT, SEED));
    assert_eq!(run1, run2, "order IDs must be deterministic");

    let run3 = ids(&generate_deterministic_orders(ID_ORDER_COUNT, SEED + 1));
    assert_ne!(run1[0], run3[0], "different seeds should produce different IDs");

    let unique: HashSet<_> = run1.iter().collect();
    assert_eq!(unique.len(), ID_ORDER_COUNT, "ID collision");
    assert!(run1.iter().all(|id| !id.is_zero()));

    println!("  First ID:          {}", run1[0]);
    println!("\n=== ID DETERMINISM VERIFIED ===\n");
}

/// Changing one byte of any serialized field changes the ID.
#[test]
fn verify_single_field_change_changes_id() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let orders = generate_deterministic_orders(1_000, 7);

    for order in &orders {
        let original = order.id();
        let mut changed = order.clone();
        assert_eq!(changed.id(), original);
        match &mut changed {
            Order::Instant(o) => {
                let trade = o.trade_mut();
                match rng.gen_range(0..4) {
                    0 => {
                        let mut addr = trade.address.clone().into_bytes();
                        let i = rng.gen_range(0..addr.len());
                        addr[i] = if addr[i] == b'x' { b'y' } else { b'x' };
                        trade.address = String::from_utf8(addr).expect("ascii address");
                    }
                    1 => trade.quantity += 1,
                    2 => trade.side = trade.side.opposite(),
                    _ => {
                        let mut coins = trade.coins().to_vec();
                        coins[0].0[0] ^= 0x01;
                        trade.set_coins(coins).expect("same coin count");
                    }
                }
            }
            Order::Cancel(o) => {
                let mut target = o.target_order_id();
                target.0[31] ^= 0x01;
                o.set_target_order_id(target);
            }
        }
        assert_ne!(changed.id(), original);
    }
}

/// Changing the commitment or account changes the ID.
#[test]
fn verify_prefix_change_changes_id() {
    let orders = generate_deterministic_orders(100, 99);
    for order in &orders {
        let mut changed = order.clone();
        assert_eq!(changed.id(), order.id());
        match &mut changed {
            Order::Instant(o) => o.prefix_mut().commit = Commitment([0x5A; 32]),
            Order::Cancel(o) => o.prefix_mut().account_id.0[0] ^= 0xFF,
        }
        assert_ne!(changed.id(), order.id());
    }
}

/// Many threads derive the ID of shared stamped orders at once.
#[test]
fn stress_concurrent_id_derivation() {
    let orders = Arc::new(generate_deterministic_orders(1_000, 3));
    let expected: Vec<OrderId> = generate_deterministic_orders(1_000, 3)
        .iter()
        .map(Order::id)
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let orders = Arc::clone(&orders);
            thread::spawn(move || ids(&orders))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().expect("thread panicked"), expected);
    }
}
