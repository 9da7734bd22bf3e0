//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the expiration, overwrite, eviction and sweep
//! invariants of the response cache. Elapsed time is simulated with a paused
//! tokio clock so no test sleeps.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys shaped like `namespace:params`
fn key_strategy() -> impl Strategy<Value = String> {
    "(adobe|jira|gitlab|github):[a-z0-9_]{1,24}".prop_map(|s| s)
}

/// Generates small JSON payloads
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,32}".prop_map(|s| json!(s)),
        prop::collection::vec(any::<u16>(), 0..8).prop_map(|v| json!(v)),
        ("[a-z]{1,8}", any::<bool>()).prop_map(|(k, b)| json!({ k: b })),
    ]
}

/// Runs `fut` on a current-thread runtime whose clock starts paused.
fn with_paused_clock<F: Future>(fut: F) -> F::Output {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("runtime should build");
    rt.block_on(fut)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Value },
    Get { key: String },
    Clear { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Clear { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A value is readable strictly before its TTL elapses and absent from then on.
    #[test]
    fn prop_ttl_expiration(
        key in key_strategy(),
        value in value_strategy(),
        ttl_secs in 1u64..120,
        elapsed_secs in 0u64..240,
    ) {
        let result = with_paused_clock(async {
            let mut store = CacheStore::new(TEST_DEFAULT_TTL);
            store.set(key.clone(), value.clone(), Duration::from_secs(ttl_secs));
            tokio::time::advance(Duration::from_secs(elapsed_secs)).await;
            store.get(&key)
        });

        if elapsed_secs < ttl_secs {
            prop_assert_eq!(result, Some(value));
        } else {
            prop_assert_eq!(result, None);
        }
    }

    // The second write wins, for its value and its TTL.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy(),
        ttl1 in 1u64..60,
        ttl2 in 1u64..60,
    ) {
        let (live, after_ttl2, len) = with_paused_clock(async {
            let mut store = CacheStore::new(TEST_DEFAULT_TTL);
            store.set(key.clone(), v1, Duration::from_secs(ttl1));
            store.set(key.clone(), v2.clone(), Duration::from_secs(ttl2));
            let len = store.len();

            tokio::time::advance(Duration::from_secs(ttl2 - 1)).await;
            let live = store.get(&key);
            tokio::time::advance(Duration::from_secs(1)).await;
            let after = store.get(&key);
            (live, after, len)
        });

        prop_assert_eq!(len, 1);
        prop_assert_eq!(live, Some(v2));
        prop_assert_eq!(after_ttl2, None);
    }

    // An expired read purges exactly one entry.
    #[test]
    fn prop_lazy_eviction_purges_one(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 1..20),
    ) {
        let keys: Vec<String> = entries.keys().cloned().collect();
        let (before, after, miss) = with_paused_clock(async {
            let mut store = CacheStore::new(TEST_DEFAULT_TTL);
            for (key, value) in entries {
                store.set(key, value, Duration::from_secs(5));
            }
            tokio::time::advance(Duration::from_secs(5)).await;

            let before = store.len();
            let miss = store.get(&keys[0]);
            (before, store.len(), miss)
        });

        prop_assert_eq!(miss, None);
        prop_assert_eq!(after, before - 1);
    }

    // Sweep removes exactly the expired entries and nothing else.
    #[test]
    fn prop_sweep_correctness(
        entries in prop::collection::hash_map(key_strategy(), 1u64..30, 0..40),
        elapsed_secs in 0u64..40,
    ) {
        let expected_live: HashMap<String, u64> = entries
            .iter()
            .filter(|(_, ttl)| **ttl > elapsed_secs)
            .map(|(k, ttl)| (k.clone(), *ttl))
            .collect();
        let expected_removed = entries.len() - expected_live.len();

        let (removed, remaining) = with_paused_clock(async {
            let mut store = CacheStore::new(TEST_DEFAULT_TTL);
            for (key, ttl) in &entries {
                store.set(key.clone(), json!(ttl), Duration::from_secs(*ttl));
            }
            tokio::time::advance(Duration::from_secs(elapsed_secs)).await;

            let removed = store.sweep();
            let remaining: Vec<(String, Option<Value>)> = expected_live
                .keys()
                .map(|k| (k.clone(), store.get(k)))
                .collect();
            (removed, remaining)
        });

        prop_assert_eq!(removed, expected_removed);
        for (key, value) in remaining {
            prop_assert_eq!(value, Some(json!(expected_live[&key])));
        }
    }

    // Hit and miss counters track every read.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => store.set(key, value, TEST_DEFAULT_TTL),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Clear { key } => {
                    store.clear(Some(&key));
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }
}
