//! Integration tests for `LazyMap` under real thread contention.
//!
//! These tests drive the public API from many threads at once and check the
//! at-most-one-commit guarantee of `get_or_add`, plus the consistency of
//! snapshots taken while writers are active.

use dotsupport::collections::{LazyMap, MergePolicy};
use dotsupport::Error;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[test]
fn get_or_add_same_key_commits_once() {
    const THREADS: usize = 32;

    let map: Arc<LazyMap<String, Arc<String>>> = Arc::new(LazyMap::new());
    let invocations = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let map = Arc::clone(&map);
            let invocations = Arc::clone(&invocations);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                map.get_or_add("System.Runtime".to_string(), || {
                    invocations.fetch_add(1, Ordering::SeqCst);
                    Arc::new(format!("resolved by thread {}", thread_id))
                })
            })
        })
        .collect();

    let results: Vec<Arc<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let committed = map.get("System.Runtime").unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    for result in &results {
        assert!(Arc::ptr_eq(result, &committed));
    }
}

#[test]
fn get_or_add_distinct_keys_in_parallel() {
    let map: LazyMap<u32, u64> = LazyMap::new();
    let invocations = AtomicUsize::new(0);

    (0..2_000u32).into_par_iter().for_each(|i| {
        let key = i % 100;
        let value = map.get_or_add(key, || {
            invocations.fetch_add(1, Ordering::SeqCst);
            u64::from(key) * 3
        });
        assert_eq!(value, u64::from(key) * 3);
    });

    assert_eq!(map.len(), 100);
    assert_eq!(invocations.load(Ordering::SeqCst), 100);
}

#[test]
fn snapshots_never_observe_partial_merges() {
    let map: Arc<LazyMap<u32, u32>> = Arc::new(LazyMap::new());
    let barrier = Arc::new(Barrier::new(2));

    let writer = {
        let map = Arc::clone(&map);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for round in 1..=200u32 {
                let batch: Vec<(u32, u32)> = (0..10).map(|k| (k, round)).collect();
                map.merge(batch, MergePolicy::Overwrite).unwrap();
            }
        })
    };

    barrier.wait();
    for _ in 0..200 {
        let snapshot = map.snapshot();
        if let Some((_, first)) = snapshot.first() {
            assert_eq!(snapshot.len(), 10);
            assert!(snapshot.iter().all(|(_, round)| round == first));
        }
    }

    writer.join().unwrap();
    assert!(map.values().iter().all(|&round| round == 200));
}

#[test]
fn concurrent_removals_report_single_winner() {
    const THREADS: usize = 8;

    let map: Arc<LazyMap<&'static str, u8>> = Arc::new(LazyMap::new());
    map.set("mscorlib", 1);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let map = Arc::clone(&map);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                map.remove("mscorlib")
            })
        })
        .collect();

    let removed = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&removed| removed)
        .count();

    assert_eq!(removed, 1);
    assert!(map.is_empty());
}

#[test]
fn timed_get_or_add_gives_up_while_factory_holds_upgrade_slot() {
    let map: Arc<LazyMap<u8, u8>> = Arc::new(LazyMap::new());
    let (entered_tx, entered_rx) = std::sync::mpsc::channel();
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

    let slow = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            map.get_or_add(1, || {
                entered_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                10
            })
        })
    };

    entered_rx.recv().unwrap();
    let result = map.try_get_or_add_for(2, Duration::from_millis(20), || 20);
    assert!(matches!(result, Err(Error::LockTimeout(_))));
    assert!(!map.contains_key(&2));

    release_tx.send(()).unwrap();
    assert_eq!(slow.join().unwrap(), 10);
    assert_eq!(map.try_get_or_add_for(2, Duration::from_secs(5), || 20).unwrap(), 20);
}

#[test]
fn built_from_existing_dictionary() {
    let mut source = HashMap::new();
    source.insert("Culture", "neutral");
    source.insert("Version", "4.0.0.0");

    let map = LazyMap::from(source.clone());
    assert_eq!(map.to_hash_map(), source);

    let merged = map
        .merged([("PublicKeyToken", "b77a5c561934e089")], MergePolicy::Strict)
        .unwrap();
    assert_eq!(merged.len(), 3);
    assert_eq!(map.len(), 2);
}
