use probe_table::{HashTable, TableConfig, TableError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

const SIZE: usize = 10_000;

fn init_test_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

fn random_keys(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    let mut seen = HashSet::with_capacity(count);
    while seen.len() < count {
        let key: String = (0..5).map(|_| rng.random::<char>()).collect();
        seen.insert(key);
    }
    seen.into_iter().collect()
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_fill_to_capacity_with_random_keys() {
    init_test_logger();
    let keys = random_keys(SIZE);
    let mut table = HashTable::with_capacity(SIZE).unwrap();

    // We expect collisions.
    for key in &keys {
        table.add(key.clone(), key.len()).unwrap();
    }
    assert_eq!(table.size(), SIZE);
    assert_eq!(table.load_factor(), 1.0);

    for key in &keys {
        assert_eq!(table.get(key), Some(&key.len()));
    }

    assert_eq!(
        table.add("overflow".to_string(), 0),
        Err(TableError::TableFull { capacity: SIZE })
    );
    assert_eq!(table.size(), SIZE);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_remove_all_in_random_order() {
    init_test_logger();
    let mut keys = random_keys(SIZE);
    let mut table = HashTable::with_capacity(SIZE).unwrap();
    for (i, key) in keys.iter().enumerate() {
        table.add(key.clone(), i).unwrap();
    }
    assert_eq!(table.size(), SIZE);

    keys.shuffle(&mut rand::rng());

    let mut expected = SIZE;
    for (i, key) in keys.iter().enumerate() {
        assert!(table.remove(key).is_some());
        expected -= 1;
        assert_eq!(table.size(), expected);
        // With no empty slots left every miss walks the whole cycle, so
        // only sample the negative lookups.
        if i % 100 == 0 {
            assert!(!table.contains(key));
        }
    }
    assert!(table.is_empty());
    assert_eq!(table.tombstones(), SIZE);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_churn_matches_reference_map() {
    let mut rng = rand::rng();
    let mut table = HashTable::with_capacity(256).unwrap();
    let mut reference = std::collections::HashMap::new();

    for _ in 0..20_000 {
        let key: u32 = rng.random_range(0..512);
        match rng.random_range(0..3) {
            0 => {
                let value: u64 = rng.random();
                match table.add(key, value) {
                    Ok(prev) => assert_eq!(prev, reference.insert(key, value)),
                    Err(TableError::TableFull { .. }) => {
                        assert_eq!(reference.len(), 256);
                        assert!(!reference.contains_key(&key));
                    }
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }
            1 => assert_eq!(table.remove(&key), reference.remove(&key)),
            _ => assert_eq!(table.get(&key), reference.get(&key)),
        }
        assert_eq!(table.size(), reference.len());
    }

    for (k, v) in &reference {
        assert_eq!(table.get(k), Some(v));
    }
    assert_eq!(table.iter().count(), reference.len());
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_churn_with_auto_compaction() {
    let mut cfg = TableConfig::new();
    cfg.capacity(128).compact_threshold(0.5);
    let mut table = HashTable::from_config(&cfg).unwrap();
    let mut reference = std::collections::HashMap::new();
    let mut rng = rand::rng();

    for round in 0..5_000u32 {
        let key = rng.random_range(0..100u32);
        if round % 2 == 0 {
            assert_eq!(table.add(key, round).unwrap(), reference.insert(key, round));
        } else {
            assert_eq!(table.remove(&key), reference.remove(&key));
        }
        // An add compacts once half the slots are tombstones, and at most
        // one removal happens between adds.
        assert!(table.tombstones() <= 64);
    }

    assert_eq!(table.size(), reference.len());
    for (k, v) in &reference {
        assert_eq!(table.get(k), Some(v));
    }
}
