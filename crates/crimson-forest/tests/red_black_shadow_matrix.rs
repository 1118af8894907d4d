//! Random mutation streams cross-checked against `BTreeMap` after every
//! step.

use std::collections::BTreeMap;

use crimson_forest::red_black::RbTree;
use crimson_util::Fuzzer;

const OPS_PER_SEED: usize = 100_000;
const KEY_MIN: i64 = 0;
const KEY_MAX: i64 = 511;

fn inorder_pairs(tree: &RbTree<i64, i64>) -> Vec<(i64, i64)> {
    let mut out = Vec::with_capacity(tree.size());
    tree.inorder(|k, v, _| out.push((*k, *v)));
    out
}

fn shadow_run(seed: u64) {
    let mut fuzzer = Fuzzer::from_u64(seed);
    let mut tree = RbTree::<i64, i64>::new();
    let mut shadow = BTreeMap::new();

    for idx in 0..OPS_PER_SEED {
        let key = fuzzer.random_int(KEY_MIN, KEY_MAX);
        match fuzzer.random_int(0, 2) {
            0 => {
                let expected = !shadow.contains_key(&key);
                if expected {
                    shadow.insert(key, key);
                }
                assert_eq!(
                    tree.insert(key, key),
                    expected,
                    "seed={seed} idx={idx}: insert({key})"
                );
            }
            1 => {
                let value = fuzzer.random_int(i64::MIN, i64::MAX);
                let expected = shadow.insert(key, value).is_none();
                assert_eq!(
                    tree.insert_or_assign(key, value),
                    expected,
                    "seed={seed} idx={idx}: insert_or_assign({key})"
                );
            }
            _ => {
                let expected = shadow.remove(&key).is_some();
                assert_eq!(
                    tree.erase(&key),
                    expected,
                    "seed={seed} idx={idx}: erase({key})"
                );
            }
        }

        assert_eq!(tree.size(), shadow.len(), "seed={seed} idx={idx}: size");
        assert_eq!(tree.is_empty(), shadow.is_empty());

        let expected: Vec<(i64, i64)> = shadow.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(
            inorder_pairs(&tree),
            expected,
            "seed={seed} idx={idx}: in-order sequence"
        );

        if idx % 256 == 0 {
            if let Err(err) = tree.check_invariants() {
                panic!("seed={seed} idx={idx}: {err}");
            }
        } else {
            assert!(tree.validate(), "seed={seed} idx={idx}: validate");
        }
    }

    tree.check_invariants().unwrap();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.black_depth(), 0);
}

#[test]
fn rb_shadow_stream_seed_1_matrix() {
    shadow_run(1);
}

#[test]
fn rb_shadow_stream_seed_2_matrix() {
    shadow_run(2);
}

#[test]
fn rb_shadow_stream_seed_3_matrix() {
    shadow_run(3);
}

#[test]
fn rb_round_trip_shuffled_matrix() {
    let mut fuzzer = Fuzzer::from_u64(7);
    let mut keys: Vec<i64> = (1..=512).collect();

    let mut tree = RbTree::<i64, i64>::new();

    fuzzer.shuffle(&mut keys);
    for &key in &keys {
        assert!(tree.insert(key, key));
        assert!(tree.validate());
    }
    assert_eq!(tree.size(), 512);

    fuzzer.shuffle(&mut keys);
    for &key in &keys {
        assert!(tree.erase(&key));
        assert!(tree.validate());
    }
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
}
