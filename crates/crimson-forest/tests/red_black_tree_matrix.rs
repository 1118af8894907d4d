use crimson_forest::red_black::RbTree;

fn inorder_pairs(tree: &RbTree<i32, i32>) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    tree.inorder(|k, v, _| out.push((*k, *v)));
    out
}

#[test]
fn rb_tree_insert_eight_keys_matrix() {
    let mut tree = RbTree::<i32, i32>::new();

    for key in [7, 3, 18, 10, 22, 8, 11, 26] {
        assert!(tree.insert(key, key));
        assert!(tree.validate());
        tree.check_invariants().unwrap();
    }

    let keys: Vec<i32> = inorder_pairs(&tree).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![3, 7, 8, 10, 11, 18, 22, 26]);
    assert!(tree.black_depth() > 0);
}

#[test]
fn rb_tree_insert_assign_erase_matrix() {
    let mut tree = RbTree::<i32, i32>::new();

    assert!(tree.insert(5, 5));
    assert!(!tree.insert(5, 5));
    assert!(!tree.insert_or_assign(5, 9));
    assert_eq!(tree.find(&5), Some(&9));
    assert!(tree.erase(&5));
    assert!(!tree.erase(&5));
    assert!(tree.is_empty());
}

#[test]
fn rb_tree_ascending_insert_erase_matrix() {
    let mut tree = RbTree::<i32, i32>::new();

    for key in 1..=100 {
        assert!(tree.insert(key, key));
        assert!(tree.validate());
    }
    assert_eq!(tree.size(), 100);

    for key in 1..=100 {
        assert!(tree.erase(&key));
        assert!(tree.validate());
        tree.check_invariants().unwrap();
    }
    assert_eq!(tree.size(), 0);
    assert!(tree.is_empty());
}

#[test]
fn rb_tree_ladder_insert_delete_matrix() {
    let mut tree = RbTree::<i32, i32>::new();

    for i in 0..200 {
        tree.insert(i, i);
        assert_eq!(tree.find(&i), Some(&i));
        tree.check_invariants().unwrap();
    }

    assert_eq!(tree.size(), 200);

    for i in (0..200).step_by(2) {
        assert!(tree.erase(&i));
        tree.check_invariants().unwrap();
    }

    assert_eq!(tree.size(), 100);

    for i in 0..200 {
        if i % 2 == 0 {
            assert_eq!(tree.find(&i), None);
            assert!(!tree.has(&i));
        } else {
            assert_eq!(tree.find(&i), Some(&i));
            assert!(tree.has(&i));
        }
    }
}

#[test]
fn rb_tree_traversal_info_matrix() {
    let mut tree = RbTree::<i32, i32>::new();
    tree.insert(2, 20);
    tree.insert(1, 10);
    tree.insert(3, 30);

    // Root 2 is black, both leaves red.
    let mut pre = Vec::new();
    tree.preorder(|k, v, info| pre.push((*k, *v, info.complete_index, info.red)));
    assert_eq!(
        pre,
        vec![(2, 20, 0, false), (1, 10, 1, true), (3, 30, 2, true)]
    );

    let mut ino = Vec::new();
    tree.inorder(|k, _, info| ino.push((*k, info.complete_index)));
    assert_eq!(ino, vec![(1, 1), (2, 0), (3, 2)]);

    let mut post = Vec::new();
    tree.postorder(|k, _, info| post.push((*k, info.complete_index)));
    assert_eq!(post, vec![(1, 1), (3, 2), (2, 0)]);
}

#[test]
fn rb_tree_traversal_skips_nothing_matrix() {
    let mut tree = RbTree::<i32, i32>::new();
    for key in [47, 20, 14, 88, 71, 100, 8, 53, 46, 52] {
        tree.insert(key, key * 10);
    }

    let mut visited = 0usize;
    tree.postorder(|_, _, _| visited += 1);
    assert_eq!(visited, tree.size());

    let pairs = inorder_pairs(&tree);
    let mut sorted = pairs.clone();
    sorted.sort_unstable();
    assert_eq!(pairs, sorted);
}

#[test]
fn rb_tree_clear_idempotent_matrix() {
    let mut tree = RbTree::<i32, i32>::new();
    for key in 0..32 {
        tree.insert(key, key);
    }

    tree.clear();
    assert_eq!(tree.size(), 0);
    assert!(tree.is_empty());

    tree.clear();
    assert_eq!(tree.size(), 0);
    assert!(tree.is_empty());

    // The arena is reusable after a clear.
    assert!(tree.insert(1, 1));
    assert_eq!(tree.find(&1), Some(&1));
    tree.check_invariants().unwrap();
}

#[test]
fn rb_tree_find_mut_matrix() {
    let mut tree = RbTree::<i32, i32>::new();
    tree.insert(10, 100);

    *tree.find_mut(&10).unwrap() = 101;
    assert_eq!(tree.find(&10), Some(&101));
    assert_eq!(tree.find_mut(&11), None);
}

#[test]
fn rb_tree_custom_comparator_matrix() {
    let mut tree = RbTree::<i32, i32, _>::with_comparator(|a: &i32, b: &i32| b < a);
    tree.insert(1, 10);
    tree.insert(3, 30);
    tree.insert(2, 20);

    let mut keys = Vec::new();
    tree.inorder(|k, _, _| keys.push(*k));
    assert_eq!(keys, vec![3, 2, 1]);
    tree.check_invariants().unwrap();
}

#[test]
fn rb_tree_trace_subset_matrix() {
    let mut tree = RbTree::<i32, i32>::new();

    let trace: &[(char, i32)] = &[
        ('i', 47),
        ('i', 20),
        ('i', 14),
        ('i', 88),
        ('a', 20),
        ('i', 71),
        ('d', 14),
        ('i', 100),
        ('i', 8),
        ('d', 47),
        ('d', 47),
        ('i', 53),
        ('a', 53),
        ('i', 46),
        ('d', 88),
        ('i', 52),
        ('d', 20),
        ('d', 71),
        ('d', 100),
        ('d', 8),
        ('d', 53),
        ('d', 46),
        ('d', 52),
    ];

    for (idx, (op, key)) in trace.iter().enumerate() {
        match op {
            'i' => {
                tree.insert(*key, *key);
            }
            'a' => {
                tree.insert_or_assign(*key, key * 2);
            }
            'd' => {
                tree.erase(key);
            }
            _ => unreachable!(),
        }
        if let Err(err) = tree.check_invariants() {
            panic!("trace failure at step {idx} ({op},{key}): {err}");
        }
    }
    assert!(tree.is_empty());
}

#[test]
fn rb_tree_dump_smoke_matrix() {
    let mut tree = RbTree::<i32, i32>::new();
    tree.insert(2, 20);
    tree.insert(1, 10);

    let dump = tree.dump();
    assert!(dump.contains("black"));
    assert!(dump.contains("red"));
    assert!(dump.contains("2 = 20"));
}
