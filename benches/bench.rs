use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use avl_tree::Tree;

#[derive(Clone)]
enum MapEnum {
    Avl(Tree<i32, i32>),
    Std(BTreeMap<i32, i32>),
}

impl MapEnum {
    fn find(&self, k: &i32) -> Option<&i32> {
        match self {
            Self::Avl(t) => t.get(k),
            Self::Std(m) => m.get(k),
        }
    }

    fn insert(&mut self, k: i32, v: i32) {
        match self {
            Self::Avl(t) => {
                t.insert(k, v);
            }
            Self::Std(m) => {
                m.entry(k).or_insert(v);
            }
        }
    }

    fn sum_keys(&self) -> i64 {
        match self {
            Self::Avl(t) => t.iter().map(|(k, _)| i64::from(*k)).sum(),
            Self::Std(m) => m.keys().map(|k| i64::from(*k)).sum(),
        }
    }
}

/// Helper to bench a function on a map.
/// It creates a group for the given name and closure and runs tests for various sizes of the
/// AVL tree and of the standard library's `BTreeMap` before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut MapEnum, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let largest_element_in_tree = num_nodes - 1;

        // Ascending insertion is the worst case for an unbalanced BST.
        let avl_tree = {
            let mut tree = Tree::new();
            for x in 0..num_nodes {
                tree.insert(x as i32, x as i32);
            }

            tree
        };
        let std_map = (0..num_nodes).map(|x| (x as i32, x as i32)).collect();
        let tree_tests = [
            ("avl", MapEnum::Avl(avl_tree)),
            ("btree_map", MapEnum::Std(std_map)),
        ];
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree as i32));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _value = black_box(tree.find(&i));
    });
    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1, i + 1);
    });
    bench_helper(c, "insert-existing", |tree, i| {
        tree.insert(i, i);
    });
    bench_helper(c, "find-miss", |tree, i| {
        let _value = black_box(tree.find(&(i + 1)));
    });
    bench_helper(c, "iterate", |tree, _| {
        black_box(tree.sum_keys());
    });
    bench_helper(c, "clone", |tree, _| {
        black_box(tree.clone());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
