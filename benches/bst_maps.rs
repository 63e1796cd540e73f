use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use rb_collections::red_black_tree::{RedBlackMap, RedBlackMultiSet};
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 100;

fn bench_btreemap_insert(c: &mut Criterion) {
    c.bench_function("bench btreemap insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = BTreeMap::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let val = rng.next_u32();

                map.insert(key, val);
            }
        })
    });
}

fn bench_btreemap_get(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = BTreeMap::new();
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        let val = rng.next_u32();

        map.insert(key, val);
        values.push(key);
    }

    c.bench_function("bench btreemap get", move |b| {
        b.iter(|| {
            for key in &values {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_red_black_map_insert(c: &mut Criterion) {
    c.bench_function("bench red_black_map insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = RedBlackMap::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let val = rng.next_u32();

                black_box(map.insert(key, val).is_ok());
            }
        })
    });
}

fn bench_red_black_map_get(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = RedBlackMap::new();
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        let val = rng.next_u32();

        black_box(map.insert(key, val).is_ok());
        values.push(key);
    }

    c.bench_function("bench red_black_map get", move |b| {
        b.iter(|| {
            for key in &values {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_red_black_map_remove(c: &mut Criterion) {
    c.bench_function("bench red_black_map remove", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = RedBlackMap::new();
            let mut values = Vec::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let val = rng.next_u32();

                black_box(map.insert(key, val).is_ok());
                values.push(key);
            }
            for key in &values {
                black_box(map.remove(key));
            }
        })
    });
}

fn bench_red_black_multiset_equal_range(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = RedBlackMultiSet::new();
    for _ in 0..NUM_OF_OPERATIONS {
        black_box(set.insert(rng.gen_range(0, 10u32)).is_ok());
    }

    c.bench_function("bench red_black_multiset equal_range", move |b| {
        b.iter(|| {
            for key in 0..10 {
                black_box(set.equal_range(&key).count());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreemap_get,
    bench_btreemap_insert,
    bench_red_black_map_get,
    bench_red_black_map_insert,
    bench_red_black_map_remove,
    bench_red_black_multiset_equal_range,
);
criterion_main!(benches);
