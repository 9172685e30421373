//! Command-line workload driver: exercises insertion, lookup, deletion,
//! iteration, structural-sharing construction, and a collision-heavy
//! workload against a size argument of `small`, `medium`, or `large`.
//!
//! ```text
//! cargo run --example cli -- medium
//! ```

use std::env;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use hamt::Hamt;

#[derive(Clone, PartialEq, Eq)]
struct CollidingKey(u64);

impl Hash for CollidingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        0_u64.hash(state);
    }
}

fn workload_size(arg: Option<&str>) -> u64 {
    match arg {
        Some("small") => 1_000,
        Some("large") => 1_000_000,
        Some("medium") | None => 100_000,
        Some(other) => {
            log::warn!("unrecognized workload size {other:?}, defaulting to medium");
            100_000
        }
    }
}

fn timed<F: FnOnce() -> T, T>(label: &str, f: F) -> T {
    let start = Instant::now();
    let result = f();
    println!("{label}: {:?}", start.elapsed());
    result
}

fn main() {
    env_logger::init();

    let arg = env::args().nth(1);
    let n = workload_size(arg.as_deref());
    println!("workload size: {n}");

    let map = timed("insert", || {
        let mut map = Hamt::new();
        for i in 0..n {
            map = map.insert(i, i);
        }
        map
    });
    assert_eq!(map.len() as u64, n);

    timed("lookup", || {
        for i in 0..n.min(10_000) {
            assert_eq!(map.get(&i), Some(&i));
        }
    });

    timed("iteration", || {
        let mut sum = 0_u64;
        for (k, v) in map.iter() {
            sum = sum.wrapping_add(*k).wrapping_add(*v);
        }
        println!("  checksum: {sum}");
    });

    timed("structural_sharing_single_insert", || {
        let extended = map.insert(n + 1, 0);
        assert_eq!(extended.len() as u64, n + 1);
    });

    let deleted = timed("delete", || {
        let mut deleted = map.clone();
        for i in 0..n.min(10_000) {
            deleted = deleted.remove(&i).unwrap();
        }
        deleted
    });
    println!("  remaining after partial delete: {}", deleted.len());

    timed("collision_heavy", || {
        let mut collisions = Hamt::new();
        for i in 0..n.min(10_000) {
            collisions = collisions.insert(CollidingKey(i), i);
        }
        assert_eq!(collisions.len() as u64, n.min(10_000));
    });
}
