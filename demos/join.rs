//! Approximate the number of rows produced by joining two key columns,
//! using one counting Bloom filter per column.
use sketchy::{BloomFilter, CountingBloomFilter};

fn column(prefix: &str, distinct: usize, repeats: usize) -> Vec<String> {
    (0..distinct)
        .flat_map(|i| std::iter::repeat(format!("{}-{}", prefix, i)).take(repeats))
        .collect()
}

fn main() -> Result<(), sketchy::Error> {
    let left = column("key", 1000, 3);
    let right = column("key", 500, 4);

    let mut left_counts = CountingBloomFilter::new(4, 100_000, 15)?;
    let mut right_counts = CountingBloomFilter::new(4, 100_000, 15)?;

    for key in &left {
        left_counts.put(key);
    }
    for key in &right {
        right_counts.put(key);
    }

    // Each distinct left key contributes `left count * right count` rows.
    let mut visited = BloomFilter::with_hashes(4, 100_000)?;
    let mut rows = 0;
    for key in &left {
        if visited.get(key) {
            continue;
        }
        visited.put(key);
        rows += left_counts.min_count(key) * right_counts.min_count(key);
    }

    println!("approximate join rows: {} (exact: {})", rows, 500 * 3 * 4);

    Ok(())
}
