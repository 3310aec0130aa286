use rand::{thread_rng, Rng};
use sha_bloom::Filter;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🦀 Rust Micro Benchmark - SHA-256 Bloom filter");
    println!("{}", "=".repeat(55));

    let element_counts: Vec<u32> = vec![1_000, 10_000, 50_000, 100_000];
    let prob = 0.01;
    let queries = 100_000u64;

    println!("Testing element counts: {:?} at p = {}", element_counts, prob);
    println!();

    // Results storage
    let mut results = Vec::new();
    let mut rng = thread_rng();

    for &n_elements in &element_counts {
        println!("🔬 Testing {} elements...", n_elements);

        // Create filter
        let start = Instant::now();
        let mut filter = Filter::new(n_elements, prob)?;
        let creation_time = start.elapsed().as_secs_f64();

        // Random keys with the top bit cleared, probes with it set, so the
        // two sets never overlap
        let keys: Vec<u64> = (0..n_elements).map(|_| rng.gen::<u64>() >> 1).collect();
        let probes: Vec<u64> = (0..queries).map(|_| rng.gen::<u64>() | 1u64 << 63).collect();

        // Insert benchmark
        let start = Instant::now();
        for key in &keys {
            filter.add(&key.to_be_bytes())?;
        }
        let insert_time = start.elapsed().as_secs_f64();

        // Query benchmark (successful lookups)
        let mut hits = 0;
        for key in &keys {
            if filter.has(&key.to_be_bytes())? {
                hits += 1;
            }
        }

        // Query benchmark (false positive test)
        let start = Instant::now();
        let mut false_positives = 0;
        for probe in &probes {
            if filter.has(&probe.to_be_bytes())? {
                false_positives += 1;
            }
        }
        let query_time = start.elapsed().as_secs_f64();

        // Calculate rates
        let insert_rate = if insert_time > 0.0 {
            n_elements as f64 / insert_time
        } else {
            f64::INFINITY
        };
        let query_rate = if query_time > 0.0 {
            queries as f64 / query_time
        } else {
            f64::INFINITY
        };
        let false_positive_rate = false_positives as f64 / queries as f64;

        results.push((
            n_elements,
            creation_time,
            insert_time,
            query_time,
            insert_rate,
            query_rate,
            hits,
            false_positives,
            false_positive_rate,
        ));

        println!(
            "   ✅ Done - Insert rate: {:.0} ops/s, Query rate: {:.0} ops/s",
            insert_rate, query_rate
        );
        println!("{}", filter.stats());
    }

    // Print results in CSV format
    println!("\n📊 Results (CSV format):");
    println!("elements,creation_time,insert_time,query_time,insert_rate,query_rate,hits,false_positives,false_positive_rate");

    for (
        elements,
        creation_time,
        insert_time,
        query_time,
        insert_rate,
        query_rate,
        hits,
        false_positives,
        fpr,
    ) in &results
    {
        println!(
            "{},{:.6},{:.6},{:.6},{:.0},{:.0},{},{},{:.6}",
            elements,
            creation_time,
            insert_time,
            query_time,
            insert_rate,
            query_rate,
            hits,
            false_positives,
            fpr
        );
    }

    // Print summary
    if let Some(&(max_elements, creation_time, _, _, insert_rate, query_rate, hits, _, fpr)) =
        results.last()
    {
        println!("\n🎯 Key Findings (at {} elements):", max_elements);
        println!("   Creation time: {:.6}s", creation_time);
        println!("   Insert rate: {:.0} ops/s", insert_rate);
        println!("   Query rate: {:.0} ops/s", query_rate);
        println!("   Inserted keys found: {}/{}", hits, max_elements);
        println!("   False positive rate: {:.4} (target {})", fpr, prob);
    }

    Ok(())
}
