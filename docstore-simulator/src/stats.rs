//! Reporting for simulation results.

use crate::models::{CsvResultRow, ManagerMode, SimulationResult};
use std::path::Path;

/// Prints one line per run, ordered by cache size then mode.
pub fn print_summary(result: &SimulationResult) {
    println!("\nDocument Manager Simulation Summary");
    println!("===================================");
    println!("Total requests: {}", result.total_requests);
    println!("Unique documents: {}", result.unique_keys);
    println!("Wall time: {:.2?}", result.duration);

    println!(
        "\n{:>10} {:<10} {:>10} {:>8} {:>10} {:>9} {:>10} {:>10} {:>10} {:>10}",
        "CacheSize",
        "Mode",
        "Lookups",
        "HitRate",
        "Fallbacks",
        "NotFound",
        "Evictions",
        "FindAvg",
        "FindP99",
        "Elapsed"
    );
    println!("{}", "-".repeat(106));

    let mut runs: Vec<_> = result.runs.iter().collect();
    runs.sort_by_key(|(key, _)| *key);

    for (key, stats) in runs {
        println!(
            "{:>10} {:<10} {:>10} {:>7.2}% {:>10} {:>9} {:>10} {:>8.0}ns {:>8}ns {:>9.3}s",
            key.cache_size,
            key.mode.as_str(),
            stats.lookups,
            stats.hit_rate(),
            stats.store_fallbacks,
            stats.not_found,
            stats.evictions,
            stats.latency.find.avg_ns(),
            stats.latency.find.p99_ns,
            stats.elapsed.as_secs_f64()
        );
    }
}

/// Prints the hit-rate gap between sequential and concurrent runs of each size.
pub fn print_comparison(result: &SimulationResult) {
    println!("\nHit rate: sequential vs concurrent");
    println!("{:>10} {:>11} {:>11} {:>9}", "CacheSize", "Sequential", "Concurrent", "Delta");

    let mut sizes: Vec<_> = result.runs.iter().map(|(key, _)| key.cache_size).collect();
    sizes.sort();
    sizes.dedup();

    for size in sizes {
        let rate = |mode: ManagerMode| {
            result
                .runs
                .iter()
                .find(|(key, _)| key.cache_size == size && key.mode == mode)
                .map(|(_, stats)| stats.hit_rate())
        };

        match (rate(ManagerMode::Sequential), rate(ManagerMode::Concurrent)) {
            (Some(seq), Some(conc)) => println!(
                "{:>10} {:>10.2}% {:>10.2}% {:>+8.2}%",
                size,
                seq,
                conc,
                conc - seq
            ),
            _ => println!("{:>10} {:>11} {:>11} {:>9}", size, "N/A", "N/A", "N/A"),
        }
    }
}

/// Converts results to CSV rows, ordered by cache size then mode.
pub fn csv_rows(result: &SimulationResult) -> Vec<CsvResultRow> {
    let mut runs: Vec<_> = result.runs.iter().collect();
    runs.sort_by_key(|(key, _)| *key);

    runs.into_iter()
        .map(|(key, stats)| CsvResultRow {
            cache_size: key.cache_size.get(),
            mode: key.mode.as_str().to_string(),
            saves: stats.saves,
            lookups: stats.lookups,
            cache_hits: stats.cache_hits,
            store_fallbacks: stats.store_fallbacks,
            not_found: stats.not_found,
            hit_rate: stats.hit_rate(),
            searches: stats.searches,
            documents_matched: stats.documents_matched,
            evictions: stats.evictions,
            stored_documents: stats.stored_documents,
            elapsed_ms: stats.elapsed.as_millis(),
            save_avg_ns: stats.latency.save.avg_ns(),
            find_avg_ns: stats.latency.find.avg_ns(),
            find_p99_ns: stats.latency.find.p99_ns,
            search_avg_ns: stats.latency.search.avg_ns(),
        })
        .collect()
}

/// Exports results to a CSV file
pub fn export_csv(result: &SimulationResult, path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in csv_rows(result) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunStats, SimulationKey};
    use std::num::NonZeroUsize;
    use std::time::Duration;

    fn result() -> SimulationResult {
        let key = |n, mode| SimulationKey::new(NonZeroUsize::new(n).unwrap(), mode);
        SimulationResult {
            runs: vec![
                (
                    key(100, ManagerMode::Sequential),
                    RunStats {
                        lookups: 10,
                        cache_hits: 9,
                        ..RunStats::default()
                    },
                ),
                (
                    key(10, ManagerMode::Sequential),
                    RunStats {
                        lookups: 10,
                        cache_hits: 2,
                        ..RunStats::default()
                    },
                ),
            ],
            total_requests: 20,
            unique_keys: 10,
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_rows_sorted_by_cache_size() {
        let rows = csv_rows(&result());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cache_size, 10);
        assert_eq!(rows[0].hit_rate, 20.0);
        assert_eq!(rows[1].cache_size, 100);
        assert_eq!(rows[1].hit_rate, 90.0);
    }

    #[test]
    fn test_export_csv() {
        let dir = std::env::temp_dir().join("docstore_stats_test_export");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("results.csv");

        export_csv(&result(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("cache_size,mode,saves,lookups,cache_hits"));
        assert_eq!(text.lines().count(), 3);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
