//! Synthetic workload generation.
//!
//! Keys are split into a popular set and a regular set. A configurable share
//! of traffic goes to the popular keys, so that cache sizes smaller than the
//! key space still see a meaningful hit rate. The first time a key is drawn it
//! is saved; afterwards it is looked up, updated or searched for according to
//! the configured mix.

use crate::models::{Op, Request};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const TITLE_PREFIXES: [&str; 4] = ["ABC", "XYZ", "QRS", "LMN"];

/// Parameters for generating a workload
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Total number of requests
    pub requests: usize,
    /// Number of distinct document keys
    pub unique_documents: u32,
    /// Percentage of traffic addressed to popular documents
    pub popular_traffic_percent: u8,
    /// Percentage of documents that are popular
    pub popular_documents_percent: u8,
    /// Percentage of requests on known documents that re-save them
    pub update_percent: u8,
    /// Percentage of requests that are searches
    pub search_percent: u8,
    /// Number of distinct authors
    pub authors: u32,
    /// RNG seed for reproducible workloads
    pub seed: Option<u64>,
    /// Output file
    pub output: PathBuf,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            requests: 100_000,
            unique_documents: 10_000,
            popular_traffic_percent: 80,
            popular_documents_percent: 20,
            update_percent: 10,
            search_percent: 1,
            authors: 50,
            seed: None,
            output: PathBuf::from("workload.csv"),
        }
    }
}

/// Generator for synthetic workloads
#[derive(Debug)]
pub struct WorkloadGenerator {
    config: WorkloadConfig,
}

impl WorkloadGenerator {
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }

    /// Builds the request sequence in memory.
    pub fn requests(&self) -> Vec<Request> {
        let config = &self.config;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let unique = config.unique_documents.max(1);
        let popular = ((unique as f64 * config.popular_documents_percent as f64 / 100.0) as u32)
            .clamp(1, unique);
        let regular = unique - popular;
        let authors = config.authors.max(1);

        let popular_probability = config.popular_traffic_percent as f64 / 100.0;
        let search_probability = config.search_percent as f64 / 100.0;
        let update_probability = config.update_percent as f64 / 100.0;

        let mut saved = HashSet::new();
        let mut requests = Vec::with_capacity(config.requests);

        for _ in 0..config.requests {
            if rng.gen::<f64>() < search_probability {
                let author = rng.gen_range(0..authors);
                requests.push(Request::search(format!("author-{author}")));
                continue;
            }

            let index = if regular == 0 || rng.gen::<f64>() < popular_probability {
                rng.gen_range(0..popular)
            } else {
                popular + rng.gen_range(0..regular)
            };
            let key = format!("doc-{index}");

            let op = if saved.insert(index) || rng.gen::<f64>() < update_probability {
                Op::Save
            } else {
                Op::Find
            };

            requests.push(match op {
                Op::Save => {
                    let prefix = TITLE_PREFIXES[index as usize % TITLE_PREFIXES.len()];
                    Request::save(
                        key,
                        format!("{prefix} Document {index}"),
                        format!("Body of document {index}, revision {}", rng.gen::<u16>()),
                        format!("author-{}", index % authors),
                    )
                }
                _ => Request::find(key),
            });
        }

        requests
    }

    /// Writes the workload to the configured output file.
    pub fn generate(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let requests = self.requests();
        write_workload(&self.config.output, &requests)?;
        info!(
            requests = requests.len(),
            path = %self.config.output.display(),
            "workload written"
        );
        Ok(self.config.output.clone())
    }
}

/// Writes requests as CSV with an `op,key,title,content,author` header.
pub fn write_workload(path: &Path, requests: &[Request]) -> Result<(), csv::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for request in requests {
        writer.serialize(request)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(requests: usize) -> WorkloadConfig {
        WorkloadConfig {
            requests,
            unique_documents: 1000,
            seed: Some(7),
            ..WorkloadConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = WorkloadConfig::default();
        assert_eq!(config.unique_documents, 10_000);
        assert_eq!(config.popular_traffic_percent, 80);
        assert_eq!(config.popular_documents_percent, 20);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_request_count() {
        let requests = WorkloadGenerator::new(config(5000)).requests();
        assert_eq!(requests.len(), 5000);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = WorkloadGenerator::new(config(2000)).requests();
        let b = WorkloadGenerator::new(config(2000)).requests();
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_reference_is_a_save() {
        let requests = WorkloadGenerator::new(config(5000)).requests();
        let mut saved = HashSet::new();
        for request in &requests {
            match request.op {
                Op::Save => {
                    saved.insert(request.key.clone());
                }
                Op::Find => assert!(saved.contains(&request.key), "find before save"),
                Op::Search => assert!(request.author.starts_with("author-")),
            }
        }
    }

    #[test]
    fn test_keys_within_bounds() {
        let requests = WorkloadGenerator::new(config(5000)).requests();
        for request in requests.iter().filter(|r| r.op != Op::Search) {
            let n: u32 = request.key["doc-".len()..].parse().unwrap();
            assert!(n < 1000);
        }
    }

    #[test]
    fn test_popular_documents_get_most_traffic() {
        let requests = WorkloadGenerator::new(config(20_000)).requests();
        let mut counts: HashMap<bool, usize> = HashMap::new();
        for request in requests.iter().filter(|r| r.op != Op::Search) {
            let n: u32 = request.key["doc-".len()..].parse().unwrap();
            *counts.entry(n < 200).or_default() += 1;
        }
        let popular = counts.get(&true).copied().unwrap_or(0) as f64;
        let total = popular + counts.get(&false).copied().unwrap_or(0) as f64;
        let share = popular / total;
        assert!(share > 0.75 && share < 0.85, "popular share {share}");
    }

    #[test]
    fn test_single_document() {
        let requests = WorkloadGenerator::new(WorkloadConfig {
            requests: 100,
            unique_documents: 1,
            search_percent: 0,
            seed: Some(1),
            ..WorkloadConfig::default()
        })
        .requests();
        assert!(requests.iter().all(|r| r.key == "doc-0"));
        assert_eq!(requests[0].op, Op::Save);
    }

    #[test]
    fn test_write_workload_has_header() {
        let dir = std::env::temp_dir().join("docstore_generator_test_header");
        let path = dir.join("workload.csv");
        let _ = fs::remove_dir_all(&dir);

        write_workload(&path, &[Request::find("doc-1"), Request::search("author-2")]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("op,key,title,content,author"));
        assert_eq!(lines.next(), Some("find,doc-1,,,"));
        assert_eq!(lines.next(), Some("search,,,,author-2"));

        let _ = fs::remove_dir_all(&dir);
    }
}
