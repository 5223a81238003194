//! Reading workload files.
//!
//! A workload is a CSV file with an `op,key,title,content,author` header, as
//! written by [`write_workload`](crate::generator::write_workload). Lines
//! that fail to parse are reported with their record number.

use crate::models::Request;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a workload
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("failed to open workload {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid request at record {record}: {source}")]
    Parse {
        record: usize,
        #[source]
        source: csv::Error,
    },
    #[error("workload {0} contains no requests")]
    Empty(PathBuf),
}

/// Reader for workload files
#[derive(Debug)]
pub struct WorkloadReader {
    path: PathBuf,
}

impl WorkloadReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads every request, in file order.
    pub fn read_all(&self) -> Result<Vec<Request>, WorkloadError> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|source| WorkloadError::Open {
            path: self.path.clone(),
            source,
        })?;

        let mut requests = Vec::new();
        for (i, row) in reader.deserialize::<Request>().enumerate() {
            let request = row.map_err(|source| WorkloadError::Parse {
                record: i + 1,
                source,
            })?;
            requests.push(request);
        }

        if requests.is_empty() {
            return Err(WorkloadError::Empty(self.path.clone()));
        }
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::write_workload;
    use crate::models::Op;
    use std::fs;

    fn temp_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("docstore_input_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir.join("workload.csv")
    }

    #[test]
    fn test_read_written_workload() {
        let path = temp_file("roundtrip");
        let written = vec![
            Request::save("doc-1", "ABC Title", "body, with comma", "author-1"),
            Request::find("doc-1"),
            Request::search("author-1"),
        ];
        write_workload(&path, &written).unwrap();

        let read = WorkloadReader::new(&path).read_all().unwrap();
        assert_eq!(read, written);
        assert_eq!(read[0].content, "body, with comma");
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let path = temp_file("unknown_op");
        fs::write(&path, "op,key,title,content,author\nfind,doc-1,,,\ndelete,doc-1,,,\n").unwrap();

        let err = WorkloadReader::new(&path).read_all().unwrap_err();
        assert!(matches!(err, WorkloadError::Parse { record: 2, .. }));
    }

    #[test]
    fn test_empty_workload() {
        let path = temp_file("empty");
        fs::write(&path, "op,key,title,content,author\n").unwrap();
        assert!(matches!(
            WorkloadReader::new(&path).read_all(),
            Err(WorkloadError::Empty(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = temp_file("missing").with_file_name("nope.csv");
        assert!(matches!(
            WorkloadReader::new(&path).read_all(),
            Err(WorkloadError::Open { .. })
        ));
    }

    #[test]
    fn test_find_row_parses() {
        let path = temp_file("find_row");
        fs::write(&path, "op,key,title,content,author\nfind,doc-9,,,\n").unwrap();
        let read = WorkloadReader::new(&path).read_all().unwrap();
        assert_eq!(read[0].op, Op::Find);
        assert_eq!(read[0].key, "doc-9");
        assert!(read[0].title.is_empty());
    }
}
