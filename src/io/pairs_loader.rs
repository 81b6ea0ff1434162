use std::fs;
use std::path::Path;
use serde::Deserialize;
use log::{info,debug};

use crate::io::{csv_error,csv_reader,record_line};
use crate::{PoseGraphError,Result};

/// Index pairs in file order with the line each came from.
#[derive(Debug,Clone,PartialEq)]
pub struct PairList {
    pub origin: String,
    pub pairs: Vec<(i64,i64)>,
    pub lines: Vec<usize>
}

impl PairList {
    pub fn describe(&self, pair_idx: usize) -> String {
        match self.lines.get(pair_idx) {
            Some(line) => format!("{}:{}", self.origin, line),
            None => format!("pair {}", pair_idx)
        }
    }
}

#[derive(Debug,Deserialize)]
struct PairRow(i64, i64);

pub fn load_pairs(file_path: &Path) -> Result<PairList> {
    info!("Loading pairs from: {}", file_path.display());
    let contents = fs::read_to_string(file_path).map_err(|e| PoseGraphError::io(file_path, e))?;
    parse_pairs(&contents, &file_path.display().to_string())
}

/**
 * Header row followed by two integer columns. Indices are kept signed and in file order;
 * range checks happen against the pose sequence when the graph is built.
 */
pub fn parse_pairs(contents: &str, origin: &str) -> Result<PairList> {
    let mut reader = csv_reader(contents);
    let header = reader.headers().map_err(|e| csv_error(e, origin, None))?;
    match header.len() {
        0 => return Err(PoseGraphError::format(origin, 1, "missing header row")),
        2 => (),
        n => return Err(PoseGraphError::format(origin, 1, format!("expected 2 columns, found {}", n)))
    };

    let mut pairs = Vec::<(i64,i64)>::new();
    let mut lines = Vec::<usize>::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(e, origin, None))?;
        let PairRow(a, b) = record.deserialize(None).map_err(|e| csv_error(e, origin, Some(&record)))?;
        pairs.push((a, b));
        lines.push(record_line(&record));
    }
    debug!("Parsed {} pairs from {}", pairs.len(), origin);

    Ok(PairList { origin: origin.to_string(), pairs, lines })
}
