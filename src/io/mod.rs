use std::path::Path;
use std::io::{BufWriter,Write};
use std::str::FromStr;
use csv::{ErrorKind,ReaderBuilder,StringRecord,Trim};
use tempfile::NamedTempFile;

use crate::{Float,PoseGraphError,Result};

pub mod arposes_loader;
pub mod pairs_loader;


pub fn parse_to_float(value: &str, origin: &str, line: usize) -> Result<Float> {
    parse_field::<Float>(value, origin, line, "number")
}

pub fn parse_field<T: FromStr>(value: &str, origin: &str, line: usize, expected: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| PoseGraphError::format(origin, line, format!("expected {}, found '{}'", expected, value.trim())))
}

/**
 * Comma separated reader with a header row. Fields are trimmed, quotes are honoured and
 * every row must have as many columns as the header.
 */
pub fn csv_reader(contents: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(false)
        .from_reader(contents.as_bytes())
}

pub fn record_line(record: &StringRecord) -> usize {
    record.position().map(|p| p.line() as usize).unwrap_or(0)
}

/**
 * Maps a csv error onto a format error at its line. `record` is the row being deserialized, if any,
 * and is used to quote the offending value.
 */
pub fn csv_error(err: csv::Error, origin: &str, record: Option<&StringRecord>) -> PoseGraphError {
    let line = err.position().map(|p| p.line() as usize).or(record.map(record_line)).unwrap_or(0);
    match err.kind() {
        ErrorKind::UnequalLengths { expected_len, len, .. } => PoseGraphError::format(origin, line, format!("expected {} columns, found {}", expected_len, len)),
        ErrorKind::Deserialize { err: de_err, .. } => {
            let value = de_err.field().and_then(|f| record.and_then(|r| r.get(f as usize)));
            match value {
                Some(value) => PoseGraphError::format(origin, line, format!("column {}: unexpected value '{}'", de_err.field().unwrap_or(0) + 1, value)),
                None => PoseGraphError::format(origin, line, de_err.to_string())
            }
        },
        _ => PoseGraphError::format(origin, line, err.to_string())
    }
}

/**
 * Writes into a temporary file next to `path` and moves it into place only once `write` succeeded.
 * On any error the destination is left untouched.
 */
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()> where F: FnOnce(&mut dyn Write) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new(".")
    };

    let temp_file = NamedTempFile::new_in(dir).map_err(|e| PoseGraphError::io(path, e))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        write(&mut writer).map_err(|e| PoseGraphError::io(path, e))?;
        writer.flush().map_err(|e| PoseGraphError::io(path, e))?;
    }
    temp_file.persist(path).map_err(|e| PoseGraphError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn unequal_row_is_reported_at_its_line() {
        let mut reader = csv_reader("a,b\n1,2\n\n1,2,3\n");
        let err = reader.records().find_map(|r| r.err()).unwrap();
        let err = csv_error(err, "pairs.txt", None);
        assert_eq!(err.to_string(), "pairs.txt:4: expected 2 columns, found 3");
    }

    #[test]
    fn quoted_fields_are_unquoted_and_trimmed() {
        let mut reader = csv_reader("\"a\",b\n\"3\",\"10\"\n 4 , 5\n");
        assert_eq!(reader.headers().unwrap().iter().collect::<Vec<&str>>(), vec!["a", "b"]);
        let records = reader.records().collect::<std::result::Result<Vec<StringRecord>, csv::Error>>().unwrap();
        assert_eq!(records[0].iter().collect::<Vec<&str>>(), vec!["3", "10"]);
        assert_eq!(records[1].iter().collect::<Vec<&str>>(), vec!["4", "5"]);
        assert_eq!(record_line(&records[1]), 3);
    }

    #[test]
    fn failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.g2o");
        let result = write_atomically(&path, |w| {
            writeln!(w, "partial")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
        });
        assert!(result.is_err());
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn successful_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();
        write_atomically(&path, |w| write!(w, "new")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
