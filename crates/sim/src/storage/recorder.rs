//! Append-only TSV report files.
//!
//! The header is written when the file is created; every appended row is
//! flushed immediately, so the rows already written remain valid if the run
//! stops early (for example on extinction).

use crate::errors::StorageError;
use csv::{Terminator, WriterBuilder};
use log::debug;
use std::fmt::Display;
use std::fs::File;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A typed report row with its TSV serialization.
pub trait TsvRecord {
    /// Column values, in header order.
    fn fields(&self) -> Vec<String>;
}

/// Join values into one comma-separated column.
pub fn join_values<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    let mut out = String::new();
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&v.to_string());
    }
    out
}

/// Writer for one report file holding rows of type `T`.
pub struct ReportWriter<T> {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: u64,
    _record: PhantomData<fn(&T)>,
}

impl<T: TsvRecord> ReportWriter<T> {
    /// Create (or truncate) the file at `path` and write the header.
    pub fn create<S: AsRef<str>>(path: impl AsRef<Path>, header: &[S]) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let create_err = |source| StorageError::Create {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(create_err)?;
        }
        let file = File::create(&path).map_err(create_err)?;
        let writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);

        let mut writer = Self {
            path,
            writer,
            rows: 0,
            _record: PhantomData,
        };
        let header: Vec<&str> = header.iter().map(AsRef::as_ref).collect();
        writer.write_record(&header)?;
        debug!("Created report {}", writer.path.display());
        Ok(writer)
    }

    /// Append one row and flush it to disk.
    ///
    /// Rows must have as many fields as the header.
    pub fn append(&mut self, record: &T) -> Result<(), StorageError> {
        self.write_record(record.fields())?;
        self.rows += 1;
        Ok(())
    }

    /// Number of rows appended (header excluded).
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record<I>(&mut self, fields: I) -> Result<(), StorageError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let write_err = |source| StorageError::Write {
            path: self.path.display().to_string(),
            source,
        };
        self.writer.write_record(fields).map_err(write_err)?;
        self.writer
            .flush()
            .map_err(|e| write_err(csv::Error::from(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        generation: u64,
        values: Vec<f64>,
    }

    impl TsvRecord for Row {
        fn fields(&self) -> Vec<String> {
            vec![self.generation.to_string(), join_values(&self.values)]
        }
    }

    #[test]
    fn test_header_written_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_test.tsv");
        let writer = ReportWriter::<Row>::create(&path, &["generation", "values"]).unwrap();
        assert_eq!(writer.rows_written(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "generation\tvalues\n");
    }

    #[test]
    fn test_rows_flushed_on_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("run_test.tsv");
        let mut writer = ReportWriter::create(&path, &["generation", "values"]).unwrap();
        writer
            .append(&Row {
                generation: 4,
                values: vec![0.5, 1.0],
            })
            .unwrap();
        // Still open: the row must already be on disk.
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "generation\tvalues\n4\t0.5,1\n");
        assert_eq!(writer.rows_written(), 1);
    }

    #[test]
    fn test_row_width_must_match_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_test.tsv");
        let mut writer = ReportWriter::create(&path, &["generation", "values", "extra"]).unwrap();
        let result = writer.append(&Row {
            generation: 1,
            values: vec![],
        });
        assert!(matches!(result, Err(StorageError::Write { .. })));
        assert_eq!(writer.rows_written(), 0);
    }

    #[test]
    fn test_empty_list_column_stays_unquoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_test.tsv");
        let mut writer = ReportWriter::create(&path, &["generation", "values"]).unwrap();
        writer
            .append(&Row {
                generation: 2,
                values: vec![],
            })
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "generation\tvalues\n2\t\n");
    }

    #[test]
    fn test_join_values() {
        assert_eq!(join_values([1, 2, 3]), "1,2,3");
        assert_eq!(join_values(Vec::<u8>::new()), "");
    }

    #[test]
    fn test_create_in_missing_root_fails() {
        let result = ReportWriter::<Row>::create("/proc/purgesim/forbidden.tsv", &["a"]);
        assert!(matches!(result, Err(StorageError::Create { .. })));
    }
}
