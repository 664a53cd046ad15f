// Table Storage Module
use std::path::Path;

use polars::{io::parquet::write::StatisticsOptions, prelude::*};

/// How `TableStore::write` treats an existing table at the target location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail if the target already exists.
    Error,
    /// Add rows to the existing table, matching columns by name.
    #[default]
    Append,
    /// Replace the existing contents.
    Overwrite,
    /// Leave an existing table untouched; create it otherwise.
    Ignore,
}

/// Storage seam for the generator and the as-of reader.
///
/// `scan` must be lazy: no row data is read until the caller collects the
/// returned plan. Failures from the underlying format propagate unchanged.
pub trait TableStore {
    fn scan(&self, location: &Path) -> PolarsResult<LazyFrame>;
    fn write(&self, table: &DataFrame, location: &Path, mode: WriteMode) -> PolarsResult<()>;
}

/// A table store backed by a single snappy-compressed parquet file per table.
pub struct ParquetStore;

impl ParquetStore {
    fn read(path: &Path) -> PolarsResult<DataFrame> {
        Ok(ParquetReader::new(std::fs::File::open(path)?)
            .use_statistics(true)
            .finish()?)
    }

    fn write_file(df: &DataFrame, path: &Path) -> PolarsResult<()> {
        let file = std::fs::File::create(path)?;

        ParquetWriter::new(file)
            .with_statistics(StatisticsOptions::full())
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut df.clone())?;

        Ok(())
    }
}

impl TableStore for ParquetStore {
    fn scan(&self, location: &Path) -> PolarsResult<LazyFrame> {
        LazyFrame::scan_parquet(location, ScanArgsParquet::default())
    }

    fn write(&self, table: &DataFrame, location: &Path, mode: WriteMode) -> PolarsResult<()> {
        let exists = std::fs::exists(location)?;

        match mode {
            WriteMode::Error if exists => Err(PolarsError::ComputeError(
                format!("table already exists at {}", location.display()).into(),
            )),
            WriteMode::Ignore if exists => Ok(()),
            WriteMode::Append if exists => {
                let src = Self::read(location)?;
                let stacked = src.vstack(&table.select(src.get_column_names_str())?)?;
                Self::write_file(&stacked, location)
            }
            _ => Self::write_file(table, location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample() -> DataFrame {
        df!(
            "a" => [1i64, 2, 3],
            "b" => ["x", "y", "z"],
        )
        .unwrap()
    }

    fn read_back(store: &ParquetStore, path: &Path) -> DataFrame {
        store.scan(path).unwrap().collect().unwrap()
    }

    #[test]
    fn append_creates_then_grows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("table.parquet");
        let store = ParquetStore;

        store.write(&sample(), &path, WriteMode::Append).unwrap();
        assert_eq!(read_back(&store, &path).height(), 3);

        store.write(&sample(), &path, WriteMode::Append).unwrap();
        assert_eq!(read_back(&store, &path).height(), 6);
    }

    #[test]
    fn append_matches_columns_by_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("table.parquet");
        let store = ParquetStore;

        store.write(&sample(), &path, WriteMode::Append).unwrap();

        // Reordered columns still land under the right names.
        let reordered = df!(
            "b" => ["p"],
            "a" => [9i64],
        )
        .unwrap();
        store.write(&reordered, &path, WriteMode::Append).unwrap();

        let out = read_back(&store, &path);
        assert_eq!(out.get_column_names_str(), vec!["a", "b"]);
        assert_eq!(out.height(), 4);
    }

    #[test]
    fn overwrite_replaces_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("table.parquet");
        let store = ParquetStore;

        store.write(&sample(), &path, WriteMode::Append).unwrap();

        let smaller = df!(
            "a" => [7i64],
            "b" => ["q"],
        )
        .unwrap();
        store.write(&smaller, &path, WriteMode::Overwrite).unwrap();

        assert!(read_back(&store, &path).equals(&smaller));
    }

    #[test]
    fn error_mode_fails_on_existing_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("table.parquet");
        let store = ParquetStore;

        store.write(&sample(), &path, WriteMode::Error).unwrap();
        assert!(store.write(&sample(), &path, WriteMode::Error).is_err());
    }

    #[test]
    fn ignore_mode_leaves_existing_table_untouched() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("table.parquet");
        let store = ParquetStore;

        store.write(&sample(), &path, WriteMode::Ignore).unwrap();

        let other = df!(
            "a" => [42i64],
            "b" => ["w"],
        )
        .unwrap();
        store.write(&other, &path, WriteMode::Ignore).unwrap();

        assert!(read_back(&store, &path).equals(&sample()));
    }
}
