// As-of Query Module
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;

use crate::store::TableStore;

/// Reconstructs the table at `location` as it was known on `cutoff_date`.
///
/// Reports published after `cutoff_date` are invisible. Within each group
/// defined by `grouping_columns`, only the most recently published visible
/// report survives; if several reports in a group share that same report
/// date, all of them are returned. The plan is sorted by `grouping_columns`
/// in the order given.
///
/// The returned [`LazyFrame`] is not materialized; no I/O happens until the
/// caller collects it, and an unknown grouping column or an invalid location
/// surfaces as the engine's own error at that point.
pub fn read_as_of(
    store: &dyn TableStore,
    location: &Path,
    cutoff_date: NaiveDate,
    grouping_columns: &[&str],
) -> PolarsResult<LazyFrame> {
    if grouping_columns.is_empty() {
        return Err(PolarsError::ComputeError(
            "grouping_columns must not be empty".into(),
        ));
    }

    // Dates cast to Int32 are plain day counts since the epoch.
    let cutoff_days = (cutoff_date - NaiveDate::default()).num_days() as i32;
    let groups: Vec<Expr> = grouping_columns.iter().map(|c| col(*c)).collect();
    let sort_by: Vec<PlSmallStr> = grouping_columns
        .iter()
        .map(|c| PlSmallStr::from_str(c))
        .collect();

    Ok(store
        .scan(location)?
        .with_column(
            (lit(cutoff_days) - col("report_date").cast(DataType::Int32)).alias("age_of_report"),
        )
        .filter(col("age_of_report").gt_eq(lit(0)))
        .filter(col("age_of_report").eq(col("age_of_report").min().over(groups)))
        .drop(["age_of_report"])
        .sort(sort_by, SortMultipleOptions::default()))
}
