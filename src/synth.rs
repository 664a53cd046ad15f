// Synthetic Data Module
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use polars::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, LogNormal};

/// Region codes sampled uniformly into the `state` column.
const STATES: [&str; 12] = [
    "AZ", "CA", "CO", "FL", "GA", "IL", "NY", "OH", "PA", "TX", "WA", "WI",
];

const SEXES: [&str; 2] = ["M", "F"];

/// Parameters for [`create_random_data`].
///
/// Report delays are lognormal in days, so `report_date >= event_date` holds
/// for every generated row.
#[derive(Clone, Debug)]
pub struct RandomDataSpec {
    pub rows: usize,
    pub seed: u64,
    pub events_start: NaiveDate,
    pub events_end: NaiveDate,
    pub delay_mean: f64,
    pub delay_std: f64,
    /// Ingestion timestamp stamped on every row. With `None` the wall clock
    /// is used, which makes `received_on` the one column that is not
    /// reproducible from `seed`; pin it for fully deterministic output.
    pub received_on: Option<NaiveDateTime>,
}

impl Default for RandomDataSpec {
    fn default() -> Self {
        Self {
            rows: 1_000,
            seed: 123,
            events_start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            events_end: NaiveDate::from_ymd_opt(2022, 12, 1).unwrap(),
            delay_mean: 2.0,
            delay_std: 0.75,
            received_on: None,
        }
    }
}

/// Creates a table of `spec.rows` simulated report records.
///
/// Columns: `event_date`, `report_date`, `received_on`, `sex`, `age`,
/// `state`, `value`. The result is sorted by `(event_date, report_date)`.
pub fn create_random_data(spec: &RandomDataSpec) -> PolarsResult<DataFrame> {
    let window_days = (spec.events_end - spec.events_start).num_days();
    if window_days <= 0 {
        return Err(PolarsError::ComputeError(
            format!(
                "event window {}..{} spans no days",
                spec.events_start, spec.events_end
            )
            .into(),
        ));
    }

    let mut rng = SmallRng::seed_from_u64(spec.seed);
    let delay_dist = LogNormal::new(spec.delay_mean, spec.delay_std)
        .map_err(|e| PolarsError::ComputeError(format!("invalid report delay distribution: {e}").into()))?;
    let value_dist = LogNormal::new(10.0, 2.0)
        .map_err(|e| PolarsError::ComputeError(format!("invalid value distribution: {e}").into()))?;

    // Event dates are uniform over the window; report dates add a lognormal
    // delay floored to whole days.
    let event_dates: Vec<NaiveDate> = (0..spec.rows)
        .map(|_| spec.events_start + Duration::days(rng.random_range(0..window_days)))
        .collect();
    let report_dates: Vec<NaiveDate> = event_dates
        .iter()
        .map(|d| *d + Duration::days(delay_dist.sample(&mut rng) as i64))
        .collect();

    let sexes: Vec<&str> = (0..spec.rows)
        .map(|_| SEXES[rng.random_range(0..SEXES.len())])
        .collect();
    let ages: Vec<i64> = (0..spec.rows).map(|_| rng.random_range(0..110)).collect();
    let states: Vec<&str> = (0..spec.rows)
        .map(|_| STATES[rng.random_range(0..STATES.len())])
        .collect();
    let values: Vec<i64> = (0..spec.rows)
        .map(|_| value_dist.sample(&mut rng) as i64)
        .collect();

    let received = spec.received_on.unwrap_or_else(|| Utc::now().naive_utc());

    let df = DataFrame::new(vec![
        DateChunked::from_naive_date(PlSmallStr::from_str("event_date"), event_dates)
            .into_series()
            .into_column(),
        DateChunked::from_naive_date(PlSmallStr::from_str("report_date"), report_dates)
            .into_series()
            .into_column(),
        DatetimeChunked::from_naive_datetime(
            PlSmallStr::from_str("received_on"),
            vec![received; spec.rows],
            TimeUnit::Milliseconds,
        )
        .into_series()
        .into_column(),
        Column::new(PlSmallStr::from_str("sex"), sexes),
        Column::new(PlSmallStr::from_str("age"), ages),
        Column::new(PlSmallStr::from_str("state"), states),
        Column::new(PlSmallStr::from_str("value"), values),
    ])?;

    df.lazy()
        .with_columns([
            col("sex").cast(DataType::Categorical(None, Default::default())),
            col("state").cast(DataType::Categorical(None, Default::default())),
        ])
        .sort(["event_date", "report_date"], SortMultipleOptions::default())
        .collect()
}
