//! Utilities for time-versioned report tables: a seeded synthetic data
//! generator, a parquet-backed table store with delta-style write modes, and
//! a lazy as-of reader that reconstructs the latest-known view of the data at
//! a given cutoff date.

mod asof;
mod store;
mod synth;

pub use asof::read_as_of;
pub use store::{ParquetStore, TableStore, WriteMode};
pub use synth::{RandomDataSpec, create_random_data};
