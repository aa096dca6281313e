//! Everything derived from stored records: worked hours of a single day, the state a day is in
//! and totals over weeks and months.

pub mod aggregation;
pub mod day_status;
pub mod hours;
