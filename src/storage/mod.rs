//!  Storage is organized through [repository::AttendanceRepository].
//!  The basic idea is:
//!   - Anything persisted goes through a flat [key_value::KeyValueStore].
//!   - All records live as one JSON array under a single key and are rewritten together.
//!   - There is exactly one record per day, keyed by the `YYYY-MM-DD` date.
//!   - The display name lives under its own key.

pub mod entities;
pub mod file_store;
pub mod key_value;
pub mod profile;
pub mod repository;
