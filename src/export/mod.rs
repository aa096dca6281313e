//! Plain text renderings of the attendance collection meant to leave the application, and the
//! way back in.

pub mod delimited;

use chrono::NaiveDate;

use crate::utils::time::date_to_record_name;

/// Suggested name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("attendance-{}.csv", date_to_record_name(date))
}
