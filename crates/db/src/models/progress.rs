//! Rows feeding the progress aggregation.

use shotboard_core::progress::ProgressSample;
use shotboard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Latest validated total of a shot within one truncated time bucket.
#[derive(Debug, Clone, FromRow)]
pub struct ProgressSampleRow {
    pub bucket: Timestamp,
    pub total: i32,
    pub shot_id: DbId,
}

impl From<ProgressSampleRow> for ProgressSample {
    fn from(row: ProgressSampleRow) -> Self {
        ProgressSample {
            bucket: row.bucket,
            shot_id: row.shot_id,
            total: i64::from(row.total),
        }
    }
}
