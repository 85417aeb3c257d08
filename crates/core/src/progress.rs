//! Project progress aggregation.
//!
//! Turns the validation history of a project's shots into a time series of
//! validated frame counts and completion ratios, and merges several project
//! series into one chart-ready series with an optional cross-project average.

use std::collections::{BTreeMap, HashMap};

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Label of the cross-project average pseudo-project.
pub const DEFAULT_AVERAGE_KEY: &str = "AVERAGE";

/// Last hour the trailing "now" point may be placed at.
const LAST_HOUR_OF_DAY: u32 = 23;

// ---------------------------------------------------------------------------
// Time buckets
// ---------------------------------------------------------------------------

/// Truncation granularity used to group validation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    Year,
    Month,
    #[default]
    Day,
    Hour,
    Minute,
    Second,
    Microsecond,
}

impl TimeBucket {
    /// Parse a granularity name, falling back to [`TimeBucket::Day`] for
    /// anything unrecognised.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("year") => Self::Year,
            Some("month") => Self::Month,
            Some("day") => Self::Day,
            Some("hour") => Self::Hour,
            Some("minute") => Self::Minute,
            Some("second") => Self::Second,
            Some("microsecond") => Self::Microsecond,
            _ => Self::Day,
        }
    }

    /// Field name understood by PostgreSQL `date_trunc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Microsecond => "microsecond",
        }
    }
}

// ---------------------------------------------------------------------------
// Single project
// ---------------------------------------------------------------------------

/// The latest validated total of one shot within one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSample {
    pub bucket: Timestamp,
    pub shot_id: DbId,
    pub total: i64,
}

/// Validated frames of a project as of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub date: Timestamp,
    pub total: i64,
    pub progress: f64,
}

/// Ratio of validated frames to the project's frame count.
///
/// A project without frames has nothing to validate and reports `0.0`.
pub fn progress_ratio(total: i64, project_frames: i64) -> f64 {
    if project_frames <= 0 {
        return 0.0;
    }
    total as f64 / project_frames as f64
}

/// Accumulate per-shot samples into a cumulative series.
///
/// Each bucket's total is the sum, over all shots, of the most recent total
/// known for that shot at or before the bucket. Shots without any record yet
/// contribute nothing. Output is ascending by bucket, one point per distinct
/// bucket present in `samples`.
pub fn accumulate_progress(samples: &[ProgressSample], project_frames: i64) -> Vec<ProgressPoint> {
    let mut ordered: Vec<&ProgressSample> = samples.iter().collect();
    ordered.sort_by_key(|s| (s.bucket, s.shot_id));

    let mut known: HashMap<DbId, i64> = HashMap::new();
    let mut running_total: i64 = 0;
    let mut points: Vec<ProgressPoint> = Vec::new();

    for sample in ordered {
        let previous = known.insert(sample.shot_id, sample.total).unwrap_or(0);
        running_total += sample.total - previous;

        match points.last_mut() {
            Some(point) if point.date == sample.bucket => point.total = running_total,
            _ => points.push(ProgressPoint {
                date: sample.bucket,
                total: running_total,
                progress: 0.0,
            }),
        }
    }

    for point in &mut points {
        point.progress = progress_ratio(point.total, project_frames);
    }
    points
}

/// Date of the trailing point: the top of the next hour, capped at 23:00 of
/// the current day.
pub fn trailing_point_date(now: Timestamp) -> Timestamp {
    let hour = (now.hour() + 1).min(LAST_HOUR_OF_DAY);
    now.date_naive()
        .and_hms_opt(hour, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}

/// Extend a series to the present by repeating its last values at
/// [`trailing_point_date`].
///
/// Nothing is appended to an empty series, nor when the trailing date would
/// not be strictly after the last point.
pub fn with_trailing_point(mut points: Vec<ProgressPoint>, now: Timestamp) -> Vec<ProgressPoint> {
    if let Some(last) = points.last().copied() {
        let date = trailing_point_date(now);
        if date > last.date {
            points.push(ProgressPoint { date, ..last });
        }
    }
    points
}

/// Full progress series of one project as served to charts.
pub fn project_progress(
    samples: &[ProgressSample],
    project_frames: i64,
    now: Timestamp,
) -> Vec<ProgressPoint> {
    with_trailing_point(accumulate_progress(samples, project_frames), now)
}

// ---------------------------------------------------------------------------
// Several projects
// ---------------------------------------------------------------------------

/// One project's values within a merged bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectProgress {
    pub total: i64,
    pub progress: f64,
}

/// A bucket of the merged multi-project series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectsProgressPoint {
    pub date: Timestamp,
    pub projects: BTreeMap<String, ProjectProgress>,
}

/// Merge per-project series into one series keyed by bucket date.
pub fn merge_projects_progress(
    series: Vec<(String, Vec<ProgressPoint>)>,
) -> Vec<ProjectsProgressPoint> {
    let mut by_date: BTreeMap<Timestamp, BTreeMap<String, ProjectProgress>> = BTreeMap::new();
    for (name, points) in series {
        for point in points {
            by_date.entry(point.date).or_default().insert(
                name.clone(),
                ProjectProgress {
                    total: point.total,
                    progress: point.progress,
                },
            );
        }
    }

    by_date
        .into_iter()
        .map(|(date, projects)| ProjectsProgressPoint { date, projects })
        .collect()
}

/// Add an `average_key` entry to every bucket.
///
/// Projects carry their last known values forward into buckets where they
/// have no point. The average's `progress` is the mean of the known ratios
/// and its `total` the sum of the known totals.
///
/// If a project is itself named `average_key`, the series is left untouched
/// and `false` is returned.
pub fn annotate_average(points: &mut [ProjectsProgressPoint], average_key: &str) -> bool {
    if points.iter().any(|p| p.projects.contains_key(average_key)) {
        return false;
    }

    let mut known: BTreeMap<String, ProjectProgress> = BTreeMap::new();

    for point in points.iter_mut() {
        for (name, values) in &point.projects {
            known.insert(name.clone(), *values);
        }
        if known.is_empty() {
            continue;
        }

        let progress = known.values().map(|v| v.progress).sum::<f64>() / known.len() as f64;
        let total = known.values().map(|v| v.total).sum();
        point
            .projects
            .insert(average_key.to_string(), ProjectProgress { total, progress });
    }
    true
}
