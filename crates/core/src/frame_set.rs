//! Frame-set algebra for shot validation.
//!
//! A [`FrameSet`] is a set of integer frame indices. It parses from and
//! renders to the compact range notation editors type into the timeline
//! (`1-10,15,20-30x2`), and supports the handful of set operations the
//! validation recorder needs.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum number of frames a single expression may expand to.
pub const MAX_FRAME_SET_SIZE: usize = 1_000_000;

/// One comma-separated item: `N`, `A-B` or `A-BxS`.
const ITEM_PATTERN: &str = r"^(-?\d+)(?:-(-?\d+)(?:x(\d+))?)?$";

static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(ITEM_PATTERN).expect("valid regex"));

/// An ordered set of frame indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSet {
    frames: BTreeSet<i64>,
}

impl FrameSet {
    /// The empty frame set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a frame range expression.
    ///
    /// Whitespace is ignored and the empty string yields the empty set.
    /// Ranges may run in either direction; a step applies from the first
    /// bound towards the second.
    ///
    /// ```
    /// use shotboard_core::frame_set::FrameSet;
    ///
    /// let set = FrameSet::parse("1-3, 7, 10-14x2").unwrap();
    /// assert_eq!(set.to_string(), "1-3,7,10,12,14");
    /// ```
    pub fn parse(expr: &str) -> Result<Self, CoreError> {
        let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
        let mut frames = BTreeSet::new();
        if compact.is_empty() {
            return Ok(Self { frames });
        }

        let mut expanded = 0usize;
        for item in compact.split(',') {
            let caps = ITEM_RE.captures(item).ok_or_else(|| {
                CoreError::InvalidFrameSet(format!("unrecognised frame range '{item}'"))
            })?;

            let start = parse_bound(&caps[1], item)?;
            let end = match caps.get(2) {
                Some(m) => parse_bound(m.as_str(), item)?,
                None => start,
            };
            let step = match caps.get(3) {
                Some(m) => m
                    .as_str()
                    .parse::<i64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| {
                        CoreError::InvalidFrameSet(format!("invalid step in '{item}'"))
                    })?,
                None => 1,
            };

            let span = start.abs_diff(end) / step.unsigned_abs();
            expanded = expanded.saturating_add(usize::try_from(span).unwrap_or(usize::MAX));
            expanded = expanded.saturating_add(1);
            if expanded > MAX_FRAME_SET_SIZE {
                return Err(CoreError::InvalidFrameSet(format!(
                    "expression expands to more than {MAX_FRAME_SET_SIZE} frames"
                )));
            }

            if start <= end {
                frames.extend((start..=end).step_by(step as usize));
            } else {
                frames.extend((end..=start).rev().step_by(step as usize));
            }
        }

        Ok(Self { frames })
    }

    /// Build a frame set from individual frame indices.
    pub fn from_frames<I: IntoIterator<Item = i64>>(frames: I) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Number of frames in the set.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn contains(&self, frame: i64) -> bool {
        self.frames.contains(&frame)
    }

    /// Frames in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.frames.iter().copied()
    }

    pub fn union(&self, other: &FrameSet) -> FrameSet {
        Self {
            frames: self.frames.union(&other.frames).copied().collect(),
        }
    }

    /// Frames in `self` that are not in `other`.
    pub fn difference(&self, other: &FrameSet) -> FrameSet {
        Self {
            frames: self.frames.difference(&other.frames).copied().collect(),
        }
    }

    /// Keep only frames within `[first, last]` inclusive.
    pub fn clip(&self, first: i64, last: i64) -> FrameSet {
        if first > last {
            return FrameSet::new();
        }
        Self {
            frames: self.frames.range(first..=last).copied().collect(),
        }
    }
}

fn parse_bound(raw: &str, item: &str) -> Result<i64, CoreError> {
    raw.parse::<i64>()
        .map_err(|_| CoreError::InvalidFrameSet(format!("frame number out of range in '{item}'")))
}

/// Renders ascending runs of consecutive frames, e.g. `1-10,15,20-22`.
impl fmt::Display for FrameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut runs: Vec<(i64, i64)> = Vec::new();
        for frame in self.iter() {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == frame => *end = frame,
                _ => runs.push((frame, frame)),
            }
        }

        for (i, (start, end)) in runs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if start == end {
                write!(f, "{start}")?;
            } else {
                write!(f, "{start}-{end}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for FrameSet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
