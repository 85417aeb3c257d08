//! Shot validation snapshots.
//!
//! Each validation update produces a complete snapshot of the frames
//! validated in a shot. The snapshot is derived from the shot's latest
//! stored snapshot and the incoming partial update.

use crate::error::CoreError;
use crate::frame_set::FrameSet;

/// First valid frame index of any shot.
pub const FIRST_FRAME: i64 = 1;

/// A snapshot ready to be persisted as a validation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSnapshot {
    pub frame_set: FrameSet,
    /// Cardinality of `frame_set`.
    pub total: i32,
}

impl ValidationSnapshot {
    /// Canonical serialized form stored in `validation_records.frame_set`.
    pub fn serialized_frame_set(&self) -> String {
        self.frame_set.to_string()
    }
}

/// Combine the shot's current frame set with an update.
///
/// - With a prior set, the update is merged in (`prior ∪ update`) or taken
///   out (`prior − update`) depending on `subtract`.
/// - Without a prior set, a subtraction yields the empty set and a merge
///   yields the update itself.
///
/// The result is clipped to `[1, nb_frames]`.
pub fn next_frame_set(
    prior: Option<&FrameSet>,
    update: &FrameSet,
    subtract: bool,
    nb_frames: i64,
) -> FrameSet {
    let combined = match (prior, subtract) {
        (Some(prior), false) => prior.union(update),
        (Some(prior), true) => prior.difference(update),
        (None, false) => update.clone(),
        (None, true) => FrameSet::new(),
    };
    combined.clip(FIRST_FRAME, nb_frames)
}

/// Build the next snapshot for a shot.
///
/// `prior_frame_set` is the serialized set of the shot's latest record; an
/// unparsable stored value is an internal error.
pub fn build_snapshot(
    prior_frame_set: Option<&str>,
    update: &FrameSet,
    subtract: bool,
    nb_frames: i64,
) -> Result<ValidationSnapshot, CoreError> {
    let prior = prior_frame_set
        .map(|stored| {
            FrameSet::parse(stored).map_err(|e| {
                CoreError::Internal(format!("stored validation frame set is corrupt: {e}"))
            })
        })
        .transpose()?;

    let frame_set = next_frame_set(prior.as_ref(), update, subtract, nb_frames);
    let total = i32::try_from(frame_set.len())
        .map_err(|_| CoreError::Internal("validated frame count overflows i32".into()))?;

    Ok(ValidationSnapshot { frame_set, total })
}
