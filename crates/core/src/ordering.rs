//! Kanban position arithmetic.
//!
//! Tasks within a (workspace, status) bucket are ordered by an integer
//! `position`. New tasks append at the end with a fixed gap so manual
//! reordering can place a task between two neighbours without
//! re-indexing the whole column. Positions are bounded so a board can
//! only be reshuffled a finite number of times before a client would
//! have to re-normalize, and so corrupted client payloads are caught
//! early.

use crate::error::CoreError;

/// Gap between consecutive auto-assigned positions.
pub const POSITION_GAP: i64 = 1000;

/// Smallest position a client may supply in a bulk reorder.
pub const POSITION_MIN: i64 = 1000;

/// Largest position a client may supply in a bulk reorder.
pub const POSITION_MAX: i64 = 1_000_000;

/// Position for a task appended to a bucket whose current highest
/// position is `highest` (`None` for an empty bucket).
pub fn next_position(highest: Option<i64>) -> i64 {
    match highest {
        Some(position) => position + POSITION_GAP,
        None => POSITION_GAP,
    }
}

/// Validate a client-supplied position for a bulk reorder.
pub fn validate_position(position: i64) -> Result<(), CoreError> {
    if (POSITION_MIN..=POSITION_MAX).contains(&position) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "position {position} out of range [{POSITION_MIN}, {POSITION_MAX}]"
        )))
    }
}
