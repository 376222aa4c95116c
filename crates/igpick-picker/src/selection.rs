//! The selection engine: narrow a normalized batch to the eligible
//! population for a mode, then draw one member uniformly at random.
//!
//! The engine is a pure function of its inputs plus one draw from the
//! injected random source. `now` is injected too, so time windows are
//! testable.
//!
//! Orientation mode has one policy worth knowing about: when *no* record in
//! the batch carries a follow timestamp, the whole batch becomes the
//! population instead of producing an empty result. `info` says so and
//! [`Selection::time_filter_applied`] is `false`. Treating that case as
//! [`PickError::EmptyPopulation`] would be equally defensible; if that
//! changes, update the `orientation_without_timestamps_*` tests.

use chrono::{DateTime, Local, TimeDelta, Utc};
use igpick_core::{FollowerRecord, SelectionMode};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::PickError;

/// Display format for [`Selection::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one pick.
pub type SelectionResult = Result<Selection, PickError>;

/// A drawn winner plus what the operator needs to trust the draw.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub winner: FollowerRecord,
    pub mode: SelectionMode,
    /// Number of candidates the winner was drawn from.
    pub population: usize,
    /// `false` when orientation mode fell back to the unfiltered batch.
    pub time_filter_applied: bool,
    pub info: String,
    /// When the draw happened (local time, [`TIMESTAMP_FORMAT`]); not the
    /// winner's follow time.
    pub timestamp: String,
    pub selected_at: DateTime<Utc>,
}

/// The eligible candidates for a mode.
#[derive(Debug)]
pub struct Population<'a> {
    pub members: Vec<&'a FollowerRecord>,
    pub time_filter_applied: bool,
}

/// Computes the candidate population for `mode` without drawing.
#[must_use]
pub fn population<'a>(
    records: &'a [FollowerRecord],
    mode: &SelectionMode,
    now: DateTime<Utc>,
) -> Population<'a> {
    match *mode {
        SelectionMode::General { count } => Population {
            members: records.iter().take(count as usize).collect(),
            time_filter_applied: false,
        },
        SelectionMode::Orientation { time_window_hours } => {
            if records.iter().all(|r| r.followed_at.is_none()) {
                return Population {
                    members: records.iter().collect(),
                    time_filter_applied: false,
                };
            }
            let cutoff = now - window(time_window_hours);
            Population {
                members: records
                    .iter()
                    .filter(|r| r.followed_at.is_some_and(|t| t >= cutoff && t <= now))
                    .collect(),
                time_filter_applied: true,
            }
        }
    }
}

/// Draws one winner for `mode` from `records`.
///
/// Every member of the population has probability `1 / population`.
///
/// # Errors
///
/// Returns [`PickError::EmptyPopulation`] when no record is eligible.
pub fn select<R>(
    records: &[FollowerRecord],
    mode: &SelectionMode,
    now: DateTime<Utc>,
    rng: &mut R,
) -> SelectionResult
where
    R: Rng + ?Sized,
{
    let Population {
        members,
        time_filter_applied,
    } = population(records, mode, now);

    let Some(winner) = members.choose(rng) else {
        let reason = empty_reason(records, mode, time_filter_applied);
        tracing::info!(%mode, fetched = records.len(), %reason, "empty population");
        return Err(PickError::EmptyPopulation { reason });
    };

    let size = members.len();
    let info = describe(mode, size, time_filter_applied);
    tracing::info!(%mode, population = size, winner = %winner.username, "winner selected");

    Ok(Selection {
        winner: (*winner).clone(),
        mode: *mode,
        population: size,
        time_filter_applied,
        info,
        timestamp: now.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
        selected_at: now,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn window(hours: f64) -> TimeDelta {
    TimeDelta::milliseconds((hours * 3_600_000.0).round() as i64)
}

fn describe(mode: &SelectionMode, size: usize, time_filter_applied: bool) -> String {
    match *mode {
        SelectionMode::General { count } => {
            format!("from {size} followers (general mode, first {count} requested)")
        }
        SelectionMode::Orientation { time_window_hours } if time_filter_applied => format!(
            "from {size} new followers in the last {time_window_hours}h (orientation mode)"
        ),
        SelectionMode::Orientation { .. } => format!(
            "from {size} followers (orientation mode; time filter not applied: \
             upstream supplied no follow timestamps)"
        ),
    }
}

fn empty_reason(records: &[FollowerRecord], mode: &SelectionMode, filtered: bool) -> String {
    match *mode {
        SelectionMode::Orientation { time_window_hours } if filtered => format!(
            "no new followers in the last {time_window_hours} hour(s) \
             ({} followers fetched)",
            records.len()
        ),
        _ => "the account returned no followers".to_string(),
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
