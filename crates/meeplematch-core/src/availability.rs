//! Interval-based availability model.
//!
//! Players declare free time as minute-of-day intervals per calendar date.
//! This module owns the normalized-set invariant: within a stored set,
//! intervals are sorted by start and no two overlap or touch. All maintenance
//! goes through [`merge_intervals`]; nothing else hand-edits a set.
//!
//! Two different adjacency rules apply on purpose: merging coalesces touching
//! intervals (adjacent free-time blocks are one block), while intersection
//! requires strict overlap (exactly-touching blocks share zero minutes).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minutes in a day; the exclusive upper bound for interval ends.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A half-open range of minutes since midnight: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: u32,
    pub end: u32,
}

impl TimeInterval {
    /// Create a new interval, validating `0 <= start < end <= 1440`.
    pub fn try_new(start: u32, end: u32) -> Result<Self, ValidationError> {
        if start >= end || end > MINUTES_PER_DAY {
            return Err(ValidationError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create a new interval.
    ///
    /// # Panics
    /// Panics if `start >= end` or `end > 1440`. Use [`TimeInterval::try_new`]
    /// for untrusted input.
    pub fn new(start: u32, end: u32) -> Self {
        match Self::try_new(start, end) {
            Ok(interval) => interval,
            Err(err) => panic!("{err}"),
        }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }

    /// Check whether a minute-of-day falls inside this interval (half-open).
    pub fn contains(&self, minute: u32) -> bool {
        minute >= self.start && minute < self.end
    }

    /// Check whether two intervals share at least one minute.
    ///
    /// Strict: touching intervals (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }
}

/// A player's normalized free intervals on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub intervals: Vec<TimeInterval>,
}

impl DayAvailability {
    /// Create a day entry, normalizing the given intervals.
    pub fn new(date: NaiveDate, intervals: &[TimeInterval]) -> Self {
        Self {
            date,
            intervals: merge_intervals(intervals),
        }
    }

    /// Total free minutes on this date.
    pub fn total_minutes(&self) -> u32 {
        self.intervals.iter().map(TimeInterval::duration_minutes).sum()
    }
}

/// One denormalized schedule entry: a single interval on a single date.
///
/// This is the flat shape the scorer consumes and the shape of overlap
/// fragments. Unlike a stored interval set, a slot list carries no
/// normalization guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    pub date: NaiveDate,
    pub start: u32,
    pub end: u32,
}

impl DaySlot {
    pub fn new(date: NaiveDate, start: u32, end: u32) -> Self {
        Self { date, start, end }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// The slot's start as a UTC instant (minutes-of-day applied to the date).
    pub fn start_datetime(&self) -> DateTime<Utc> {
        let minute_of_day = self.start.min(MINUTES_PER_DAY - 1);
        let time = NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0)
            .unwrap_or(NaiveTime::MIN);
        self.date.and_time(time).and_utc()
    }
}

/// Normalize a set of intervals: sort by start, then coalesce in one
/// left-to-right sweep.
///
/// Touching intervals merge (`current.start <= running.end` counts as
/// overlap), so the output is the minimal representation: sorted, with a
/// strict gap between consecutive intervals. Idempotent.
pub fn merge_intervals(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    if intervals.is_empty() {
        return Vec::new();
    }

    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|interval| interval.start);

    let mut merged = Vec::with_capacity(sorted.len());
    let mut running = sorted[0];

    for interval in &sorted[1..] {
        if interval.start <= running.end {
            running.end = running.end.max(interval.end);
        } else {
            merged.push(running);
            running = *interval;
        }
    }
    merged.push(running);

    merged
}

/// Add an interval to a set and re-normalize.
pub fn add_interval(existing: &[TimeInterval], new: TimeInterval) -> Vec<TimeInterval> {
    let mut combined = existing.to_vec();
    combined.push(new);
    merge_intervals(&combined)
}

/// Remove a region from a set, splitting intervals where needed.
///
/// Each existing interval yields zero, one, or two pieces: untouched
/// intervals pass through, partial overlaps keep the uncovered side(s), and
/// fully covered intervals vanish. This is a split, not a re-merge: fragment
/// order and count per source interval are preserved.
pub fn remove_interval(existing: &[TimeInterval], to_remove: TimeInterval) -> Vec<TimeInterval> {
    let mut result = Vec::new();

    for interval in existing {
        // No overlap (touching included): keep as-is.
        if interval.end <= to_remove.start || interval.start >= to_remove.end {
            result.push(*interval);
            continue;
        }

        // Piece left of the removed region.
        if interval.start < to_remove.start {
            result.push(TimeInterval {
                start: interval.start,
                end: interval.end.min(to_remove.start),
            });
        }

        // Piece right of the removed region.
        if interval.end > to_remove.end {
            result.push(TimeInterval {
                start: interval.start.max(to_remove.end),
                end: interval.end,
            });
        }
    }

    result
}

/// Intersect two interval sets.
///
/// Strict overlap only: pairs that merely touch contribute nothing, because
/// their shared duration is zero. The result is normalized.
pub fn intersect_intervals(a: &[TimeInterval], b: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut overlaps = Vec::new();

    for x in a {
        for y in b {
            let start = x.start.max(y.start);
            let end = x.end.min(y.end);
            if start < end {
                overlaps.push(TimeInterval { start, end });
            }
        }
    }

    merge_intervals(&overlaps)
}

/// Check whether a minute-of-day falls inside any interval of the set.
pub fn is_time_available(intervals: &[TimeInterval], minute: u32) -> bool {
    intervals.iter().any(|interval| interval.contains(minute))
}

/// Enumerate fixed-length candidate slots inside each interval.
///
/// Slides a `duration`-minute window forward in `granularity`-minute steps
/// while it still fits. Purely an enumeration helper for presentation;
/// matching decisions never consume it. Degenerate arguments (`duration == 0`
/// or `granularity == 0`) yield no slots.
pub fn find_available_slots(
    intervals: &[TimeInterval],
    duration: u32,
    granularity: u32,
) -> Vec<TimeInterval> {
    if duration == 0 || granularity == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    for interval in intervals {
        let mut start = interval.start;
        while start + duration <= interval.end {
            slots.push(TimeInterval {
                start,
                end: start + duration,
            });
            start += granularity;
        }
    }

    slots
}

/// Flatten per-day availability into one slot per interval per date.
///
/// Day order then interval order is preserved; no merging happens, so raw
/// un-normalized input flattens as-is.
pub fn flatten_days(days: &[DayAvailability]) -> Vec<DaySlot> {
    days.iter()
        .flat_map(|day| {
            day.intervals.iter().map(|interval| DaySlot {
                date: day.date,
                start: interval.start,
                end: interval.end,
            })
        })
        .collect()
}

/// Raw pairwise same-date overlap fragments between two flat schedules.
///
/// Every strictly-overlapping pair produces one fragment; nothing is summed,
/// merged, or deduplicated, so self-overlapping input can yield duplicate or
/// overlapping fragments. Outer order follows `a`, inner order follows `b`.
pub fn overlap_slots(a: &[DaySlot], b: &[DaySlot]) -> Vec<DaySlot> {
    let mut fragments = Vec::new();

    for x in a {
        for y in b {
            if x.date != y.date {
                continue;
            }
            let start = x.start.max(y.start);
            let end = x.end.min(y.end);
            if start < end {
                fragments.push(DaySlot {
                    date: x.date,
                    start,
                    end,
                });
            }
        }
    }

    fragments
}

/// Add an interval to a player's availability on the given date.
///
/// Inserts the day in date order when absent; the day's set stays normalized.
pub fn add_availability(days: &mut Vec<DayAvailability>, date: NaiveDate, interval: TimeInterval) {
    match days.binary_search_by(|day| day.date.cmp(&date)) {
        Ok(index) => {
            days[index].intervals = add_interval(&days[index].intervals, interval);
        }
        Err(index) => {
            days.insert(
                index,
                DayAvailability {
                    date,
                    intervals: vec![interval],
                },
            );
        }
    }
}

/// Remove a region from a player's availability on the given date.
///
/// Days that empty out are dropped; dates the player never declared are a
/// no-op.
pub fn remove_availability(
    days: &mut Vec<DayAvailability>,
    date: NaiveDate,
    interval: TimeInterval,
) {
    if let Ok(index) = days.binary_search_by(|day| day.date.cmp(&date)) {
        days[index].intervals = remove_interval(&days[index].intervals, interval);
        if days[index].intervals.is_empty() {
            days.remove(index);
        }
    }
}
