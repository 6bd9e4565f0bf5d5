//! Ordered stop-sequence editing.
//!
//! # Responsibility
//! - Insert, remove and reorder stops on a plain `Vec<String>`.
//! - Normalize sequences before they are persisted.
//!
//! # Invariants
//! - Editing operations never fail; out-of-range requests are no-ops or
//!   clamp, as documented per function.
//! - `move_stop` only ever swaps two adjacent entries.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Direction for `move_stop`, matching list offsets `-1` and `+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards the start of the route (index - 1).
    Up,
    /// Towards the end of the route (index + 1).
    Down,
}

impl MoveDirection {
    pub fn offset(self) -> i32 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// Offset other than `-1` or `+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDirection(pub i32);

impl Display for InvalidDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "move direction must be -1 or +1, got {}", self.0)
    }
}

impl Error for InvalidDirection {}

impl TryFrom<i32> for MoveDirection {
    type Error = InvalidDirection;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Up),
            1 => Ok(Self::Down),
            other => Err(InvalidDirection(other)),
        }
    }
}

/// Inserts a stop. `None` appends; an index is clamped into `[0, len]`.
pub fn insert_stop(stops: &mut Vec<String>, name: impl Into<String>, position: Option<i64>) {
    let len = stops.len();
    let index = match position {
        Some(position) => position.clamp(0, len as i64) as usize,
        None => len,
    };
    stops.insert(index, name.into());
}

/// Removes the stop at `index`. Out of range is a no-op returning `None`.
pub fn remove_stop(stops: &mut Vec<String>, index: usize) -> Option<String> {
    if index < stops.len() {
        Some(stops.remove(index))
    } else {
        None
    }
}

/// Moves one stop a single step.
///
/// Returns the stop's new index, or `None` when the move would leave the
/// sequence (first stop up, last stop down, index out of range).
pub fn move_stop(stops: &mut [String], index: usize, direction: MoveDirection) -> Option<usize> {
    if index >= stops.len() {
        return None;
    }
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1)?,
        MoveDirection::Down => index + 1,
    };
    if target >= stops.len() {
        return None;
    }
    stops.swap(index, target);
    Some(target)
}

/// Trims every stop name and drops entries left empty.
pub fn normalize_stops<I, S>(stops: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    stops
        .into_iter()
        .filter_map(|stop| {
            let trimmed = stop.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// Parses "one stop per line" text into a normalized sequence.
pub fn parse_stop_lines(text: &str) -> Vec<String> {
    normalize_stops(text.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn insert_appends_without_position() {
        let mut stops = seq(&["A", "B"]);
        insert_stop(&mut stops, "C", None);
        assert_eq!(stops, seq(&["A", "B", "C"]));
    }

    #[test]
    fn insert_clamps_position_into_bounds() {
        let mut stops = seq(&["A", "B"]);
        insert_stop(&mut stops, "first", Some(-5));
        insert_stop(&mut stops, "last", Some(99));
        insert_stop(&mut stops, "mid", Some(2));
        assert_eq!(stops, seq(&["first", "A", "mid", "B", "last"]));
    }

    #[test]
    fn insert_into_empty_sequence() {
        let mut stops = Vec::new();
        insert_stop(&mut stops, "Only", Some(3));
        assert_eq!(stops, seq(&["Only"]));
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut stops = seq(&["A", "B"]);
        assert_eq!(remove_stop(&mut stops, 2), None);
        assert_eq!(stops, seq(&["A", "B"]));
        assert_eq!(remove_stop(&mut stops, 0).as_deref(), Some("A"));
        assert_eq!(stops, seq(&["B"]));
    }

    #[test]
    fn move_first_up_and_last_down_are_noops() {
        let mut stops = seq(&["A", "B", "C"]);
        assert_eq!(move_stop(&mut stops, 0, MoveDirection::Up), None);
        assert_eq!(move_stop(&mut stops, 2, MoveDirection::Down), None);
        assert_eq!(move_stop(&mut stops, 7, MoveDirection::Down), None);
        assert_eq!(stops, seq(&["A", "B", "C"]));
    }

    #[test]
    fn move_swaps_exactly_two_adjacent_entries() {
        let mut stops = seq(&["A", "B", "C", "D"]);
        assert_eq!(move_stop(&mut stops, 1, MoveDirection::Down), Some(2));
        assert_eq!(stops, seq(&["A", "C", "B", "D"]));
        assert_eq!(move_stop(&mut stops, 3, MoveDirection::Up), Some(2));
        assert_eq!(stops, seq(&["A", "C", "D", "B"]));
    }

    #[test]
    fn direction_converts_from_offsets() {
        assert_eq!(MoveDirection::try_from(-1), Ok(MoveDirection::Up));
        assert_eq!(MoveDirection::try_from(1), Ok(MoveDirection::Down));
        assert_eq!(MoveDirection::try_from(0), Err(InvalidDirection(0)));
        assert_eq!(MoveDirection::Up.offset(), -1);
    }

    #[test]
    fn normalize_trims_and_drops_blank_entries() {
        assert_eq!(normalize_stops(["  A ", "", "B", "   "]), seq(&["A", "B"]));
    }

    #[test]
    fn parse_stop_lines_splits_and_normalizes() {
        assert_eq!(
            parse_stop_lines("Plaza\n\n  Mercado  \r\n \nTerminal"),
            seq(&["Plaza", "Mercado", "Terminal"])
        );
    }
}
