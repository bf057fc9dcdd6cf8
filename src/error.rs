//! Errors raised while validating or solving an escape-pod network.
//!
//! Validation failures are split by kind: [`ShapeError`] for a matrix or
//! terminal list that is structurally wrong, [`RangeError`] for values that
//! fall outside what the solver accepts. Both are wrapped by [`SolveError`],
//! which is what every public entry point returns.

use thiserror::Error;

/// The capacity matrix or the terminal lists have the wrong structure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Fewer than two rooms were supplied.
    #[error("capacity matrix needs at least 2 rooms, got {rooms}")]
    TooFewRooms { rooms: usize },
    /// A row does not have one column per room.
    #[error("capacity matrix row {row} has {columns} columns, expected {rooms}")]
    RaggedRow {
        row: usize,
        columns: usize,
        rooms: usize,
    },
    #[error("no entrance rooms given")]
    NoEntrances,
    #[error("no escape pod rooms given")]
    NoExits,
}

/// Which terminal list an out-of-range room index came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    Entrance,
    Exit,
}

impl std::fmt::Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entrance => write!(f, "entrance"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// A value in the input lies outside the accepted range.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("{terminal} room {room} is out of range for {rooms} rooms")]
    RoomOutOfRange {
        terminal: Terminal,
        room: usize,
        rooms: usize,
    },
    #[error("corridor {from} -> {to} has negative capacity {capacity}")]
    NegativeCapacity { from: usize, to: usize, capacity: i64 },
    /// The summed capacities would collide with the unbounded sentinel.
    #[error("total corridor capacity exceeds {limit}")]
    CapacityOverflow { limit: i64 },
    /// A room is both an entrance and an exit in a multi-terminal network.
    #[error("room {room} is both an entrance and an exit")]
    SharedRoom { room: usize },
}

/// Top-level error for a solve call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("malformed network: {0}")]
    Shape(#[from] ShapeError),
    #[error("invalid network: {0}")]
    Range(#[from] RangeError),
    /// The caller's augmentation bound was hit before the flow converged.
    #[error("flow did not converge within {limit} augmentations")]
    AugmentationLimit { limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_wraps_into_solve_error() {
        let err: SolveError = ShapeError::NoExits.into();
        assert_eq!(err, SolveError::Shape(ShapeError::NoExits));
        assert_eq!(err.to_string(), "malformed network: no escape pod rooms given");
    }

    #[test]
    fn range_error_message_names_the_terminal() {
        let err = RangeError::RoomOutOfRange {
            terminal: Terminal::Exit,
            room: 9,
            rooms: 4,
        };
        assert_eq!(err.to_string(), "exit room 9 is out of range for 4 rooms");
    }
}
