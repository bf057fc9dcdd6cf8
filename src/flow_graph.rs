use log::debug;
use pathfinding::matrix::Matrix;

use crate::error::{RangeError, ShapeError, SolveError, Terminal};

/// Capacity of the edges that tie a synthetic source or sink to the real
/// terminals.
///
/// Any admissible network has a total capacity strictly below this value,
/// and `UNBOUNDED - flow` cannot overflow for any flow the solver produces.
pub const UNBOUNDED: i64 = i64::MAX / 4;

/// A validated escape-pod network: rooms, corridor capacities, and the
/// entrance and exit rooms.
///
/// Construction is the only place input is checked. Once a `FlowGraph`
/// exists every solve on it is free of shape or range failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowGraph {
    capacity: Matrix<i64>,
    entrances: Vec<usize>,
    exits: Vec<usize>,
}

impl FlowGraph {
    /// Validate the caller's network and take an owned copy of it.
    ///
    /// `rows[u][v]` is the capacity of the corridor from room `u` to room
    /// `v`. Entrance and exit lists are sorted and de-duplicated.
    pub fn new<R: AsRef<[i64]>>(
        entrances: &[usize],
        exits: &[usize],
        rows: &[R],
    ) -> Result<Self, SolveError> {
        let rooms = rows.len();
        if rooms < 2 {
            return Err(ShapeError::TooFewRooms { rooms }.into());
        }
        for (row, values) in rows.iter().enumerate() {
            let columns = values.as_ref().len();
            if columns != rooms {
                return Err(ShapeError::RaggedRow { row, columns, rooms }.into());
            }
        }

        let entrances = normalize_terminals(entrances, Terminal::Entrance, rooms)?;
        let exits = normalize_terminals(exits, Terminal::Exit, rooms)?;

        let mut capacity = Matrix::new_square(rooms, 0i64);
        let mut total: i64 = 0;
        for (from, values) in rows.iter().enumerate() {
            for (to, &value) in values.as_ref().iter().enumerate() {
                if value < 0 {
                    return Err(RangeError::NegativeCapacity {
                        from,
                        to,
                        capacity: value,
                    }
                    .into());
                }
                total = total
                    .checked_add(value)
                    .filter(|sum| *sum < UNBOUNDED)
                    .ok_or(RangeError::CapacityOverflow { limit: UNBOUNDED })?;
                capacity[(from, to)] = value;
            }
        }

        // A lone entrance that is also the lone exit is the degenerate
        // zero-flow network. Any other overlap would open an unbounded path.
        let degenerate = entrances.len() == 1 && exits.len() == 1 && entrances == exits;
        if !degenerate {
            if let Some(&room) = entrances.iter().find(|&&room| exits.binary_search(&room).is_ok()) {
                return Err(RangeError::SharedRoom { room }.into());
            }
        }

        debug!(
            "Validated network: {} rooms, {} entrances, {} exits, total capacity {}",
            rooms,
            entrances.len(),
            exits.len(),
            total
        );

        Ok(FlowGraph {
            capacity,
            entrances,
            exits,
        })
    }

    pub fn num_rooms(&self) -> usize {
        self.capacity.rows
    }

    /// Capacity of the corridor `from -> to`.
    pub fn capacity(&self, from: usize, to: usize) -> i64 {
        self.capacity[(from, to)]
    }

    pub fn capacities(&self) -> &Matrix<i64> {
        &self.capacity
    }

    /// Sorted, distinct entrance rooms.
    pub fn entrances(&self) -> &[usize] {
        &self.entrances
    }

    /// Sorted, distinct escape pod rooms.
    pub fn exits(&self) -> &[usize] {
        &self.exits
    }

    /// True when the network already has one source and one sink.
    pub fn is_single_terminal(&self) -> bool {
        self.entrances.len() == 1 && self.exits.len() == 1
    }

    /// Sum of the capacities of every corridor leaving an entrance.
    ///
    /// No flow can exceed this.
    pub fn entrance_capacity(&self) -> i64 {
        self.entrances
            .iter()
            .map(|&room| (0..self.num_rooms()).map(|to| self.capacity(room, to)).sum::<i64>())
            .sum()
    }
}

fn normalize_terminals(
    rooms_given: &[usize],
    terminal: Terminal,
    rooms: usize,
) -> Result<Vec<usize>, SolveError> {
    if rooms_given.is_empty() {
        return Err(match terminal {
            Terminal::Entrance => ShapeError::NoEntrances,
            Terminal::Exit => ShapeError::NoExits,
        }
        .into());
    }
    if let Some(&room) = rooms_given.iter().find(|&&room| room >= rooms) {
        return Err(RangeError::RoomOutOfRange {
            terminal,
            room,
            rooms,
        }
        .into());
    }
    let mut normalized = rooms_given.to_vec();
    normalized.sort_unstable();
    normalized.dedup();
    Ok(normalized)
}
