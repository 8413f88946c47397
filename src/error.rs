use thiserror::Error;

use crate::point::Point;

/// Convenient result alias for grid construction and path handling.
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed input detected while building a grid or working with its graph.
///
/// An unreachable target is not an error: searches report it as [None].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The grid has no rows or no columns.
    #[error("grid is empty")]
    EmptyGrid,

    /// A row does not have the same length as the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell holds a symbol that is not part of the configured [Symbols](crate::grid::Symbols).
    #[error("unknown symbol {symbol:?} at {point}")]
    UnknownSymbol { point: Point, symbol: char },

    /// The start or end marker does not appear in the grid.
    #[error("marker {marker:?} is missing")]
    MissingMarker { marker: char },

    /// The start or end marker appears more than once.
    #[error("marker {marker:?} appears at both {first} and {second}")]
    DuplicateMarker {
        marker: char,
        first: Point,
        second: Point,
    },

    #[error("{point} is outside the grid")]
    OutOfBounds { point: Point },

    /// Attempted to place a wall on the start or end cell.
    #[error("cannot block marker cell {point}")]
    MarkerBlocked { point: Point },

    /// Two consecutive path points are not joined by an edge of the graph.
    #[error("no edge leads from {from} to {to}")]
    NotAdjacent { from: Point, to: Point },

    #[error("{point} is not a decision point of the graph")]
    NotANode { point: Point },
}
